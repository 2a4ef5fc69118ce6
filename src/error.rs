use thiserror::Error;
use tracing::warn;

/// Error severity for status line display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational, nothing was lost
    Warning,  // recoverable, launcher keeps running
    Error,    // the current attempt failed
    Critical, // programmer error, should never reach a user
}

/// Domain-specific errors for the launcher core
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Scratch buffer too small: need {required} entries, got {actual}")]
    InvalidBuffer { required: usize, actual: usize },

    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),

    #[error("Input is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse protocol message: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidBuffer { .. } => ErrorSeverity::Critical,
            Self::UnsupportedTarget(_) => ErrorSeverity::Warning,
            Self::InvalidEncoding(_) => ErrorSeverity::Error,
            Self::Config(_) => ErrorSeverity::Warning,
            Self::Protocol(_) => ErrorSeverity::Warning,
            Self::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Short text suitable for the launcher's status line
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidBuffer { .. } => "Internal error, see log".to_string(),
            Self::UnsupportedTarget(target) => format!("Cannot open {}", target),
            Self::InvalidEncoding(_) => "Input is not valid text".to_string(),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
            Self::Protocol(e) => format!("Invalid message format: {}", e),
            Self::Io(e) => format!("I/O failure: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;

/// Log-and-skip for failures the launcher can live without, such as an
/// unreadable executable directory.
pub trait ResultExt<T> {
    /// `Some(value)` on success; otherwise a `warn!` carrying the caller's
    /// location, then `None`.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        let location = std::panic::Location::caller();
        self.map_err(|error| {
            warn!(
                error = ?error,
                file = location.file(),
                line = location.line(),
                "Skipping after recoverable failure"
            );
        })
        .ok()
    }
}

/// Panic in debug mode, log error in release mode.
///
/// Use for "impossible" states that should crash during development
/// but gracefully degrade in production.
///
/// ```ignore
/// debug_panic!("Scratch buffers shrank below {} entries", len);
/// ```
#[macro_export]
macro_rules! debug_panic {
    ( $($fmt_arg:tt)* ) => {
        if cfg!(debug_assertions) {
            panic!( $($fmt_arg)* );
        } else {
            tracing::error!("IMPOSSIBLE STATE: {}", format_args!($($fmt_arg)*));
        }
    };
}
