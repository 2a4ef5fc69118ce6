//! JSONL request/response loop over stdin/stdout.
//!
//! This is how a host without its own input widget (a script, a test
//! harness, a window manager hook) drives the launcher.
//!
//! # Protocol
//!
//! One JSON object per line in each direction:
//!
//! ```json
//! {"type": "textChanged", "text": "urxvt @ed"}
//! {"type": "complete", "text": "urxvt @ed", "index": 0}
//! {"type": "commit", "text": "urxvt @editor"}
//! {"type": "refresh"}
//! ```
//!
//! ```json
//! {"type": "status", "text": "Launch urxvt @ed"}
//! {"type": "completion", "suggestion": "@editor", "line": "urxvt @editor"}
//! {"type": "action", "action": {"type": "runCommand", "target": {...}}}
//! {"type": "error", "message": "Input is not valid text"}
//! ```
//!
//! Every request may carry a `requestId`, echoed on all its responses.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{LauncherError, Result};
use crate::launcher::{decode_input, Action, DisplayStatus, Environment, Launcher};
use crate::pool::scan_executables;
use crate::ranker::splice_completion;

/// Requests a host can send
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExternalCommand {
    /// The input text was edited
    TextChanged {
        text: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Next suggestion for the last token; hosts bump `index` per request
    Complete {
        text: String,
        #[serde(default)]
        index: usize,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// The user confirmed the input
    Commit {
        text: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Rebuild candidate pools from the environment
    Refresh {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
}

/// Responses written back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    Status {
        text: String,
        #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    Completion {
        suggestion: Option<String>,
        /// Input with the last token replaced by the suggestion
        line: Option<String>,
        #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    Action {
        action: Action,
        #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    Error {
        message: String,
        #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
}

impl Response {
    fn status(status: &DisplayStatus, request_id: Option<String>) -> Self {
        Response::Status {
            text: status.to_string(),
            request_id,
        }
    }

    fn error(error: &LauncherError, request_id: Option<String>) -> Self {
        Response::Error {
            message: error.user_message(),
            request_id,
        }
    }
}

/// Environment for the stdin host: reports actions instead of running them
/// and remembers tags and views created by committed commands.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEnvironment {
    tags: Vec<String>,
    views: Vec<String>,
    executables: Vec<String>,
    last_status: Option<DisplayStatus>,
}

impl ScriptedEnvironment {
    pub fn new(tags: Vec<String>, views: Vec<String>, executables: Vec<String>) -> Self {
        ScriptedEnvironment {
            tags,
            views,
            executables,
            last_status: None,
        }
    }

    /// Tags and views from the config, executables from the configured dirs
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.get_tags(),
            config.get_views(),
            scan_executables(&config.get_executable_dirs()),
        )
    }

    pub fn last_status(&self) -> Option<&DisplayStatus> {
        self.last_status.as_ref()
    }
}

impl Environment for ScriptedEnvironment {
    fn tag_names(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn view_names(&self) -> Vec<String> {
        self.views.clone()
    }

    fn executable_names(&self) -> Vec<String> {
        self.executables.clone()
    }

    fn show_status(&mut self, status: &DisplayStatus) {
        debug!(status = %status, "Status line updated");
        self.last_status = Some(status.clone());
    }

    fn execute(&mut self, action: &Action) -> Result<()> {
        if let Action::RunCommand(descriptor) = action {
            for tag in &descriptor.tags {
                if !self.tags.contains(tag) {
                    self.tags.push(tag.clone());
                }
            }
            for view in &descriptor.views {
                if !self.views.contains(view) {
                    self.views.push(view.clone());
                }
            }
        }
        Ok(())
    }
}

/// Handle one request, returning the responses in order
pub fn handle_command(
    launcher: &mut Launcher,
    env: &mut dyn Environment,
    command: ExternalCommand,
) -> Vec<Response> {
    match command {
        ExternalCommand::TextChanged { text, request_id } => {
            let status = launcher.on_text_changed(&text);
            env.show_status(&status);
            vec![Response::status(&status, request_id)]
        }
        ExternalCommand::Complete {
            text,
            index,
            request_id,
        } => {
            let suggestion = launcher.on_completion_requested(&text, index);
            let line = suggestion.as_deref().map(|s| splice_completion(&text, s));
            vec![Response::Completion {
                suggestion,
                line,
                request_id,
            }]
        }
        ExternalCommand::Commit { text, request_id } => {
            let Some(action) = launcher.on_commit(&text) else {
                let status = DisplayStatus::Idle;
                env.show_status(&status);
                return vec![Response::status(&status, request_id)];
            };

            let status = launcher.execute(&action, env);
            if matches!(action, Action::RunCommand(_)) && !matches!(status, DisplayStatus::Error(_))
            {
                // Commands may have created tags and views
                launcher.refresh_pools(env);
            }

            vec![
                Response::Action {
                    action,
                    request_id: request_id.clone(),
                },
                Response::status(&status, request_id),
            ]
        }
        ExternalCommand::Refresh { request_id } => {
            launcher.refresh_pools(env);
            vec![Response::status(&DisplayStatus::Idle, request_id)]
        }
    }
}

/// Parse one raw line; `Ok(None)` for blank lines
pub fn parse_line(raw: &[u8]) -> Result<Option<ExternalCommand>> {
    let line = decode_input(raw)?.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Serve requests from `reader` until EOF, writing responses to `writer`.
///
/// Bad lines get an error response; only I/O failures end the loop early.
pub fn run<R: BufRead, W: Write>(
    launcher: &mut Launcher,
    env: &mut dyn Environment,
    mut reader: R,
    mut writer: W,
) -> Result<()> {
    info!("External command listener started");
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let responses = match parse_line(&buf) {
            Ok(Some(command)) => {
                debug!(command = ?command, "Parsed command");
                handle_command(launcher, env, command)
            }
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "Failed to parse command");
                vec![Response::error(&e, None)]
            }
        };

        for response in &responses {
            serde_json::to_writer(&mut writer, response)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }

    info!("External command listener exiting");
    Ok(())
}
