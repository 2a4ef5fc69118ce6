//! The launcher engine.
//!
//! A `Launcher` owns its pools, scratch buffers and ad-hoc tag namer. The
//! host drives it with three calls: text changed, completion requested and
//! commit. Everything that touches the outside world (window manager,
//! browser, process spawning) sits behind [`Environment`].

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::classifier::{Classifier, Intent};
use crate::command::{parse_command, CommandDescriptor, TagNamer};
use crate::config::Config;
use crate::distance::DistanceEngine;
use crate::error::Result;
use crate::pool::CandidatePools;
use crate::ranker::{last_token, Guess, Ranker};

/// Status line contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayStatus {
    /// Nothing typed yet
    Idle,
    Goto(String),
    Launch(String),
    /// Last action failed, message is user facing
    Error(String),
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStatus::Idle => write!(f, "Nothing selected"),
            DisplayStatus::Goto(target) => write!(f, "Goto {}", target),
            DisplayStatus::Launch(command) => write!(f, "Launch {}", command),
            DisplayStatus::Error(message) => write!(f, "{}", message),
        }
    }
}

/// What the environment should do with a committed input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "camelCase")]
pub enum Action {
    OpenUrl(String),
    RunCommand(CommandDescriptor),
}

/// The world outside the launcher core
pub trait Environment {
    fn tag_names(&self) -> Vec<String>;
    fn view_names(&self) -> Vec<String>;
    fn executable_names(&self) -> Vec<String>;

    fn show_status(&mut self, status: &DisplayStatus);

    /// Carry out `action`; `LauncherError::UnsupportedTarget` when it cannot
    fn execute(&mut self, action: &Action) -> Result<()>;
}

pub struct Launcher {
    classifier: Classifier,
    pools: CandidatePools,
    ranker: Ranker,
    namer: TagNamer,
    intent: Intent,
    completed: bool,
}

impl Launcher {
    pub fn new(config: &Config) -> Self {
        let engine = DistanceEngine::new(
            config.get_completion_costs().into(),
            config.get_scratch_buffer_len(),
        );
        Launcher {
            classifier: Classifier::with_search_template(config.get_search_url_template()),
            pools: CandidatePools::default(),
            ranker: Ranker::new(engine),
            namer: TagNamer::from_style(config.get_adhoc_tag_style()),
            intent: Intent::Empty,
            completed: false,
        }
    }

    pub fn pools(&self) -> &CandidatePools {
        &self.pools
    }

    /// Replace all pools at once
    pub fn set_pools(&mut self, pools: CandidatePools) {
        info!(
            event_type = "pool_refresh",
            tags = pools.tags.len(),
            views = pools.views.len(),
            executables = pools.executables.len(),
            "Candidate pools replaced"
        );
        self.pools = pools;
    }

    /// Rebuild every pool from what the environment knows right now
    pub fn refresh_pools(&mut self, env: &dyn Environment) {
        self.set_pools(CandidatePools::from_lists(
            env.tag_names(),
            env.view_names(),
            env.executable_names(),
        ));
    }

    /// Intent of the most recent edit
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    /// Whether the current text came from a completion request
    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn on_text_changed(&mut self, text: &str) -> DisplayStatus {
        self.intent = self.classifier.classify(text);
        if self.intent.is_empty() {
            self.completed = false;
        }
        debug!(intent = ?self.intent, "Input classified");
        self.intent.status()
    }

    /// Suggestion `select_index` for the last token of `text`
    pub fn on_completion_requested(&mut self, text: &str, select_index: usize) -> Option<String> {
        let token = last_token(text);
        if token.is_empty() {
            self.completed = false;
            return None;
        }
        self.completed = true;

        let suggestion = self.ranker.rank(&self.pools, token, select_index);
        debug!(token, select_index, suggestion = ?suggestion, "Completion requested");
        suggestion
    }

    /// All ranked suggestions for the last token of `text`
    pub fn guesses(&mut self, text: &str) -> Vec<Guess> {
        self.ranker.guesses(&self.pools, last_token(text))
    }

    /// Turn the final input into an action; `None` for empty input
    #[instrument(skip(self))]
    pub fn on_commit(&mut self, text: &str) -> Option<Action> {
        let intent = self.classifier.classify(text);
        self.intent = Intent::Empty;
        self.completed = false;

        let action = match intent {
            Intent::Empty => return None,
            Intent::Url(url) | Intent::SearchQuery { url, .. } => Action::OpenUrl(url),
            Intent::Command(raw) => {
                let mut descriptor = parse_command(&raw);
                descriptor.apply_adhoc_policy(&mut self.namer);
                Action::RunCommand(descriptor)
            }
        };

        info!(event_type = "commit", action = ?action, "Input committed");
        Some(action)
    }

    /// Hand `action` to the environment and report the outcome on the status line.
    ///
    /// Failures are shown to the user and logged; the launcher keeps going.
    pub fn execute(&mut self, action: &Action, env: &mut dyn Environment) -> DisplayStatus {
        let status = match env.execute(action) {
            Ok(()) => DisplayStatus::Idle,
            Err(e) => {
                warn!(error = %e, severity = ?e.severity(), "Action failed");
                DisplayStatus::Error(e.user_message())
            }
        };
        env.show_status(&status);
        status
    }
}

/// Decode host input bytes; the one hard failure on the input path
pub fn decode_input(bytes: &[u8]) -> Result<&str> {
    Ok(std::str::from_utf8(bytes)?)
}
