//! Tag Launcher - the core of a keyboard launcher for a tagging window manager
//!
//! Text typed into the launcher is classified as a URL, a structured command
//! (`program @view #tag`) or a web search. Tokens complete against pools of
//! known tags, views and executables, ranked by weighted edit distance.

pub mod classifier;
pub mod command;
pub mod config;
pub mod distance;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod pool;
pub mod ranker;
pub mod stdin_commands;

pub use classifier::{classify, Classifier, Intent};
pub use command::{parse_command, CommandDescriptor};
pub use error::{LauncherError, Result};
pub use launcher::{Action, DisplayStatus, Environment, Launcher};
