//! `tag-launcher`: drive the launcher over JSONL on stdin/stdout.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tag_launcher::config;
use tag_launcher::launcher::Launcher;
use tag_launcher::logging;
use tag_launcher::stdin_commands::{self, ScriptedEnvironment};

/// Launcher core speaking JSONL on stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "tag-launcher", version, about)]
struct Args {
    /// Config file (default: ~/.tag-launcher/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search URL template, must contain {query}
    #[arg(long)]
    search_template: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = logging::init();

    let mut config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    // Overrides the file; a template without {query} falls back like one in the file
    if let Some(template) = args.search_template {
        config.search_url_template = Some(template);
    }

    let mut env = ScriptedEnvironment::from_config(&config);
    let mut launcher = Launcher::new(&config);
    launcher.refresh_pools(&env);

    let stdin = io::stdin();
    let stdout = io::stdout();
    stdin_commands::run(&mut launcher, &mut env, stdin.lock(), stdout.lock())
        .context("Command loop failed")?;

    info!(event_type = "launcher_exit", "Launcher exiting");
    Ok(())
}
