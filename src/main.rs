use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use bookmarkit::commands::{Collaborators, Command, Outcome, Session};
use bookmarkit::config::Config;
use bookmarkit::system::{DesktopNotifier, Notifier, SystemClipboard, SystemOpener};
use bookmarkit::ui;

/// Store bookmarks and fuzzy-find them later
#[derive(Debug, Parser)]
#[command(name = "bookmarkit", version, about)]
struct Cli {
    /// Path to the bookmarks YAML file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Action to perform: 'add' or 'find'
    #[arg(long, default_value = "find")]
    action: String,

    /// Query string for the 'find' action
    #[arg(long)]
    query: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            // Settings are broken, so report with default notification settings
            DesktopNotifier::new(Default::default()).notify(&format!("Operation failed: {e:#}"));
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &config) {
        Ok(outcome) => {
            log::debug!("finished: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            DesktopNotifier::new(config.notifications.clone())
                .notify(&format!("Operation failed: {e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &Config) -> Result<Outcome> {
    let command: Command = cli.action.parse()?;
    let store_path = config
        .store_path(cli.file)
        .context("Error getting default bookmark file path")?;
    log::debug!("{command} using {}", store_path.display());

    let collaborators = Collaborators {
        notifier: Box::new(DesktopNotifier::new(config.notifications.clone())),
        clipboard: Box::new(SystemClipboard),
        opener: Box::new(SystemOpener),
        prompt: ui::key_link_prompt(config),
        selector: ui::list_selector(config),
    };

    Session::new(store_path, collaborators).run(command, cli.query.as_deref())
}
