// folio - terminal portfolio viewer
//
// Shows a one-page portfolio in the terminal: a sidebar with the owner's
// name, a rotating tagline and section navigation, next to a scrollable page
// whose active section is derived from what is actually on screen.
//
// Architecture:
// - Content: portfolio text loaded from TOML (built-in default or --content)
// - Tracker: active section from viewport intersections
// - Tagline: timed rotation driven by a timer capability
// - TUI (ratatui): sidebar, page, log panel, status bar
// - Preview: headless render/sections/taglines subcommands

mod cli;
mod config;
mod content;
mod error;
mod logging;
mod preview;
mod tagline;
mod theme;
mod tracker;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use content::Portfolio;
use logging::{LogBuffer, LogTarget};
use std::time::Duration;
use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never needs content or logging
    if let Some(Commands::Config(args)) = &cli.command {
        return cli::handle_config(args);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    cli.apply_overrides(&mut config);

    // The rolling appender wants its directory to exist
    if config.logging.file_enabled {
        if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
            eprintln!(
                "Warning: Could not create log directory {}: {}",
                config.logging.file_dir.display(),
                e
            );
            config.logging.file_enabled = false;
        }
    }

    // TUI mode captures logs into the panel buffer; subcommands log to stderr
    let log_buffer = LogBuffer::new();
    let target = match cli.command {
        None => LogTarget::Tui,
        Some(_) => LogTarget::Stderr,
    };
    let _log_guard = logging::init(&config.logging, &log_buffer, target);

    let portfolio = Portfolio::load(config.content_path.as_deref())?;
    tracing::debug!(
        name = portfolio.name.as_str(),
        sections = portfolio.sections.len(),
        "Content loaded"
    );

    match cli.command {
        None => tui::run_tui(portfolio, config, log_buffer).await,
        Some(Commands::Render { width }) => {
            let theme = Theme::by_name(&config.theme);
            print!("{}", preview::render(&portfolio, &theme, width));
            Ok(())
        }
        Some(Commands::Sections { width, height }) => {
            print!("{}", preview::sections(&portfolio, &config, width, height)?);
            Ok(())
        }
        Some(Commands::Taglines { until_ms }) => {
            let timing = config.motion.timing()?;
            let until = Duration::from_millis(until_ms);
            print!("{}", preview::taglines(&portfolio, timing, until)?);
            Ok(())
        }
        Some(Commands::Config(_)) => Ok(()),
    }
}
