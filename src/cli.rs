// CLI module - command-line argument parsing and config handlers
//
// With no subcommand folio opens the TUI. Subcommands:
// - config --show|--path|--reset|--edit: manage the config file
// - render, sections, taglines: headless previews (see preview.rs)

use crate::config::{Config, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Terminal portfolio viewer
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version = VERSION)]
#[command(about = "Scrollable terminal portfolio with rotating taglines", long_about = None)]
pub struct Cli {
    /// Portfolio content file (TOML); overrides FOLIO_CONTENT and the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub content: Option<PathBuf>,

    /// Theme name; overrides FOLIO_THEME and the config file
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config(ConfigArgs),

    /// Print the laid-out page as plain text
    Render {
        /// Page width in columns
        #[arg(long, default_value_t = 80)]
        width: u16,
    },

    /// Print section regions and the active section while scrolling top to bottom
    Sections {
        /// Page width in columns
        #[arg(long, default_value_t = 80)]
        width: u16,

        /// Viewport height in rows
        #[arg(long, default_value_t = 24)]
        height: u16,
    },

    /// Print the tagline timeline on a virtual clock
    Taglines {
        /// Stop after this many milliseconds of virtual time
        #[arg(long, default_value_t = 10_300)]
        until_ms: u64,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Show effective configuration
    #[arg(long)]
    pub show: bool,

    /// Reset config file to defaults
    #[arg(long)]
    pub reset: bool,

    /// Open config file in $EDITOR
    #[arg(long)]
    pub edit: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,
}

impl Cli {
    /// Flags beat env vars and the config file
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.content {
            config.content_path = Some(path.clone());
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
    }
}

/// Handle `folio config ...`
pub fn handle_config(args: &ConfigArgs) -> Result<()> {
    if args.path {
        handle_config_path()
    } else if args.show {
        handle_config_show()
    } else if args.reset {
        handle_config_reset()
    } else if args.edit {
        handle_config_edit()
    } else {
        println!("Usage: folio config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn require_config_path() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path (no home directory)")
}

fn handle_config_path() -> Result<()> {
    println!("{}", require_config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = require_config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = require_config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!(
            "Failed to launch editor '{}' (set $EDITOR to your preferred editor)",
            editor
        )
    })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.content.is_none());
    }

    #[test]
    fn test_global_flags_apply_to_subcommands() {
        let cli =
            Cli::try_parse_from(["folio", "render", "--width", "60", "--theme", "terminal"])
                .unwrap();
        assert!(matches!(cli.command, Some(Commands::Render { width: 60 })));

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.theme, "terminal");
        assert_eq!(config.content_path, None);
    }

    #[test]
    fn test_content_flag_overrides_config() {
        let cli = Cli::try_parse_from(["folio", "--content", "me.toml"]).unwrap();
        let mut config = Config::default();
        config.content_path = Some(PathBuf::from("other.toml"));
        cli.apply_overrides(&mut config);
        assert_eq!(config.content_path, Some(PathBuf::from("me.toml")));
    }

    #[test]
    fn test_subcommand_defaults() {
        let cli = Cli::try_parse_from(["folio", "sections"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sections {
                width: 80,
                height: 24
            })
        ));

        let cli = Cli::try_parse_from(["folio", "taglines", "--until-ms", "5000"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Taglines { until_ms: 5000 })
        ));
    }

    #[test]
    fn test_config_flags() {
        let cli = Cli::try_parse_from(["folio", "config", "--path"]).unwrap();
        match cli.command {
            Some(Commands::Config(args)) => assert!(args.path && !args.show),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
