//! Configuration for the portfolio viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by main)
//! 2. Environment variables
//! 3. Config file (~/.config/folio/config.toml)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod motion;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use motion::{FileMotion, FileTracker, MotionConfig, TrackerConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default redraw tick; also the smooth-scroll step interval
const DEFAULT_TICK_MS: u64 = 50;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Portfolio content file (None = built-in content)
    pub content_path: Option<PathBuf>,

    /// Theme name: "Folio Dark", "Folio Light", "Terminal"
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Redraw tick in milliseconds
    pub tick_ms: u64,

    /// Tagline rotation, scrolling and parallax
    pub motion: MotionConfig,

    /// Section visibility thresholds
    pub tracker: TrackerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_path: None,
            theme: "Folio Dark".to_string(),
            use_theme_background: true,
            tick_ms: DEFAULT_TICK_MS,
            motion: MotionConfig::default(),
            tracker: TrackerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub content: Option<String>,
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,
    pub tick_ms: Option<u64>,

    /// Optional [motion] section
    pub motion: Option<FileMotion>,

    /// Optional [tracker] section
    pub tracker: Option<FileTracker>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/folio/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("folio").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth for the format
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse the config file if present
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (delete it to regenerate defaults)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        let mut config = Self::from_file(file);

        // Content file: env > file
        if let Ok(path) = std::env::var("FOLIO_CONTENT") {
            config.content_path = Some(PathBuf::from(path));
        }

        // Theme: env > file
        if let Ok(theme) = std::env::var("FOLIO_THEME") {
            config.theme = theme;
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge a parsed file over the defaults
    pub(crate) fn from_file(file: FileConfig) -> Self {
        let defaults = Self::default();

        Self {
            content_path: file.content.map(PathBuf::from),
            theme: file.theme.unwrap_or(defaults.theme),
            use_theme_background: file
                .use_theme_background
                .unwrap_or(defaults.use_theme_background),
            tick_ms: file.tick_ms.unwrap_or(defaults.tick_ms).max(1),
            motion: MotionConfig::from_file(file.motion),
            tracker: TrackerConfig::from_file(file.tracker),
            logging: LoggingConfig::from_file(file.logging),
        }
    }

    /// Reject values the tracker or presenters would refuse at construction
    pub fn validate(&self) -> Result<()> {
        self.motion
            .timing()
            .context("Invalid [motion] tagline timing")?;
        self.tracker
            .visibility()
            .context("Invalid [tracker] visibility settings")?;
        Ok(())
    }
}
