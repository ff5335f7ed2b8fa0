//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    ///
    /// Written by `ensure_config_exists` and `folio config --reset`, so every
    /// key the loader understands must appear here.
    pub fn to_toml(&self) -> String {
        let content = match &self.content_path {
            Some(path) => format!("content = {:?}\n", path.display().to_string()),
            None => "# content = \"~/portfolio.toml\"\n".to_string(),
        };

        format!(
            r#"# folio configuration

# Portfolio content file (omit to use the built-in page)
{content}
# Theme: Folio Dark, Folio Light, Terminal (press 't' in the TUI to cycle)
theme = "{theme}"

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Redraw interval in milliseconds
tick_ms = {tick_ms}

# Tagline rotation and scrolling
[motion]
tagline_period_ms = {period}
tagline_settle_ms = {settle}  # must be shorter than the period
smooth_scroll = {smooth}
parallax_factor = {parallax:?}

# Active section detection
[tracker]
threshold = {threshold:?}          # fraction of a section that must be visible
bottom_margin = {margin:?}      # fraction of the screen ignored at the bottom

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the TUI log panel or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            content = content,
            theme = self.theme,
            use_bg = self.use_theme_background,
            tick_ms = self.tick_ms,
            period = self.motion.tagline_period_ms,
            settle = self.motion.tagline_settle_ms,
            smooth = self.motion.smooth_scroll,
            parallax = self.motion.parallax_factor,
            threshold = self.tracker.threshold,
            margin = self.tracker.bottom_margin,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
