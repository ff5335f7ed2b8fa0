//! Configuration tests
//!
//! Round-trip guards: when a field is added to `Config`, `to_toml` and the
//! file layer must learn about it too, or these fail.

use super::*;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let reloaded = Config::from_file(parsed.unwrap());
    assert_eq!(reloaded.theme, config.theme);
    assert_eq!(reloaded.content_path, None);
    assert_eq!(reloaded.motion, config.motion);
    assert_eq!(reloaded.tracker, config.tracker);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.content_path = Some(PathBuf::from("/tmp/me.toml"));
    config.theme = "Terminal".to_string();
    config.use_theme_background = false;
    config.tick_ms = 16;
    config.motion.tagline_period_ms = 4000;
    config.motion.tagline_settle_ms = 500;
    config.motion.smooth_scroll = false;
    config.motion.parallax_factor = 0.5;
    config.tracker.threshold = 0.0;
    config.tracker.bottom_margin = 0.1;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let toml_str = config.to_toml();
    let parsed: FileConfig = toml::from_str(&toml_str)
        .unwrap_or_else(|e| panic!("TOML:\n{}\nError: {:?}", toml_str, e));
    let reloaded = Config::from_file(parsed);

    assert_eq!(reloaded.content_path, config.content_path);
    assert_eq!(reloaded.theme, "Terminal");
    assert!(!reloaded.use_theme_background);
    assert_eq!(reloaded.tick_ms, 16);
    assert_eq!(reloaded.motion, config.motion);
    assert_eq!(reloaded.tracker, config.tracker);
    assert!(reloaded.logging.file_enabled);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Partial files and defaults
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let parsed: FileConfig = toml::from_str("").unwrap();
    let config = Config::from_file(parsed);
    let defaults = Config::default();

    assert_eq!(config.theme, defaults.theme);
    assert_eq!(config.motion, defaults.motion);
    assert_eq!(config.tracker, defaults.tracker);
    assert_eq!(config.logging.file_prefix, "folio");
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let parsed: FileConfig = toml::from_str(
        r#"
[motion]
tagline_period_ms = 1000

[tracker]
bottom_margin = 0.0
"#,
    )
    .unwrap();
    let config = Config::from_file(parsed);

    assert_eq!(config.motion.tagline_period_ms, 1000);
    assert_eq!(config.motion.tagline_settle_ms, 300);
    assert_eq!(config.tracker.threshold, 0.3);
    assert_eq!(config.tracker.bottom_margin, 0.0);
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
}

#[test]
fn test_parallax_factor_is_clamped() {
    let parsed: FileConfig = toml::from_str("[motion]\nparallax_factor = 3.0\n").unwrap();
    assert_eq!(Config::from_file(parsed).motion.parallax_factor, 1.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_validate_rejects_settle_not_shorter_than_period() {
    let mut config = Config::default();
    config.motion.tagline_settle_ms = config.motion.tagline_period_ms;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_out_of_range_tracker_values() {
    let mut config = Config::default();
    config.tracker.threshold = 1.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.tracker.bottom_margin = 1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_tick_is_never_zero() {
    let parsed: FileConfig = toml::from_str("tick_ms = 0\n").unwrap();
    assert_eq!(Config::from_file(parsed).tick_ms, 1);
}
