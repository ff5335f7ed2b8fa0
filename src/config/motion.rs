//! Motion and visibility settings
//!
//! Raw numbers from the config file. They are turned into the checked
//! [`TaglineTiming`] and [`VisibilityConfig`] values at startup, so a bad
//! file fails with the same error the presenters and tracker would raise.

use serde::Deserialize;

use crate::error::FolioError;
use crate::tagline::TaglineTiming;
use crate::tracker::VisibilityConfig;

// ─────────────────────────────────────────────────────────────────────────────
// Motion
// ─────────────────────────────────────────────────────────────────────────────

/// Tagline rotation, scrolling and parallax
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Time each tagline stays up before fading out
    pub tagline_period_ms: u64,
    /// Hidden interval between fade-out and the next tagline
    pub tagline_settle_ms: u64,
    /// Animate jumps instead of snapping to the target row
    pub smooth_scroll: bool,
    /// Backdrop moves at this fraction of the page scroll
    pub parallax_factor: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tagline_period_ms: 2500,
            tagline_settle_ms: 300,
            smooth_scroll: true,
            parallax_factor: 0.2,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileMotion {
    pub tagline_period_ms: Option<u64>,
    pub tagline_settle_ms: Option<u64>,
    pub smooth_scroll: Option<bool>,
    pub parallax_factor: Option<f64>,
}

impl MotionConfig {
    pub fn from_file(file: Option<FileMotion>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            tagline_period_ms: file.tagline_period_ms.unwrap_or(defaults.tagline_period_ms),
            tagline_settle_ms: file.tagline_settle_ms.unwrap_or(defaults.tagline_settle_ms),
            smooth_scroll: file.smooth_scroll.unwrap_or(defaults.smooth_scroll),
            parallax_factor: file
                .parallax_factor
                .unwrap_or(defaults.parallax_factor)
                .clamp(0.0, 1.0),
        }
    }

    pub fn timing(&self) -> Result<TaglineTiming, FolioError> {
        TaglineTiming::from_millis(self.tagline_period_ms, self.tagline_settle_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracker
// ─────────────────────────────────────────────────────────────────────────────

/// Section visibility thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Fraction of a section that must be inside the effective viewport
    pub threshold: f64,
    /// Fraction of the viewport height excluded at the bottom
    pub bottom_margin: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let visibility = VisibilityConfig::default();
        Self {
            threshold: visibility.threshold,
            bottom_margin: visibility.bottom_margin,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileTracker {
    pub threshold: Option<f64>,
    pub bottom_margin: Option<f64>,
}

impl TrackerConfig {
    pub fn from_file(file: Option<FileTracker>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            threshold: file.threshold.unwrap_or(defaults.threshold),
            bottom_margin: file.bottom_margin.unwrap_or(defaults.bottom_margin),
        }
    }

    pub fn visibility(&self) -> Result<VisibilityConfig, FolioError> {
        VisibilityConfig::new(self.threshold, self.bottom_margin)
    }
}
