//! Viewport geometry and the visibility predicate
//!
//! Everything is measured in document rows. A region is a contiguous run of
//! rows owned by one section; the viewport is the run of rows currently on
//! screen.

use crate::error::FolioError;

/// Rows occupied by a section in the laid-out document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: u32,
    pub height: u32,
}

impl Region {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    /// First row past the end of the region
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Visible window over the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row
    pub offset: u32,
    /// Number of visible rows
    pub height: u32,
}

impl Viewport {
    pub fn new(offset: u32, height: u32) -> Self {
        Self { offset, height }
    }
}

/// When a region counts as "intersecting"
///
/// `threshold` is the fraction of the region that must be on screen.
/// `bottom_margin` removes that fraction of the viewport height from its
/// bottom edge before measuring, so a section only activates once its upper
/// part is in view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityConfig {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            bottom_margin: 0.25,
        }
    }
}

impl VisibilityConfig {
    /// Build a config, rejecting values outside their ranges
    pub fn new(threshold: f64, bottom_margin: f64) -> Result<Self, FolioError> {
        let config = Self {
            threshold,
            bottom_margin,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FolioError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FolioError::InvalidThreshold(self.threshold));
        }
        if !(0.0..1.0).contains(&self.bottom_margin) {
            return Err(FolioError::InvalidMargin(self.bottom_margin));
        }
        Ok(())
    }

    /// Viewport rows left after the bottom margin is applied: `[start, end)`
    pub fn effective_rows(&self, viewport: Viewport) -> (u32, u32) {
        let trimmed = (viewport.height as f64 * self.bottom_margin).round() as u32;
        let end = viewport.offset + viewport.height.saturating_sub(trimmed);
        (viewport.offset, end)
    }

    /// Fraction of `region` inside the effective viewport (0.0 to 1.0)
    pub fn visible_fraction(&self, region: Region, viewport: Viewport) -> f64 {
        let (start, end) = self.effective_rows(viewport);

        if region.height == 0 {
            return if region.top >= start && region.top < end {
                1.0
            } else {
                0.0
            };
        }

        let overlap_start = region.top.max(start);
        let overlap_end = region.bottom().min(end);
        let visible = overlap_end.saturating_sub(overlap_start);
        visible as f64 / region.height as f64
    }

    pub fn is_intersecting(&self, region: Region, viewport: Viewport) -> bool {
        let fraction = self.visible_fraction(region, viewport);
        if self.threshold == 0.0 {
            // Zero threshold means "any part on screen"
            return fraction > 0.0;
        }
        fraction >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_rows_trim_bottom_quarter() {
        let config = VisibilityConfig::default();
        assert_eq!(config.effective_rows(Viewport::new(0, 40)), (0, 30));
        assert_eq!(config.effective_rows(Viewport::new(12, 40)), (12, 42));
    }

    #[test]
    fn test_threshold_boundary() {
        let config = VisibilityConfig::default();
        let region = Region::new(20, 20);

        // Effective viewport [0, 30): rows 20..30 visible = 50%
        assert!(config.is_intersecting(region, Viewport::new(0, 40)));

        // Effective viewport [0, 24): rows 20..24 visible = 20%
        assert!(!config.is_intersecting(region, Viewport::new(0, 32)));

        // Exactly 30%: rows 20..26 of a 20-row region
        let exact = VisibilityConfig::new(0.3, 0.0).unwrap();
        assert!(exact.is_intersecting(region, Viewport::new(0, 26)));
        assert!(!exact.is_intersecting(region, Viewport::new(0, 25)));
    }

    #[test]
    fn test_margin_excludes_bottom_rows() {
        // Region fully inside the raw viewport but inside its bottom quarter
        let config = VisibilityConfig::default();
        let region = Region::new(32, 6);
        assert_eq!(config.visible_fraction(region, Viewport::new(0, 40)), 0.0);

        let no_margin = VisibilityConfig::new(0.3, 0.0).unwrap();
        assert_eq!(no_margin.visible_fraction(region, Viewport::new(0, 40)), 1.0);
    }

    #[test]
    fn test_region_above_viewport() {
        let config = VisibilityConfig::default();
        let region = Region::new(0, 10);
        assert!(!config.is_intersecting(region, Viewport::new(10, 40)));
        assert!(config.is_intersecting(region, Viewport::new(5, 40)));
    }

    #[test]
    fn test_zero_height_region() {
        let config = VisibilityConfig::default();
        assert!(config.is_intersecting(Region::new(5, 0), Viewport::new(0, 40)));
        assert!(!config.is_intersecting(Region::new(35, 0), Viewport::new(0, 40)));
    }

    #[test]
    fn test_zero_threshold_needs_some_overlap() {
        let config = VisibilityConfig::new(0.0, 0.0).unwrap();
        assert!(config.is_intersecting(Region::new(39, 10), Viewport::new(0, 40)));
        assert!(!config.is_intersecting(Region::new(40, 10), Viewport::new(0, 40)));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert_eq!(
            VisibilityConfig::new(1.5, 0.25),
            Err(FolioError::InvalidThreshold(1.5))
        );
        assert_eq!(
            VisibilityConfig::new(0.3, 1.0),
            Err(FolioError::InvalidMargin(1.0))
        );
        assert_eq!(
            VisibilityConfig::new(0.3, -0.1),
            Err(FolioError::InvalidMargin(-0.1))
        );
    }
}
