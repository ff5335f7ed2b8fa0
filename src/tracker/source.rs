//! Intersection sources - where visibility changes come from
//!
//! The tracker never looks at scroll offsets. It asks a source to watch a set
//! of regions and later collects the batched "now intersecting / no longer
//! intersecting" records. Production code uses [`ScrollIntersectionSource`],
//! which re-evaluates every region whenever the page reports a new viewport.

use super::geometry::{Region, Viewport, VisibilityConfig};
use super::SectionId;

/// A visibility change for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub section: SectionId,
    pub is_intersecting: bool,
}

#[cfg(test)]
impl IntersectionEntry {
    pub fn entered(section: impl Into<SectionId>) -> Self {
        Self {
            section: section.into(),
            is_intersecting: true,
        }
    }

    pub fn left(section: impl Into<SectionId>) -> Self {
        Self {
            section: section.into(),
            is_intersecting: false,
        }
    }
}

/// Capability: watch regions and report intersection changes
pub trait IntersectionSource {
    /// Start watching `region` for `section`
    fn observe(&mut self, section: &SectionId, region: Region, config: &VisibilityConfig);

    /// Drain the records queued since the last call, oldest first
    fn take_records(&mut self) -> Vec<IntersectionEntry>;

    /// Stop watching everything. Must be safe to call more than once.
    fn disconnect(&mut self);
}

#[derive(Debug, Clone)]
struct Observed {
    section: SectionId,
    region: Region,
    config: VisibilityConfig,
    /// None until the first viewport sample
    intersecting: Option<bool>,
}

/// Polling emulation of an intersection observer driven by scroll position
///
/// The page calls [`set_viewport`](Self::set_viewport) after every scroll step
/// or resize. Only state changes are queued, in registration order.
#[derive(Debug)]
pub struct ScrollIntersectionSource {
    observed: Vec<Observed>,
    records: Vec<IntersectionEntry>,
    viewport: Option<Viewport>,
    connected: bool,
}

impl ScrollIntersectionSource {
    pub fn new() -> Self {
        Self {
            observed: Vec::new(),
            records: Vec::new(),
            viewport: None,
            connected: true,
        }
    }

    /// Re-evaluate every observed region against a new viewport
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !self.connected {
            return;
        }
        self.viewport = Some(viewport);
        self.evaluate(viewport);
    }

    /// Move a section's region after the document was re-laid out
    ///
    /// The section keeps its last known state, so a relayout only produces
    /// records once the next viewport sample shows an actual change.
    pub fn relayout(&mut self, section: &SectionId, region: Region) {
        if let Some(observed) = self.observed.iter_mut().find(|o| &o.section == section) {
            observed.region = region;
        }
    }

    #[cfg(test)]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of regions currently watched
    #[cfg(test)]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    fn evaluate(&mut self, viewport: Viewport) {
        for observed in &mut self.observed {
            let now = observed.config.is_intersecting(observed.region, viewport);
            if observed.intersecting != Some(now) {
                observed.intersecting = Some(now);
                self.records.push(IntersectionEntry {
                    section: observed.section.clone(),
                    is_intersecting: now,
                });
            }
        }
    }
}

impl Default for ScrollIntersectionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionSource for ScrollIntersectionSource {
    fn observe(&mut self, section: &SectionId, region: Region, config: &VisibilityConfig) {
        if !self.connected {
            return;
        }
        self.observed.push(Observed {
            section: section.clone(),
            region,
            config: *config,
            intersecting: None,
        });
        // Late registration still gets an initial record if the page is already sized
        if let Some(viewport) = self.viewport {
            self.evaluate(viewport);
        }
    }

    fn take_records(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut self.records)
    }

    fn disconnect(&mut self) {
        self.connected = false;
        self.observed.clear();
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with(regions: &[(&str, u32, u32)]) -> ScrollIntersectionSource {
        let mut source = ScrollIntersectionSource::new();
        let config = VisibilityConfig::default();
        for (name, top, height) in regions {
            source.observe(&SectionId::new(*name), Region::new(*top, *height), &config);
        }
        source
    }

    #[test]
    fn test_first_sample_reports_every_section() {
        let mut source = source_with(&[("Home", 0, 40), ("About", 40, 30)]);
        source.set_viewport(Viewport::new(0, 40));

        let records = source.take_records();
        assert_eq!(
            records,
            vec![IntersectionEntry::entered("Home"), IntersectionEntry::left("About")]
        );
    }

    #[test]
    fn test_only_changes_are_queued() {
        let mut source = source_with(&[("Home", 0, 40), ("About", 40, 30)]);
        source.set_viewport(Viewport::new(0, 40));
        source.take_records();

        // Small scroll: nothing crosses the threshold
        source.set_viewport(Viewport::new(2, 40));
        assert!(source.take_records().is_empty());

        // About's top now fills the effective viewport, Home scrolled away
        source.set_viewport(Viewport::new(38, 40));
        assert_eq!(
            source.take_records(),
            vec![IntersectionEntry::left("Home"), IntersectionEntry::entered("About")]
        );
    }

    #[test]
    fn test_relayout_keeps_state() {
        let mut source = source_with(&[("Home", 0, 40), ("About", 40, 30)]);
        source.set_viewport(Viewport::new(0, 40));
        source.take_records();

        source.relayout(&SectionId::new("About"), Region::new(10, 30));
        assert!(source.take_records().is_empty());

        source.set_viewport(Viewport::new(0, 40));
        assert_eq!(source.take_records(), vec![IntersectionEntry::entered("About")]);
    }

    #[test]
    fn test_disconnect_is_idempotent_and_silences_source() {
        let mut source = source_with(&[("Home", 0, 40)]);
        source.disconnect();
        source.disconnect();

        source.set_viewport(Viewport::new(0, 40));
        source.observe(
            &SectionId::new("About"),
            Region::new(0, 10),
            &VisibilityConfig::default(),
        );

        assert!(!source.is_connected());
        assert_eq!(source.observed_count(), 0);
        assert!(source.take_records().is_empty());
    }

    #[test]
    fn test_late_observe_gets_initial_record() {
        let mut source = source_with(&[("Home", 0, 40)]);
        source.set_viewport(Viewport::new(0, 40));
        source.take_records();

        source.observe(
            &SectionId::new("About"),
            Region::new(5, 10),
            &VisibilityConfig::default(),
        );
        assert_eq!(source.take_records(), vec![IntersectionEntry::entered("About")]);
    }
}
