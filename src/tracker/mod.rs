//! Active-section tracking
//!
//! Derives "which section is the reader looking at" from viewport visibility
//! instead of from raw scroll offsets. The tracker owns a single published
//! value, [`ActiveSectionTracker::active`], consumed by navigation
//! highlighting.
//!
//! Update rule: every record in a batch that says a section is now
//! intersecting makes that section active. Within one batch the last such
//! record wins; the scroll source queues records top to bottom, so when two
//! sections enter together the lower one ends up active. When nothing
//! intersects, the previous value is kept.

pub mod geometry;
pub mod source;

pub use geometry::{Region, Viewport, VisibilityConfig};
pub use source::{IntersectionEntry, IntersectionSource, ScrollIntersectionSource};

use crate::error::FolioError;
use std::collections::HashSet;
use std::fmt;

/// Display identifier of a section ("Home", "About", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize an anchor into a display id: first letter upper, rest lower
    ///
    /// `about`, `ABOUT` and `aBoUt` all become `About`.
    pub fn from_anchor(anchor: &str) -> Self {
        let anchor = anchor.trim();
        let mut chars = anchor.chars();
        let id = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.as_str().to_lowercase().chars())
                .collect(),
            None => String::new(),
        };
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A section to register: identifier plus its region, if it exists yet
#[derive(Debug, Clone)]
pub struct Section {
    pub id: SectionId,
    pub region: Option<Region>,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, region: Region) -> Self {
        Self {
            id: id.into(),
            region: Some(region),
        }
    }

    /// A section whose region never materialized; it is never observed
    #[cfg(test)]
    pub fn detached(id: impl Into<SectionId>) -> Self {
        Self {
            id: id.into(),
            region: None,
        }
    }
}

/// Keeps the active section in sync with an intersection source
pub struct ActiveSectionTracker<S: IntersectionSource> {
    source: S,
    sections: Vec<SectionId>,
    active: SectionId,
    connected: bool,
}

impl<S: IntersectionSource> ActiveSectionTracker<S> {
    /// Register `sections` with `source`; the first section starts active
    pub fn new(
        mut source: S,
        sections: Vec<Section>,
        config: VisibilityConfig,
    ) -> Result<Self, FolioError> {
        config.validate()?;

        let first = sections.first().ok_or(FolioError::NoSections)?.id.clone();

        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.clone()) {
                return Err(FolioError::DuplicateSection(section.id.to_string()));
            }
        }

        for section in &sections {
            match section.region {
                Some(region) => source.observe(&section.id, region, &config),
                None => tracing::debug!("Section {} has no region, not observed", section.id),
            }
        }

        Ok(Self {
            source,
            sections: sections.into_iter().map(|s| s.id).collect(),
            active: first,
            connected: true,
        })
    }

    /// Currently active section
    pub fn active(&self) -> &SectionId {
        &self.active
    }

    /// Registered section ids, in registration order
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    /// Position of the active section in registration order
    pub fn active_index(&self) -> usize {
        self.sections
            .iter()
            .position(|s| s == &self.active)
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Access the source, e.g. to feed it a new viewport
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Pull pending records from the source and apply them
    ///
    /// Returns true if the active section changed.
    pub fn sync(&mut self) -> bool {
        if !self.connected {
            return false;
        }
        let records = self.source.take_records();
        self.apply(records)
    }

    /// Apply one observation batch. Returns true if the active section changed.
    pub fn apply(&mut self, batch: impl IntoIterator<Item = IntersectionEntry>) -> bool {
        if !self.connected {
            return false;
        }

        let previous = self.active.clone();
        for entry in batch {
            if entry.is_intersecting && self.sections.contains(&entry.section) {
                self.active = entry.section;
            }
        }

        let changed = self.active != previous;
        if changed {
            tracing::debug!("Active section: {} -> {}", previous, self.active);
        }
        changed
    }

    /// Stop observing. Safe to call repeatedly; later batches are ignored.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.source.disconnect();
        tracing::debug!("Section tracker disconnected");
    }
}

impl<S: IntersectionSource> Drop for ActiveSectionTracker<S> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test double: records observe/disconnect calls, hands out queued batches
    #[derive(Default)]
    struct FakeSource {
        observed: Vec<SectionId>,
        pending: Vec<IntersectionEntry>,
        disconnects: usize,
    }

    impl IntersectionSource for FakeSource {
        fn observe(&mut self, section: &SectionId, _region: Region, _config: &VisibilityConfig) {
            self.observed.push(section.clone());
        }

        fn take_records(&mut self) -> Vec<IntersectionEntry> {
            std::mem::take(&mut self.pending)
        }

        fn disconnect(&mut self) {
            self.disconnects += 1;
        }
    }

    fn five_sections() -> Vec<Section> {
        ["Home", "About", "Resume", "Hobbies", "Contact"]
            .iter()
            .enumerate()
            .map(|(i, name)| Section::new(*name, Region::new(i as u32 * 40, 40)))
            .collect()
    }

    fn tracker() -> ActiveSectionTracker<FakeSource> {
        ActiveSectionTracker::new(
            FakeSource::default(),
            five_sections(),
            VisibilityConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_anchor_normalization() {
        assert_eq!(SectionId::from_anchor("about").as_str(), "About");
        assert_eq!(SectionId::from_anchor("hObBiEs").as_str(), "Hobbies");
        assert_eq!(SectionId::from_anchor("CONTACT").as_str(), "Contact");
        assert_eq!(SectionId::from_anchor("  home ").as_str(), "Home");
        assert_eq!(SectionId::from_anchor("").as_str(), "");
    }

    #[test]
    fn test_registers_every_section_with_a_region() {
        let mut sections = five_sections();
        sections.push(Section::detached("Blog"));

        let tracker = ActiveSectionTracker::new(
            FakeSource::default(),
            sections,
            VisibilityConfig::default(),
        )
        .unwrap();

        assert_eq!(tracker.source().observed.len(), 5);
        assert_eq!(tracker.sections().len(), 6);
        assert_eq!(tracker.active().as_str(), "Home");
    }

    #[test]
    fn test_rejects_bad_registration() {
        let empty = ActiveSectionTracker::new(
            FakeSource::default(),
            Vec::new(),
            VisibilityConfig::default(),
        );
        assert_eq!(empty.err(), Some(FolioError::NoSections));

        let dup = ActiveSectionTracker::new(
            FakeSource::default(),
            vec![
                Section::new("Home", Region::new(0, 10)),
                Section::new("Home", Region::new(10, 10)),
            ],
            VisibilityConfig::default(),
        );
        assert_eq!(dup.err(), Some(FolioError::DuplicateSection("Home".into())));
    }

    #[test]
    fn test_home_then_about() {
        let mut tracker = tracker();
        let mut observed = Vec::new();

        // t=0: Home intersects
        tracker.apply(vec![IntersectionEntry::entered("Home")]);
        observed.push(tracker.active().clone());

        // t=1000: About enters while Home leaves
        tracker.apply(vec![
            IntersectionEntry::left("Home"),
            IntersectionEntry::entered("About"),
        ]);
        observed.push(tracker.active().clone());

        assert_eq!(observed, vec![SectionId::new("Home"), SectionId::new("About")]);
    }

    #[test]
    fn test_most_recent_entry_wins() {
        let mut tracker = tracker();
        let batches = vec![
            vec![IntersectionEntry::entered("About")],
            vec![
                IntersectionEntry::entered("Resume"),
                IntersectionEntry::entered("Hobbies"),
            ],
            vec![IntersectionEntry::left("Hobbies")],
            vec![IntersectionEntry::entered("Contact"), IntersectionEntry::left("Resume")],
        ];

        let mut last_entered = None;
        for batch in batches {
            for entry in &batch {
                if entry.is_intersecting {
                    last_entered = Some(entry.section.clone());
                }
            }
            tracker.apply(batch);
            assert_eq!(Some(tracker.active()), last_entered.as_ref());
        }
        assert_eq!(tracker.active().as_str(), "Contact");
    }

    #[test]
    fn test_no_intersection_keeps_initial_value() {
        let mut tracker = tracker();
        for _ in 0..10 {
            assert!(!tracker.apply(vec![
                IntersectionEntry::left("Home"),
                IntersectionEntry::left("About"),
            ]));
        }
        assert_eq!(tracker.active().as_str(), "Home");
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let mut tracker = tracker();
        assert!(!tracker.apply(vec![IntersectionEntry::entered("Blog")]));
        assert_eq!(tracker.active().as_str(), "Home");
    }

    #[test]
    fn test_sync_drains_source() {
        let mut tracker = tracker();
        tracker
            .source_mut()
            .pending
            .push(IntersectionEntry::entered("Resume"));

        assert!(tracker.sync());
        assert_eq!(tracker.active().as_str(), "Resume");
        assert_eq!(tracker.active_index(), 2);
        assert!(!tracker.sync());
    }

    #[test]
    fn test_disconnect_freezes_active_section() {
        let mut tracker = tracker();
        tracker.apply(vec![IntersectionEntry::entered("About")]);

        tracker.disconnect();
        tracker.disconnect();
        assert_eq!(tracker.source().disconnects, 1);

        // Late arrivals after teardown
        assert!(!tracker.apply(vec![IntersectionEntry::entered("Contact")]));
        tracker
            .source_mut()
            .pending
            .push(IntersectionEntry::entered("Resume"));
        assert!(!tracker.sync());
        assert_eq!(tracker.active().as_str(), "About");
    }

    #[test]
    fn test_with_scroll_source() {
        let mut tracker = ActiveSectionTracker::new(
            ScrollIntersectionSource::new(),
            five_sections(),
            VisibilityConfig::default(),
        )
        .unwrap();

        tracker.source_mut().set_viewport(Viewport::new(0, 40));
        tracker.sync();
        assert_eq!(tracker.active().as_str(), "Home");

        tracker.source_mut().set_viewport(Viewport::new(80, 40));
        tracker.sync();
        assert_eq!(tracker.active().as_str(), "Resume");

        tracker.source_mut().set_viewport(Viewport::new(40, 40));
        tracker.sync();
        assert_eq!(tracker.active().as_str(), "About");
    }
}
