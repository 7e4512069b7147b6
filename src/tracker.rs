//! Active TOC entry tracking.
//!
//! Sections report visibility changes through a [`VisibilitySource`]; the
//! tracker turns each "became visible" event into a single active TOC link.

use std::collections::{HashMap, HashSet};

use crate::render::TocLink;

/// Fraction of the viewport cut from the bottom of the observation area.
/// Sections count as visible only in the upper 40% of the viewport.
pub const ROOT_MARGIN_BOTTOM: f32 = 0.6;
/// Minimum visible share of a section for it to count as intersecting.
pub const VISIBLE_RATIO_THRESHOLD: f32 = 0.1;

/// Observation settings handed to a [`VisibilitySource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub root_margin_bottom: f32,
    pub threshold: f32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin_bottom: ROOT_MARGIN_BOTTOM,
            threshold: VISIBLE_RATIO_THRESHOLD,
        }
    }
}

/// One visibility change of an observed section.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEvent {
    pub section_id: String,
    pub is_intersecting: bool,
    pub ratio: f32,
}

/// Something that reports section visibility changes.
pub trait VisibilitySource {
    fn observe(&mut self, section_id: &str);
    fn unobserve(&mut self, section_id: &str);
}

#[derive(Debug, Clone, Default)]
pub struct ActiveSectionTracker {
    links: Vec<TocLink>,
    by_section: HashMap<String, usize>,
    active: Option<usize>,
}

impl ActiveSectionTracker {
    /// Index the links by section id. With duplicate ids the last link wins.
    pub fn new(links: Vec<TocLink>) -> Self {
        let by_section = links
            .iter()
            .enumerate()
            .map(|(idx, link)| (link.section_id.clone(), idx))
            .collect();
        Self {
            links,
            by_section,
            active: None,
        }
    }

    /// Start observing every linked section. Registration is never undone.
    pub fn register(&self, source: &mut dyn VisibilitySource) {
        for link in &self.links {
            source.observe(&link.section_id);
        }
    }

    /// Apply a batch of events in delivery order. Each intersecting event
    /// clears the current marker and activates its section's link, so the
    /// last one in the batch wins. Returns whether the active link changed.
    pub fn handle(&mut self, events: &[VisibilityEvent]) -> bool {
        let before = self.active;
        for event in events.iter().filter(|e| e.is_intersecting) {
            // Clear, then set: an id without a link leaves nothing active.
            self.active = self.by_section.get(&event.section_id).copied();
        }
        before != self.active
    }

    pub fn links(&self) -> &[TocLink] {
        &self.links
    }

    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_link(&self) -> Option<&TocLink> {
        self.active.and_then(|idx| self.links.get(idx))
    }

    pub fn link_index(&self, section_id: &str) -> Option<usize> {
        self.by_section.get(section_id).copied()
    }
}

/// Of the currently visible sections, the first in document order.
pub fn first_visible_in_document_order<'a>(
    order: &'a [TocLink],
    visible: &HashSet<&str>,
) -> Option<&'a TocLink> {
    order
        .iter()
        .find(|link| visible.contains(link.section_id.as_str()))
}

/// Visible share of a section spanning `section` (start..end, in rows)
/// inside a viewport starting at `viewport_top` with `viewport_height` rows.
#[allow(clippy::cast_precision_loss)]
pub fn intersection_ratio(
    section: std::ops::Range<usize>,
    viewport_top: usize,
    viewport_height: usize,
    options: ObserverOptions,
) -> f32 {
    if section.is_empty() {
        return 0.0;
    }
    let kept = (viewport_height as f32 * (1.0 - options.root_margin_bottom)).ceil();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let root_end = viewport_top + kept.max(1.0) as usize;
    let start = section.start.max(viewport_top);
    let end = section.end.min(root_end);
    if start >= end {
        return 0.0;
    }
    (end - start) as f32 / section.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str) -> TocLink {
        TocLink {
            section_id: id.to_string(),
            label: id.to_string(),
        }
    }

    fn event(id: &str, is_intersecting: bool) -> VisibilityEvent {
        VisibilityEvent {
            section_id: id.to_string(),
            is_intersecting,
            ratio: if is_intersecting { 0.5 } else { 0.0 },
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl VisibilitySource for Recorder {
        fn observe(&mut self, section_id: &str) {
            self.0.push(section_id.to_string());
        }
        fn unobserve(&mut self, section_id: &str) {
            self.0.retain(|id| id != section_id);
        }
    }

    #[test]
    fn test_register_observes_every_section_in_order() {
        let tracker = ActiveSectionTracker::new(vec![link("sec-1"), link("sec-2")]);
        let mut source = Recorder::default();
        tracker.register(&mut source);
        assert_eq!(source.0, vec!["sec-1", "sec-2"]);
    }

    #[test]
    fn test_intersecting_event_activates_link() {
        let mut tracker = ActiveSectionTracker::new(vec![link("sec-1"), link("sec-2")]);
        assert!(tracker.handle(&[event("sec-2", true)]));
        assert_eq!(tracker.active_link().unwrap().section_id, "sec-2");
    }

    #[test]
    fn test_leaving_event_keeps_previous_link() {
        let mut tracker = ActiveSectionTracker::new(vec![link("sec-1"), link("sec-2")]);
        tracker.handle(&[event("sec-1", true)]);
        assert!(!tracker.handle(&[event("sec-1", false)]));
        assert_eq!(tracker.active_index(), Some(0));
    }

    #[test]
    fn test_last_intersecting_event_in_batch_wins() {
        let mut tracker =
            ActiveSectionTracker::new(vec![link("sec-1"), link("sec-2"), link("sec-3")]);
        tracker.handle(&[event("sec-3", true), event("sec-1", true), event("sec-2", false)]);
        assert_eq!(tracker.active_index(), Some(0));
    }

    #[test]
    fn test_duplicate_ids_resolve_to_last_link() {
        let mut tracker = ActiveSectionTracker::new(vec![link("sec-x"), link("sec-x")]);
        tracker.handle(&[event("sec-x", true)]);
        assert_eq!(tracker.active_index(), Some(1));
    }

    #[test]
    fn test_unknown_section_clears_marker() {
        let mut tracker = ActiveSectionTracker::new(vec![link("sec-1")]);
        tracker.handle(&[event("sec-1", true)]);
        tracker.handle(&[event("sec-ghost", true)]);
        assert_eq!(tracker.active_index(), None);
    }

    #[test]
    fn test_first_visible_follows_document_order() {
        let links = vec![link("sec-1"), link("sec-2"), link("sec-3")];
        let visible: HashSet<&str> = ["sec-3", "sec-2"].into_iter().collect();
        assert_eq!(
            first_visible_in_document_order(&links, &visible).unwrap().section_id,
            "sec-2"
        );
        assert!(first_visible_in_document_order(&links, &HashSet::new()).is_none());
    }

    #[test]
    fn test_ratio_counts_only_upper_part_of_viewport() {
        let opts = ObserverOptions::default();
        // 20-row viewport keeps rows 0..8.
        assert!((intersection_ratio(0..4, 0, 20, opts) - 1.0).abs() < f32::EPSILON);
        assert!((intersection_ratio(6..10, 0, 20, opts) - 0.5).abs() < f32::EPSILON);
        assert!(intersection_ratio(8..12, 0, 20, opts).abs() < f32::EPSILON);
        assert!(intersection_ratio(0..5, 10, 20, opts).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_section_never_intersects() {
        assert!(intersection_ratio(3..3, 0, 20, ObserverOptions::default()).abs() < f32::EPSILON);
    }
}
