//! Section visibility for the terminal viewer.
//!
//! The pane has no intersection observer, so [`ViewportObserver`] derives
//! the same events by comparing each observed section's line range with
//! the scroll position after every change.

use std::collections::HashMap;
use std::ops::Range;

use crate::tracker::{ObserverOptions, VisibilityEvent, VisibilitySource, intersection_ratio};

#[derive(Debug, Clone, Default)]
pub struct ViewportObserver {
    options: ObserverOptions,
    observed: Vec<String>,
    intersecting: HashMap<String, bool>,
}

impl VisibilitySource for ViewportObserver {
    fn observe(&mut self, section_id: &str) {
        if !self.observed.iter().any(|id| id == section_id) {
            self.observed.push(section_id.to_string());
        }
    }

    fn unobserve(&mut self, section_id: &str) {
        self.observed.retain(|id| id != section_id);
        self.intersecting.remove(section_id);
    }
}

impl ViewportObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    /// Forget previous states so the next poll reports every section.
    pub fn reset(&mut self) {
        self.intersecting.clear();
    }

    /// Events for observed sections whose intersecting state changed since
    /// the last poll, in document order. The first poll after [`reset`]
    /// reports every observed section.
    ///
    /// [`reset`]: Self::reset
    pub fn poll<'a>(
        &mut self,
        sections: impl IntoIterator<Item = (&'a str, Range<usize>)>,
        viewport_top: usize,
        viewport_height: usize,
    ) -> Vec<VisibilityEvent> {
        let mut events = Vec::new();
        for (id, range) in sections {
            if !self.observed.iter().any(|observed| observed == id) {
                continue;
            }
            let ratio = intersection_ratio(range, viewport_top, viewport_height, self.options);
            let is_intersecting = ratio > 0.0 && ratio >= self.options.threshold;
            if self.intersecting.get(id) == Some(&is_intersecting) {
                continue;
            }
            self.intersecting.insert(id.to_string(), is_intersecting);
            events.push(VisibilityEvent {
                section_id: id.to_string(),
                is_intersecting,
                ratio,
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer(ids: &[&str]) -> ViewportObserver {
        let mut observer = ViewportObserver::new(ObserverOptions::default());
        for id in ids {
            observer.observe(id);
        }
        observer
    }

    fn sections() -> Vec<(&'static str, Range<usize>)> {
        vec![("sec-1", 0..10), ("sec-2", 10..20), ("sec-3", 20..60)]
    }

    #[test]
    fn test_first_poll_reports_every_observed_section() {
        let mut observer = observer(&["sec-1", "sec-2", "sec-3"]);
        let events = observer.poll(sections(), 0, 20);
        let states: Vec<(&str, bool)> = events
            .iter()
            .map(|e| (e.section_id.as_str(), e.is_intersecting))
            .collect();
        // Top 40% of 20 rows is rows 0..8.
        assert_eq!(states, vec![("sec-1", true), ("sec-2", false), ("sec-3", false)]);
    }

    #[test]
    fn test_unchanged_states_are_not_reported_again() {
        let mut observer = observer(&["sec-1", "sec-2", "sec-3"]);
        observer.poll(sections(), 0, 20);
        assert!(observer.poll(sections(), 1, 20).is_empty());
    }

    #[test]
    fn test_scrolling_reports_entering_and_leaving() {
        let mut observer = observer(&["sec-1", "sec-2", "sec-3"]);
        observer.poll(sections(), 0, 20);
        let events = observer.poll(sections(), 12, 20);
        let states: Vec<(&str, bool)> = events
            .iter()
            .map(|e| (e.section_id.as_str(), e.is_intersecting))
            .collect();
        assert_eq!(states, vec![("sec-1", false), ("sec-2", true)]);
    }

    #[test]
    fn test_small_overlap_below_threshold_is_not_intersecting() {
        let mut observer = observer(&["sec-3"]);
        // 1 of 40 rows visible: 0.025 < 0.1.
        let events = observer.poll(sections(), 13, 20);
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_intersecting);
        assert!(events[0].ratio > 0.0);
    }

    #[test]
    fn test_unobserved_sections_are_ignored() {
        let mut observer = observer(&["sec-1", "sec-2"]);
        observer.unobserve("sec-1");
        let events = observer.poll(sections(), 0, 20);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].section_id, "sec-2");
    }

    #[test]
    fn test_reset_replays_current_state() {
        let mut observer = observer(&["sec-1"]);
        observer.poll(sections(), 0, 20);
        observer.reset();
        assert_eq!(observer.poll(sections(), 0, 20).len(), 1);
    }
}
