//! Per-section show/hide control for commentary and apparatus.

use crate::markup::Element;

/// Control label while annotations are hidden.
pub const SHOW_NOTES_LABEL: &str = "Show notes";
/// Control label while annotations are shown.
pub const HIDE_NOTES_LABEL: &str = "Hide notes";

/// Class set on a section whose annotations are visible.
pub const EXPANDED_CLASS: &str = "show-notes";
/// Class of the toggle control inside a section.
pub const TOGGLE_CLASS: &str = "notes-toggle";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnnotationState {
    #[default]
    Collapsed,
    Expanded,
}

impl AnnotationState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Collapsed => SHOW_NOTES_LABEL,
            Self::Expanded => HIDE_NOTES_LABEL,
        }
    }

    const fn aria_expanded(self) -> &'static str {
        match self {
            Self::Collapsed => "false",
            Self::Expanded => "true",
        }
    }
}

/// The toggle control for one section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationToggle {
    state: AnnotationState,
}

impl AnnotationToggle {
    pub const fn state(self) -> AnnotationState {
        self.state
    }

    /// Build the control element in its initial (collapsed) state.
    pub fn control(controls: &str) -> Element {
        let state = AnnotationState::Collapsed;
        Element::new("button")
            .with_attr("type", "button")
            .with_class(TOGGLE_CLASS)
            .with_attr("aria-controls", controls)
            .with_attr("aria-expanded", state.aria_expanded())
            .with_text(state.label())
    }

    /// Handle a control activation on `section`.
    pub fn activate(&mut self, section: &mut Element) {
        self.state = self.state.toggled();
        Self::apply(self.state, section);
    }

    /// Force a state, e.g. when exporting with everything expanded.
    pub fn set(&mut self, state: AnnotationState, section: &mut Element) {
        self.state = state;
        Self::apply(state, section);
    }

    fn apply(state: AnnotationState, section: &mut Element) {
        if state.is_expanded() {
            section.add_class(EXPANDED_CLASS);
        } else {
            section.remove_class(EXPANDED_CLASS);
        }
        if let Some(button) = section.find_mut(&|el| el.has_class(TOGGLE_CLASS)) {
            button.set_attr("aria-expanded", state.aria_expanded());
            button.set_text(state.label());
        }
    }
}
