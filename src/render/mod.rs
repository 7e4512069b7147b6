//! Payload to page rendering.
//!
//! [`render_document`] rebuilds the TOC and the main area from a payload
//! and then runs the post-render steps in a fixed order: term titles,
//! active-section observer registration, witness panel, theme restore.
//! The returned [`RenderedEdition`] owns the page and handles the
//! interactions that follow (annotation toggles, visibility changes, theme
//! toggle).

mod ids;
mod page;
mod section;
mod splitter;
mod terms;
mod toc;
mod witness;

pub use ids::{SECTION_ID_PREFIX, sanitize, section_id};
pub use page::{
    AUTHOR_ID, CONTENT_ID, Page, SIDEBAR_ID, STATIC_SERVER_HINT, THEME_TOGGLE_ID, TITLE_ID,
    TOC_ID,
};
pub use section::{APPARATUS_LABEL, COMMENTARY_LABEL, SectionView, build_section};
pub use splitter::{SOURCE_LANG, TRANSLATION_LANG, split_bilingual};
pub use terms::enrich_term_titles;
pub use toc::{ACTIVE_CLASS, TocLink, mark_active};
pub use witness::{
    WITNESS_CARD_TITLE, display_siglum, fallback_witnesses, render_witness_panel,
    resolve_witnesses,
};

use crate::annotations::AnnotationState;
use crate::payload::{DocumentPayload, LoadError};
use crate::theme::{PreferenceStore, ThemeMode, ThemeToggle};
use crate::tracker::{ActiveSectionTracker, VisibilityEvent, VisibilitySource};

/// A rendered page plus the state of its interactive parts.
#[derive(Debug, Clone, Default)]
pub struct RenderedEdition {
    pub page: Page,
    pub sections: Vec<SectionView>,
    pub tracker: ActiveSectionTracker,
    pub theme: ThemeToggle,
}

/// Render `payload` into `page`.
pub fn render_document(
    payload: &DocumentPayload,
    mut page: Page,
    visibility: &mut dyn VisibilitySource,
    prefs: &dyn PreferenceStore,
) -> RenderedEdition {
    let _scope = crate::perf::scope("render.document");

    page.title.set_text(payload.meta.title.clone());
    page.author.set_text(payload.meta.author.clone());
    page.provenance = Some(payload.meta.generated_from.clone()).filter(|s| !s.is_empty());
    page.toc.clear();
    page.main.clear();

    let mut links = Vec::with_capacity(payload.divs.len());
    let mut sections = Vec::with_capacity(payload.divs.len());
    for div in &payload.divs {
        let link = TocLink::for_division(div);
        page.toc.push(link.element());
        links.push(link);

        let (view, element) = build_section(div);
        page.main.push(element);
        sections.push(view);
    }

    let enriched = enrich_term_titles(&mut page.main);

    let tracker = ActiveSectionTracker::new(links);
    tracker.register(visibility);

    render_witness_panel(
        page.sidebar.as_mut(),
        &resolve_witnesses(&payload.meta.witnesses),
    );

    let theme = ThemeToggle::init(prefs);
    page.apply_theme(theme.mode());

    tracing::info!(
        sections = sections.len(),
        enriched_terms = enriched,
        theme = theme.mode().label(),
        "document rendered"
    );
    crate::perf::log_event(
        "render.document",
        format!("sections={} enriched_terms={enriched}", sections.len()),
    );

    RenderedEdition {
        page,
        sections,
        tracker,
        theme,
    }
}

/// Replace the main area with the failure message and log it.
pub fn render_load_failure(page: &mut Page, err: &LoadError) {
    tracing::error!("{err}");
    page.show_load_error(err);
}

impl RenderedEdition {
    /// Activate the annotation control of section `index`. Returns the new
    /// state, or `None` when the section has no control.
    pub fn toggle_annotations(&mut self, index: usize) -> Option<AnnotationState> {
        let toggle = self.sections.get_mut(index)?.toggle.as_mut()?;
        let section = self.page.section_mut(index)?;
        toggle.activate(section);
        Some(toggle.state())
    }

    /// Force every annotation control into `state`.
    pub fn set_all_annotations(&mut self, state: AnnotationState) {
        for (index, view) in self.sections.iter_mut().enumerate() {
            let Some(toggle) = view.toggle.as_mut() else {
                continue;
            };
            if let Some(section) = self.page.section_mut(index) {
                toggle.set(state, section);
            }
        }
    }

    /// Feed a batch of visibility changes and refresh the TOC marker.
    pub fn handle_visibility(&mut self, events: &[VisibilityEvent]) -> bool {
        let changed = self.tracker.handle(events);
        if changed {
            mark_active(&mut self.page.toc, self.tracker.active_index());
        }
        changed
    }

    /// Activate the theme control: flip and persist.
    pub fn toggle_theme(&mut self, prefs: &mut dyn PreferenceStore) -> ThemeMode {
        let mode = self.theme.activate(prefs);
        self.page.apply_theme(mode);
        mode
    }
}
