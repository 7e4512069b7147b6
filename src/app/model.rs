use std::path::PathBuf;

use crate::document::{Document, LineType, layout_page};
use crate::markup::Element;
use crate::render::RenderedEdition;
use crate::theme::ThemeMode;
use crate::ui::viewport::Viewport;
use crate::ui::visibility::ViewportObserver;
use crate::ui::{document_content_width, document_viewport_height};

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Rendered page and its interactive state
    pub edition: RenderedEdition,
    /// Display lines of the main area at the current width
    pub document: Document,
    pub viewport: Viewport,
    /// Feeds section visibility into the tracker
    pub observer: ViewportObserver,
    /// Payload name shown in the status bar
    pub source_name: String,
    pub toc_visible: bool,
    pub witnesses_visible: bool,
    /// Selected TOC entry index
    pub toc_selected: Option<usize>,
    /// Scroll offset of the TOC pane
    pub toc_scroll_offset: usize,
    /// Focus: true = TOC, false = document
    pub toc_focused: bool,
    pub help_visible: bool,
    pub should_quit: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
}

impl Model {
    /// Lay out `edition` for a terminal of `terminal_size` (columns, rows).
    /// `observer` is the source the edition's sections were registered with.
    pub fn new(
        edition: RenderedEdition,
        observer: ViewportObserver,
        terminal_size: (u16, u16),
    ) -> Self {
        let witnesses_visible = edition.page.sidebar.is_some();
        let mut model = Self {
            edition,
            viewport: Viewport::new(
                terminal_size.0,
                document_viewport_height(terminal_size.1),
                0,
            ),
            observer,
            toc_visible: false,
            witnesses_visible,
            ..Self::default()
        };
        model.relayout();
        model
    }

    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    #[must_use]
    pub fn with_toc_visible(mut self, visible: bool) -> Self {
        self.toc_visible = visible;
        if visible && self.toc_selected.is_none() && self.toc_entry_count() > 0 {
            self.toc_selected = Some(0);
        }
        self.relayout();
        self
    }

    pub const fn theme(&self) -> ThemeMode {
        self.edition.page.theme()
    }

    pub fn layout_width(&self) -> u16 {
        document_content_width(
            self.viewport.width(),
            self.toc_visible,
            self.witnesses_visible,
        )
    }

    /// Rebuild the display lines after a width or content change, keeping
    /// the top line's section in view.
    pub(super) fn relayout(&mut self) {
        let _scope = crate::perf::scope("app.relayout");
        let anchor = self.top_section();
        self.document = layout_page(&self.edition.page, self.layout_width());
        self.viewport.set_total_lines(self.document.line_count());
        if let Some(range) = anchor.and_then(|idx| self.document.section_range(idx))
            && !range.contains(&self.viewport.offset())
        {
            self.viewport.go_to_line(range.start);
        }
        self.toc_scroll_offset = self.toc_scroll_offset.min(self.max_toc_scroll_offset());
        self.observer.reset();
        self.sync_visibility();
    }

    /// Report visibility changes for the current scroll position to the
    /// tracker.
    pub(super) fn sync_visibility(&mut self) {
        let sections = self
            .edition
            .sections
            .iter()
            .zip(self.document.sections())
            .map(|(view, range)| (view.id.as_str(), range.clone()));
        let events = self.observer.poll(
            sections,
            self.viewport.offset(),
            self.viewport.height() as usize,
        );
        if !events.is_empty() && self.edition.handle_visibility(&events) {
            tracing::debug!(
                active = self.edition.tracker.active_link().map(|l| l.label.as_str()),
                "active section changed"
            );
        }
    }

    /// Section under the top line of the pane.
    pub fn top_section(&self) -> Option<usize> {
        self.document.section_at_line(self.viewport.offset())
    }

    /// Section the notes shortcut acts on: the active one, else the one at
    /// the top of the pane.
    pub fn current_section(&self) -> Option<usize> {
        self.edition
            .tracker
            .active_index()
            .or_else(|| self.top_section())
    }

    /// Section whose notes control is on display line `line`.
    pub fn toggle_at_line(&self, line: usize) -> Option<usize> {
        let rendered = self.document.line_at(line)?;
        if rendered.line_type() != LineType::Toggle {
            return None;
        }
        self.document.section_at_line(line)
    }

    pub fn toc_entry_count(&self) -> usize {
        self.edition.tracker.links().len()
    }

    /// Rows inside the TOC border.
    pub fn toc_visible_rows(&self) -> usize {
        self.viewport.height().saturating_sub(2) as usize
    }

    pub fn max_toc_scroll_offset(&self) -> usize {
        self.toc_entry_count()
            .saturating_sub(self.toc_visible_rows())
    }

    /// Scroll the TOC so the selected entry is on screen.
    pub(super) fn reveal_toc_selection(&mut self) {
        let Some(sel) = self.toc_selected else {
            return;
        };
        let visible = self.toc_visible_rows().max(1);
        if sel < self.toc_scroll_offset {
            self.toc_scroll_offset = sel;
        } else if sel >= self.toc_scroll_offset + visible {
            self.toc_scroll_offset = (sel + 1 - visible).min(self.max_toc_scroll_offset());
        }
    }

    /// `(siglum, description)` pairs of the witness card.
    pub fn witness_entries(&self) -> Vec<(String, String)> {
        let Some(list) = self
            .edition
            .page
            .sidebar
            .as_ref()
            .and_then(|sidebar| sidebar.find(&|el| el.tag == "dl"))
        else {
            return Vec::new();
        };
        let items: Vec<&Element> = list.child_elements().collect();
        items
            .chunks(2)
            .filter_map(|pair| match pair {
                [term, description] => Some((term.text_content(), description.text_content())),
                _ => None,
            })
            .collect()
    }
}
