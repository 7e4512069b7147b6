use crate::annotations::AnnotationState;
use crate::app::Model;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    GoToTop,
    GoToBottom,
    /// Jump to the start of the next section
    NextSection,
    /// Jump to the start of the previous (or current) section
    PrevSection,

    // TOC
    /// Toggle TOC pane visibility
    ToggleToc,
    /// Move TOC selection up
    TocUp,
    /// Move TOC selection down
    TocDown,
    /// Jump to selected TOC entry
    TocSelect,
    /// Select and jump to TOC entry by index
    TocClick(usize),
    /// Switch focus between TOC and document
    SwitchFocus,

    // Sections
    /// Activate the notes control of the current section
    ToggleNotes,
    /// Activate the notes control of section n
    ToggleNotesAt(usize),
    /// Expand every section if any is collapsed, else collapse all
    ToggleAllNotes,

    // Panes
    ToggleWitnesses,
    /// Flip light/dark; persisted as a side effect
    ToggleTheme,
    ToggleHelp,
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// All state transitions happen here; theme persistence runs afterwards
/// in the effects handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    let mut relayout = false;
    match msg {
        // Navigation
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),
        Message::NextSection => {
            let offset = model.viewport.offset();
            if let Some(range) = model
                .document
                .sections()
                .iter()
                .find(|range| range.start > offset)
            {
                model.viewport.go_to_line(range.start);
            }
        }
        Message::PrevSection => {
            let offset = model.viewport.offset();
            if let Some(range) = model
                .document
                .sections()
                .iter()
                .rev()
                .find(|range| range.start < offset)
            {
                model.viewport.go_to_line(range.start);
            }
        }

        // TOC
        Message::ToggleToc => {
            model.toc_visible = !model.toc_visible;
            if !model.toc_visible {
                model.toc_focused = false;
            } else if model.toc_selected.is_none() && model.toc_entry_count() > 0 {
                model.toc_selected = Some(model.edition.tracker.active_index().unwrap_or(0));
            }
            relayout = true;
        }
        Message::TocUp => {
            if let Some(sel) = model.toc_selected {
                model.toc_selected = Some(sel.saturating_sub(1));
                model.reveal_toc_selection();
            }
        }
        Message::TocDown => {
            if let Some(sel) = model.toc_selected {
                let max = model.toc_entry_count().saturating_sub(1);
                model.toc_selected = Some((sel + 1).min(max));
                model.reveal_toc_selection();
            }
        }
        Message::TocSelect => {
            if let Some(range) = model
                .toc_selected
                .and_then(|sel| model.document.section_range(sel))
            {
                model.viewport.go_to_line(range.start);
            }
        }
        Message::TocClick(idx) => {
            if idx < model.toc_entry_count() {
                model.toc_selected = Some(idx);
                if let Some(range) = model.document.section_range(idx) {
                    model.viewport.go_to_line(range.start);
                }
            }
        }
        Message::SwitchFocus => {
            if model.toc_visible {
                model.toc_focused = !model.toc_focused;
            }
        }

        // Sections
        Message::ToggleNotes => {
            if let Some(idx) = model.current_section() {
                relayout = model.edition.toggle_annotations(idx).is_some();
            }
        }
        Message::ToggleNotesAt(idx) => {
            relayout = model.edition.toggle_annotations(idx).is_some();
        }
        Message::ToggleAllNotes => {
            let any_collapsed = model
                .edition
                .sections
                .iter()
                .filter_map(|view| view.toggle)
                .any(|toggle| !toggle.state().is_expanded());
            let state = if any_collapsed {
                AnnotationState::Expanded
            } else {
                AnnotationState::Collapsed
            };
            model.edition.set_all_annotations(state);
            relayout = true;
        }

        // Panes
        Message::ToggleWitnesses => {
            if model.edition.page.sidebar.is_some() {
                model.witnesses_visible = !model.witnesses_visible;
                relayout = true;
            }
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        // ToggleTheme: handled in effects (writes the preference store)
        // Redraw: no state change needed
        Message::ToggleTheme | Message::Redraw => {}

        // Window
        Message::Resize(width, height) => {
            model
                .viewport
                .resize(width, crate::ui::document_viewport_height(height));
            relayout = true;
        }

        Message::Quit => {
            model.should_quit = true;
        }
    }

    if relayout {
        model.relayout();
    } else {
        model.sync_visibility();
    }
    model
}
