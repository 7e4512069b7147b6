use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::ui::{CHROME_ROWS, PaneLayout, pane_layout};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
                .then_some(Message::HideHelp);
        }

        let panes = current_panes(model);
        if let Some(toc_area) = panes.toc
            && point_in_rect(mouse.column, mouse.row, toc_area)
        {
            return match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) => toc_entry_at_row(model, toc_area, mouse.row)
                    .map(Message::TocClick),
                MouseEventKind::ScrollDown => Some(Message::TocDown),
                MouseEventKind::ScrollUp => Some(Message::TocUp),
                _ => None,
            };
        }

        if !point_in_rect(mouse.column, mouse.row, panes.document) {
            return None;
        }
        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                let line = model.viewport.line_at_row(mouse.row - panes.document.y)?;
                model.toggle_at_line(line).map(Message::ToggleNotesAt)
            }
            MouseEventKind::ScrollDown if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if model.help_visible {
            return match key.code {
                KeyCode::Char('c') if ctrl => Some(Message::Quit),
                _ => Some(Message::HideHelp),
            };
        }

        if model.toc_focused && model.toc_visible {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => return Some(Message::TocDown),
                KeyCode::Char('k') | KeyCode::Up => return Some(Message::TocUp),
                KeyCode::Enter | KeyCode::Char(' ') => return Some(Message::TocSelect),
                KeyCode::Esc => return Some(Message::SwitchFocus),
                _ => {}
            }
        }

        match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(1))
            }
            KeyCode::Char(' ') | KeyCode::PageDown if model.viewport.can_scroll_down() => {
                Some(Message::PageDown)
            }
            KeyCode::Char('b') | KeyCode::PageUp if model.viewport.can_scroll_up() => {
                Some(Message::PageUp)
            }
            KeyCode::Char('d') if ctrl => Some(Message::HalfPageDown),
            KeyCode::Char('u') if ctrl => Some(Message::HalfPageUp),
            KeyCode::Char('c') if ctrl => Some(Message::Quit),
            KeyCode::Char('l') if ctrl => Some(Message::Redraw),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char(']') => Some(Message::NextSection),
            KeyCode::Char('[') => Some(Message::PrevSection),

            // Sections
            KeyCode::Char('n') | KeyCode::Enter => Some(Message::ToggleNotes),
            KeyCode::Char('N') => Some(Message::ToggleAllNotes),

            // Panes
            KeyCode::Char('t') => Some(Message::ToggleToc),
            KeyCode::Tab if model.toc_visible => Some(Message::SwitchFocus),
            KeyCode::Char('w') => Some(Message::ToggleWitnesses),
            KeyCode::Char('d') => Some(Message::ToggleTheme),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }
}

fn current_panes(model: &Model) -> PaneLayout {
    let area = Rect::new(
        0,
        0,
        model.viewport.width(),
        model.viewport.height().saturating_add(CHROME_ROWS),
    );
    pane_layout(area, model.toc_visible, model.witnesses_visible)
}

fn toc_entry_at_row(model: &Model, toc_area: Rect, row: u16) -> Option<usize> {
    // Border rows hold no entries.
    if row <= toc_area.y || row + 1 >= toc_area.y + toc_area.height {
        return None;
    }
    let visible_rows = toc_area.height.saturating_sub(2) as usize;
    let start = model
        .toc_scroll_offset
        .min(model.toc_entry_count().saturating_sub(visible_rows));
    let idx = start + (row - toc_area.y - 1) as usize;
    (idx < model.toc_entry_count()).then_some(idx)
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
