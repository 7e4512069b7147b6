use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::render::WITNESS_CARD_TITLE;

use super::style::{Palette, style_for_line_type};
use super::{
    CHROME_ROWS, DOCUMENT_LEFT_PADDING, TOC_WIDTH_PERCENT, WITNESS_PANE_WIDTH, overlays, status,
};

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub masthead: Rect,
    pub toc: Option<Rect>,
    pub document: Rect,
    pub witnesses: Option<Rect>,
    pub status: Rect,
}

pub fn pane_layout(area: Rect, toc_visible: bool, witnesses_visible: bool) -> PaneLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(if toc_visible { TOC_WIDTH_PERCENT } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(if witnesses_visible {
                WITNESS_PANE_WIDTH
            } else {
                0
            }),
        ])
        .split(rows[1]);
    PaneLayout {
        masthead: rows[0],
        toc: toc_visible.then_some(columns[0]),
        document: columns[1],
        witnesses: witnesses_visible.then_some(columns[2]),
        status: rows[2],
    }
}

/// Columns available to laid-out text in the document pane.
pub fn document_content_width(total_width: u16, toc_visible: bool, witnesses_visible: bool) -> u16 {
    let area = Rect::new(0, 0, total_width, CHROME_ROWS + 1);
    pane_layout(area, toc_visible, witnesses_visible)
        .document
        .width
        .saturating_sub(DOCUMENT_LEFT_PADDING)
        .max(1)
}

pub const fn document_viewport_height(total_height: u16) -> u16 {
    total_height.saturating_sub(CHROME_ROWS)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let palette = Palette::for_mode(model.theme());
    frame.render_widget(Block::default().style(palette.base()), area);

    let panes = pane_layout(area, model.toc_visible, model.witnesses_visible);
    render_masthead(model, frame, panes.masthead, &palette);
    if let Some(toc_area) = panes.toc {
        render_toc(model, frame, toc_area, &palette);
    }
    render_document(model, frame, panes.document);
    if let Some(witness_area) = panes.witnesses {
        render_witnesses(model, frame, witness_area, &palette);
    }
    status::render_status_bar(model, frame, panes.status, &palette);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_masthead(model: &Model, frame: &mut Frame, area: Rect, palette: &Palette) {
    let page = &model.edition.page;
    let mut spans = vec![Span::styled(
        format!(" {}", page.title.text_content()),
        palette
            .base()
            .fg(palette.heading)
            .add_modifier(Modifier::BOLD),
    )];
    let author = page.author.text_content();
    if !author.is_empty() {
        spans.push(Span::styled(format!("  {author}"), palette.base().fg(palette.muted)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_toc(model: &Model, frame: &mut Frame, area: Rect, palette: &Palette) {
    let links = model.edition.tracker.links();
    let active = model.edition.tracker.active_index();
    let visible_rows = area.height.saturating_sub(2) as usize;
    let start = model
        .toc_scroll_offset
        .min(links.len().saturating_sub(visible_rows));

    let items: Vec<Line> = links
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_rows)
        .map(|(i, link)| {
            let selected = model.toc_selected == Some(i);
            let marker = if selected { ">" } else { " " };
            let mut style = palette.base();
            if active == Some(i) {
                style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
            }
            if selected && model.toc_focused {
                style = style.reversed();
            }
            Line::styled(format!("{marker} {}", link.label), style)
        })
        .collect();

    let block = Block::default()
        .title("Contents")
        .borders(Borders::ALL)
        .border_style(if model.toc_focused {
            palette.base().fg(palette.accent)
        } else {
            palette.base().fg(palette.muted)
        });
    frame.render_widget(Paragraph::new(items).block(block), area);
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = model.theme();
    let content: Vec<Line> = model
        .document
        .visible_lines(model.viewport.offset(), area.height as usize)
        .into_iter()
        .map(|line| {
            Line::from(
                line.spans()
                    .iter()
                    .map(|span| Span::styled(span.text.clone(), style_for_line_type(span.kind, theme)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .style(Palette::for_mode(theme).base()),
        area,
    );
}

fn render_witnesses(model: &Model, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines = Vec::new();
    for (siglum, description) in model.witness_entries() {
        lines.push(Line::styled(
            siglum,
            palette.base().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(format!("  {description}"), palette.base()));
    }
    let block = Block::default()
        .title(WITNESS_CARD_TITLE)
        .borders(Borders::ALL)
        .border_style(palette.base().fg(palette.muted));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
