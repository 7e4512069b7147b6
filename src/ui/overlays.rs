use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::style::Palette;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);
    let palette = Palette::for_mode(model.theme());

    let show = |path: Option<&std::path::Path>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };
    let global_cfg = show(model.config_global_path.as_deref(), "<unknown>");
    let local_cfg = show(model.config_local_path.as_deref(), "<none>");

    let section_style = palette.base().fg(palette.accent).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::styled("Reading", section_style),
        Line::raw("  j/k or Up/Down      Scroll"),
        Line::raw("  Space / b           Page down / up"),
        Line::raw("  Ctrl-d / Ctrl-u     Half page"),
        Line::raw("  g / G               Top / bottom"),
        Line::raw("  ] / [               Next / previous section"),
        Line::raw(""),
        Line::styled("Sections", section_style),
        Line::raw("  n or Enter          Show/hide notes of current section"),
        Line::raw("  N                   Show/hide notes everywhere"),
        Line::raw("  click [+] / [-]     Show/hide notes"),
        Line::raw(""),
        Line::styled("Panes", section_style),
        Line::raw("  t                   Toggle contents"),
        Line::raw("  Tab                 Switch focus"),
        Line::raw("  w                   Toggle witnesses"),
        Line::raw("  d                   Toggle light/dark theme"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  q / Ctrl-c          Quit"),
        Line::raw("  ? / F1              Toggle help"),
        Line::raw(""),
        Line::styled("Config", section_style),
        Line::raw(format!("  Global: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
    ];
    lines.truncate(popup.height.saturating_sub(4) as usize);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(palette.status());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
