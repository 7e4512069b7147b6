use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::style::Palette;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect, palette: &Palette) {
    let percent = model.viewport.scroll_percent();
    let section = model
        .edition
        .tracker
        .active_link()
        .map_or_else(String::new, |link| format!("  § {}", link.label));
    let provenance = model
        .edition
        .page
        .provenance
        .as_deref()
        .map_or_else(String::new, |from| format!("  from {from}"));

    let status = format!(
        " {}  [{percent}%]{section}  theme:{}{provenance}  ?:help",
        model.source_name,
        model.theme().label(),
    );
    frame.render_widget(Paragraph::new(status).style(palette.status()), area);
}
