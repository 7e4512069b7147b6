use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::*;
use crate::app::{App, Message, Model, update};
use crate::payload::{Division, DocumentPayload, Meta, PayloadSource};

fn payload() -> DocumentPayload {
    DocumentPayload {
        meta: Meta {
            title: "Hymn to Demeter".into(),
            author: "Anonymous".into(),
            witnesses: Vec::new(),
            generated_from: "demeter.xml".into(),
        },
        divs: vec![
            Division {
                n: "1".into(),
                kind: "verse".into(),
                html: r#"<p lang="grc">Δήμητρ᾽ ἠύκομον</p><p lang="en">Of fair-haired Demeter</p>"#
                    .into(),
                commentary_html: "<p>Proem.</p>".into(),
                apparatus_html: String::new(),
            },
            Division {
                n: "2".into(),
                kind: "verse".into(),
                html: "<p>untranslated</p>".into(),
                ..Division::default()
            },
        ],
    }
}

fn create_test_model() -> Model {
    App::new(
        PayloadSource::default()
            .with_embedded(Some(payload()))
            .with_env_override(false),
    )
    .prepare_model((100, 30))
}

fn draw(model: &Model) -> String {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_shows_masthead_and_both_columns() {
    let screen = draw(&create_test_model());
    assert!(screen.contains("Hymn to Demeter"));
    assert!(screen.contains("Anonymous"));
    assert!(screen.contains("Of fair-haired"));
    assert!(screen.contains("untranslated"));
}

#[test]
fn test_render_shows_toc_entries() {
    let screen = draw(&create_test_model());
    assert!(screen.contains("Contents"));
    assert!(screen.contains("> 1"));
}

#[test]
fn test_render_shows_fallback_witnesses() {
    let screen = draw(&create_test_model());
    assert!(screen.contains("Witnesses"));
    assert!(screen.contains("AI (ed.)"));
}

#[test]
fn test_render_shows_notes_control_and_expanded_notes() {
    let model = create_test_model();
    let screen = draw(&model);
    assert!(screen.contains("[+] Show notes"));
    assert!(!screen.contains("Proem."));

    let model = update(model, Message::ToggleNotesAt(0));
    let screen = draw(&model);
    assert!(screen.contains("[-] Hide notes"));
    assert!(screen.contains("Commentary"));
    assert!(screen.contains("Proem."));
}

#[test]
fn test_status_bar_names_active_section_and_theme() {
    let screen = draw(&create_test_model());
    let status = screen.lines().last().unwrap();
    assert!(status.contains("body.json"));
    // Both short sections start in the upper band; the later event wins.
    assert!(status.contains("§ 2"));
    assert!(status.contains("theme:system"));
    assert!(status.contains("from demeter.xml"));
}

#[test]
fn test_help_overlay_lists_bindings() {
    let model = update(create_test_model(), Message::ToggleHelp);
    let screen = draw(&model);
    assert!(screen.contains("Help"));
    assert!(screen.contains("Toggle light/dark theme"));
}

#[test]
fn test_hidden_panes_free_the_columns() {
    let model = update(create_test_model(), Message::ToggleToc);
    let model = update(model, Message::ToggleWitnesses);
    let screen = draw(&model);
    assert!(!screen.contains("Contents"));
    assert!(!screen.contains("Witnesses"));
    assert_eq!(model.layout_width(), 100 - DOCUMENT_LEFT_PADDING);
}

#[test]
fn test_pane_layout_reserves_chrome_rows() {
    let panes = pane_layout(ratatui::layout::Rect::new(0, 0, 100, 30), true, true);
    assert_eq!(panes.masthead.height, 1);
    assert_eq!(panes.status.y, 29);
    assert_eq!(panes.document.height, 28);
    assert_eq!(panes.toc.unwrap().width, 25);
    assert_eq!(panes.witnesses.unwrap().width, WITNESS_PANE_WIDTH);
    assert_eq!(document_viewport_height(30), 28);
}
