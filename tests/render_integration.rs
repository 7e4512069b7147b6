use std::collections::HashSet;

use lectio::annotations::{EXPANDED_CLASS, TOGGLE_CLASS};
use lectio::document::{LineType, layout_page};
use lectio::export::{ExportOptions, export_html};
use lectio::markup::Element;
use lectio::payload::{PayloadSource, load_payload, parse_payload};
use lectio::render::{Page, render_document};
use lectio::theme::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeMode};
use lectio::tracker::VisibilitySource;

const EDITION: &str = r#"{
  "meta": {
    "title": "Περὶ ὕψους",
    "author": "Longinus",
    "witnesses": [
      {"id": "P", "text": "Parisinus graecus 2036"},
      {"id": "AI", "text": "Machine-assisted reconstruction"}
    ],
    "generatedFrom": "longinus.xml"
  },
  "divs": [
    {
      "n": "1.1",
      "type": "section",
      "html": "<p lang=\"grc\">Τὸ μὲν τοῦ Καικιλίου <span class=\"term\" data-key=\"hypsos\">ὕψους</span></p><p lang=\"en\">The treatise of Caecilius</p>",
      "commentaryHtml": "<p>Caecilius of Caleacte.</p>",
      "apparatusHtml": "<p>1 Καικιλίου] Κεκιλίου P</p>"
    },
    {
      "n": "1.2",
      "type": "section",
      "html": "<p>no translation yet</p>",
      "commentaryHtml": null,
      "apparatusHtml": ""
    }
  ]
}"#;

#[derive(Default)]
struct Recorder(Vec<String>);

impl VisibilitySource for Recorder {
    fn observe(&mut self, section_id: &str) {
        self.0.push(section_id.to_string());
    }
    fn unobserve(&mut self, _section_id: &str) {}
}

fn anchors(page: &Page) -> Vec<&Element> {
    page.toc
        .child_elements()
        .flat_map(Element::child_elements)
        .collect()
}

#[test]
fn test_payload_file_renders_full_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("body.json");
    std::fs::write(&path, EDITION).unwrap();

    let payload = load_payload(&PayloadSource::from_path(&path).with_env_override(false)).unwrap();
    let mut recorder = Recorder::default();
    let edition = render_document(
        &payload,
        Page::new(),
        &mut recorder,
        &MemoryPreferenceStore::default(),
    );
    let page = &edition.page;

    assert_eq!(page.title.text_content(), "Περὶ ὕψους");
    assert_eq!(recorder.0, vec!["sec-1.1", "sec-1.2"]);
    let hrefs: Vec<&str> = anchors(page).iter().filter_map(|a| a.attr("href")).collect();
    assert_eq!(hrefs, vec!["#sec-1.1", "#sec-1.2"]);

    let first = page.section(0).unwrap();
    assert!(first.find(&|el| el.has_class(TOGGLE_CLASS)).is_some());
    let term = first.find(&|el| el.has_class("term")).unwrap();
    assert_eq!(term.attr("title"), Some("hypsos"));

    let second = page.section(1).unwrap();
    assert!(second.find(&|el| el.has_class(TOGGLE_CLASS)).is_none());
    assert!(second.find(&|el| el.has_class("single")).is_some());

    let sidebar = page.sidebar.as_ref().unwrap().text_content();
    assert!(sidebar.contains("AI (ed.)"));
    assert!(sidebar.contains("Parisinus graecus 2036"));
}

#[test]
fn test_notes_toggle_round_trip_through_layout() {
    let payload = parse_payload(EDITION).unwrap();
    let mut edition = render_document(
        &payload,
        Page::new(),
        &mut Recorder::default(),
        &MemoryPreferenceStore::default(),
    );
    let collapsed = layout_page(&edition.page, 90);

    edition.toggle_annotations(0);
    assert!(edition.page.section(0).unwrap().has_class(EXPANDED_CLASS));
    let expanded = layout_page(&edition.page, 90);
    let labels: HashSet<String> = (0..expanded.line_count())
        .filter_map(|i| expanded.line_at(i))
        .filter(|l| l.line_type() == LineType::BlockLabel)
        .map(|l| l.content())
        .collect();
    assert!(labels.contains("Commentary"));
    assert!(labels.contains("Apparatus criticus"));

    edition.toggle_annotations(0);
    assert_eq!(layout_page(&edition.page, 90), collapsed);
}

#[test]
fn test_theme_choice_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("prefs");
    let payload = parse_payload(EDITION).unwrap();

    let mut prefs = FilePreferenceStore::new(&prefs_path);
    let mut edition =
        render_document(&payload, Page::new(), &mut Recorder::default(), &prefs);
    assert_eq!(edition.page.theme(), ThemeMode::Unset);
    assert_eq!(edition.toggle_theme(&mut prefs), ThemeMode::Dark);
    assert_eq!(edition.toggle_theme(&mut prefs), ThemeMode::Light);

    let reopened = FilePreferenceStore::new(&prefs_path);
    assert_eq!(reopened.get("theme").as_deref(), Some("light"));
    let edition = render_document(&payload, Page::new(), &mut Recorder::default(), &reopened);
    assert_eq!(edition.page.theme(), ThemeMode::Light);
}

#[test]
fn test_export_matches_page_contract() {
    let dir = tempfile::tempdir().unwrap();
    let body = dir.path().join("body.json");
    let out = dir.path().join("index.html");
    std::fs::write(&body, EDITION).unwrap();

    export_html(
        &PayloadSource::from_path(&body).with_env_override(false),
        &out,
        ExportOptions::default(),
        &MemoryPreferenceStore::default(),
    )
    .unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    for id in ["doc-title", "doc-author", "toc", "content", "sidebar", "theme-toggle"] {
        assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
    }
    assert!(html.contains(r#"lang="grc""#));
    assert!(html.contains("Generated from longinus.xml"));
}

#[test]
fn test_malformed_payload_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let body = dir.path().join("body.json");
    std::fs::write(&body, "{ not json").unwrap();
    let err = load_payload(&PayloadSource::from_path(&body).with_env_override(false)).unwrap_err();
    assert!(err.to_string().starts_with("Failed to load"));
}
