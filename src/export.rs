//! Standalone HTML snapshot of an edition.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::annotations::AnnotationState;
use crate::payload::{PayloadSource, load_payload};
use crate::render::{Page, render_document, render_load_failure};
use crate::theme::{PreferenceStore, ThemeToggle};
use crate::tracker::{VisibilityEvent, VisibilitySource, first_visible_in_document_order};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Keep the sidebar with the witness card.
    pub witnesses: bool,
    /// Write every section with its notes open.
    pub expand_all: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            witnesses: true,
            expand_all: false,
        }
    }
}

/// A snapshot has no scrolling: every observed section counts as on
/// screen.
#[derive(Debug, Default)]
struct Snapshot {
    observed: Vec<String>,
}

impl VisibilitySource for Snapshot {
    fn observe(&mut self, section_id: &str) {
        self.observed.push(section_id.to_string());
    }

    fn unobserve(&mut self, section_id: &str) {
        self.observed.retain(|id| id != section_id);
    }
}

/// Render the payload from `source` and write the page to `out`. Returns
/// the number of sections written.
///
/// # Errors
///
/// Fails when the payload cannot be loaded (the error page is still
/// written to `out`) or when `out` cannot be written.
pub fn export_html(
    source: &PayloadSource,
    out: &Path,
    options: ExportOptions,
    prefs: &dyn PreferenceStore,
) -> Result<usize> {
    let _scope = crate::perf::scope("export.html");
    let mut page = Page::new();
    if !options.witnesses {
        page = page.without_sidebar();
    }

    let payload = match load_payload(source) {
        Ok(payload) => payload,
        Err(err) => {
            render_load_failure(&mut page, &err);
            page.apply_theme(ThemeToggle::init(prefs).mode());
            write_page(&page, out)?;
            return Err(err).context("Export wrote the error page only");
        }
    };

    let mut snapshot = Snapshot::default();
    let mut edition = render_document(&payload, page, &mut snapshot, prefs);
    if options.expand_all {
        edition.set_all_annotations(AnnotationState::Expanded);
    }

    let visible: HashSet<&str> = snapshot.observed.iter().map(String::as_str).collect();
    if let Some(first) = first_visible_in_document_order(edition.tracker.links(), &visible) {
        let event = VisibilityEvent {
            section_id: first.section_id.clone(),
            is_intersecting: true,
            ratio: 1.0,
        };
        edition.handle_visibility(&[event]);
    }

    write_page(&edition.page, out)?;
    tracing::info!(path = %out.display(), sections = edition.sections.len(), "edition exported");
    Ok(edition.sections.len())
}

fn write_page(page: &Page, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(out, page.to_html()).with_context(|| format!("Failed to write {}", out.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{Division, DocumentPayload, Meta};
    use crate::theme::{MemoryPreferenceStore, THEME_STORAGE_KEY};
    use tempfile::tempdir;

    fn source() -> PayloadSource {
        let payload = DocumentPayload {
            meta: Meta {
                title: "Odes".into(),
                ..Meta::default()
            },
            divs: vec![
                Division {
                    n: "1".into(),
                    html: r#"<p lang="grc">a</p><p lang="en">b</p>"#.into(),
                    commentary_html: "<p>gloss</p>".into(),
                    ..Division::default()
                },
                Division {
                    n: "2".into(),
                    html: "<p>c</p>".into(),
                    ..Division::default()
                },
            ],
        };
        PayloadSource::default()
            .with_embedded(Some(payload))
            .with_env_override(false)
    }

    #[test]
    fn test_export_writes_page_with_first_section_active() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("site/index.html");
        let written = export_html(
            &source(),
            &out,
            ExportOptions::default(),
            &MemoryPreferenceStore::default(),
        )
        .unwrap();
        assert_eq!(written, 2);

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="sec-1""#));
        assert!(html.contains(r##"<a href="#sec-1" data-section="sec-1" class="active">"##));
        assert!(!html.contains(r#"class="active">2"#));
        assert!(html.contains(r#"id="sidebar""#));
    }

    #[test]
    fn test_export_respects_options_and_theme() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("index.html");
        let mut prefs = MemoryPreferenceStore::default();
        prefs.set(THEME_STORAGE_KEY, "light").unwrap();
        let options = ExportOptions {
            witnesses: false,
            expand_all: true,
        };
        export_html(&source(), &out, options, &prefs).unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains(r#"<html lang="en" data-theme="light">"#));
        assert!(!html.contains(r#"id="sidebar""#));
        assert!(html.contains(r#"class="division show-notes""#));
    }

    #[test]
    fn test_collapsed_export_ships_script_for_controls() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("index.html");
        export_html(
            &source(),
            &out,
            ExportOptions::default(),
            &MemoryPreferenceStore::default(),
        )
        .unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains(r#"class="notes-toggle""#));
        let script_start = html.find("<script>").unwrap();
        let script_end = html.find("</script>").unwrap();
        assert!(script_start < script_end);
        let script = &html[script_start..script_end];
        assert!(script.contains(r#"querySelectorAll(".notes-toggle")"#));
        assert!(script.contains(r#"getElementById("theme-toggle")"#));
        assert!(script.contains(r#"localStorage.getItem("theme")"#));
    }

    #[test]
    fn test_failed_load_still_writes_error_page() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("index.html");
        let missing = PayloadSource::from_path(dir.path().join("nope.json")).with_env_override(false);
        let err = export_html(
            &missing,
            &out,
            ExportOptions::default(),
            &MemoryPreferenceStore::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load"));

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains(r#"class="load-error""#));
        assert!(html.contains("static server"));
    }
}
