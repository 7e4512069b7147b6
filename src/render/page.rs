//! The page shell: fixed-id containers the renderer writes into, and the
//! HTML document writer.

use crate::markup::{Element, Node, to_html};
use crate::payload::LoadError;
use crate::theme::{THEME_ATTRIBUTE, ThemeMode};

pub const TITLE_ID: &str = "doc-title";
pub const AUTHOR_ID: &str = "doc-author";
pub const TOC_ID: &str = "toc";
pub const CONTENT_ID: &str = "content";
pub const SIDEBAR_ID: &str = "sidebar";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";

/// Shown under a load failure.
pub const STATIC_SERVER_HINT: &str = "Serve the edition files through a local static server \
     (for example `python3 -m http.server` in the edition directory) or pass the payload path \
     on the command line.";

const STYLESHEET: &str = include_str!("page.css");
/// Drives the notes controls, the theme control and TOC highlighting in a
/// browser.
const SCRIPT: &str = include_str!("page.js");

/// The page's containers. Title, author, TOC and main always exist; the
/// sidebar and the theme control are optional and skipped when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Element,
    pub author: Element,
    pub toc: Element,
    pub main: Element,
    pub sidebar: Option<Element>,
    pub theme_toggle: Option<Element>,
    /// Footer note naming the payload's source file.
    pub provenance: Option<String>,
    theme: ThemeMode,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            title: Element::new("h1").with_id(TITLE_ID),
            author: Element::new("p").with_id(AUTHOR_ID).with_class("author"),
            toc: Element::new("ul").with_id(TOC_ID),
            main: Element::new("main").with_id(CONTENT_ID),
            sidebar: Some(Element::new("aside").with_id(SIDEBAR_ID)),
            theme_toggle: Some(
                Element::new("button")
                    .with_id(THEME_TOGGLE_ID)
                    .with_attr("type", "button")
                    .with_attr("aria-label", "Toggle light/dark theme")
                    .with_attr("aria-pressed", "false")
                    .with_text(ThemeMode::Unset.label()),
            ),
            provenance: None,
            theme: ThemeMode::Unset,
        }
    }

    #[must_use]
    pub fn without_sidebar(mut self) -> Self {
        self.sidebar = None;
        self
    }

    #[must_use]
    pub fn without_theme_toggle(mut self) -> Self {
        self.theme_toggle = None;
        self
    }

    pub const fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Set the root theme attribute and refresh the control, if any.
    pub fn apply_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
        if let Some(control) = self.theme_toggle.as_mut() {
            let pressed = if mode == ThemeMode::Dark { "true" } else { "false" };
            control.set_attr("aria-pressed", pressed);
            control.set_text(mode.label());
        }
    }

    /// Number of sections currently in the main area.
    pub fn section_count(&self) -> usize {
        self.main.child_elements().filter(|el| el.tag == "section").count()
    }

    /// The `index`-th section of the main area.
    pub fn section(&self, index: usize) -> Option<&Element> {
        self.main
            .child_elements()
            .filter(|el| el.tag == "section")
            .nth(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.main
            .children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .filter(|el| el.tag == "section")
            .nth(index)
    }

    /// Replace the main area with a load failure message.
    pub fn show_load_error(&mut self, err: &LoadError) {
        self.main.clear();
        self.main.push(
            Element::new("div")
                .with_class("load-error")
                .with_attr("role", "alert")
                .with_child(Element::new("h2").with_text("The edition could not be loaded"))
                .with_child(Element::new("p").with_class("reason").with_text(err.to_string()))
                .with_child(Element::new("p").with_class("hint").with_text(STATIC_SERVER_HINT)),
        );
    }

    /// Serialize the whole page as a standalone HTML document.
    pub fn to_html(&self) -> String {
        let mut root = Element::new("html").with_attr("lang", "en");
        if let Some(value) = self.theme.attribute() {
            root.set_attr(THEME_ATTRIBUTE, value);
        }

        let title_text = self.title.text_content();
        let head = Element::new("head")
            .with_child(Element::new("meta").with_attr("charset", "utf-8"))
            .with_child(
                Element::new("meta")
                    .with_attr("name", "viewport")
                    .with_attr("content", "width=device-width, initial-scale=1"),
            )
            .with_child(Element::new("title").with_text(if title_text.is_empty() {
                "Edition".to_string()
            } else {
                title_text
            }))
            .with_child(Element::new("style").with_text(STYLESHEET));

        let mut masthead = Element::new("header")
            .with_class("masthead")
            .with_child(
                Element::new("div")
                    .with_class("titles")
                    .with_child(self.title.clone())
                    .with_child(self.author.clone()),
            );
        if let Some(control) = &self.theme_toggle {
            masthead.push(control.clone());
        }

        let mut layout = Element::new("div")
            .with_class("layout")
            .with_child(
                Element::new("nav")
                    .with_class("toc-pane")
                    .with_attr("aria-label", "Contents")
                    .with_child(self.toc.clone()),
            )
            .with_child(self.main.clone());
        if let Some(sidebar) = &self.sidebar {
            layout.push(sidebar.clone());
        }

        let mut body = Element::new("body").with_child(masthead).with_child(layout);
        if let Some(source) = self.provenance.as_deref().filter(|s| !s.is_empty()) {
            body.push(
                Element::new("footer")
                    .with_class("provenance")
                    .with_text(format!("Generated from {source}")),
            );
        }

        body.push(Element::new("script").with_text(SCRIPT));

        root.push(head);
        root.push(body);
        format!("<!DOCTYPE html>\n{}\n", to_html(&Node::Element(root)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_carries_fixed_ids() {
        let html = Page::new().to_html();
        for id in [TITLE_ID, AUTHOR_ID, TOC_ID, CONTENT_ID, SIDEBAR_ID, THEME_TOGGLE_ID] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
    }

    #[test]
    fn test_optional_containers_can_be_absent() {
        let html = Page::new().without_sidebar().without_theme_toggle().to_html();
        assert!(!html.contains(SIDEBAR_ID));
        assert!(!html.contains(THEME_TOGGLE_ID));
    }

    #[test]
    fn test_theme_attribute_only_for_explicit_choice() {
        let mut page = Page::new();
        assert!(page.to_html().contains("<html lang=\"en\"><head>"));
        page.apply_theme(ThemeMode::Dark);
        assert!(page.to_html().contains(r#"<html lang="en" data-theme="dark">"#));
        assert_eq!(
            page.theme_toggle.as_ref().unwrap().attr("aria-pressed"),
            Some("true")
        );
    }

    #[test]
    fn test_load_error_replaces_main_with_reason_and_hint() {
        let mut page = Page::new();
        page.main.push(Element::new("section").with_text("old"));
        let err = crate::payload::load_payload(
            &crate::payload::PayloadSource::from_path("/nonexistent/body.json")
                .with_env_override(false),
        )
        .unwrap_err();
        page.show_load_error(&err);

        let text = page.main.text_content();
        assert!(!text.contains("old"));
        assert!(text.contains("body.json"));
        assert!(text.contains("static server"));
        assert_eq!(page.section_count(), 0);
    }

    #[test]
    fn test_style_and_script_are_written_raw() {
        let html = Page::new().to_html();
        assert!(html.contains(":root:not([data-theme=\"light\"])"));
        assert!(html.contains(r##"document.querySelectorAll('#toc a[href^="#"]')"##));
        assert!(html.contains("window.localStorage.setItem(\"theme\", next)"));
        assert!(html.contains(r#"section.classList.toggle("show-notes")"#));
    }

    #[test]
    fn test_provenance_footer() {
        let mut page = Page::new();
        page.provenance = Some("hymn.xml".into());
        assert!(page.to_html().contains("Generated from hymn.xml"));
    }
}
