//! Content section of one division.

use crate::annotations::AnnotationToggle;
use crate::markup::{Element, parse_fragment};
use crate::payload::Division;

use super::ids::{sanitize, section_id};
use super::splitter::split_bilingual;

pub const COMMENTARY_LABEL: &str = "Commentary";
pub const APPARATUS_LABEL: &str = "Apparatus criticus";

/// A rendered section plus its interactive state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub id: String,
    pub heading: String,
    /// Present only when the division carries commentary or apparatus.
    pub toggle: Option<AnnotationToggle>,
}

/// Build the section element for `div`.
pub fn build_section(div: &Division) -> (SectionView, Element) {
    let id = section_id(div);
    let heading = div.heading();
    let notes_id = format!("{id}-notes");

    let mut class = String::from("division");
    let kind = sanitize(&div.kind);
    if !kind.is_empty() {
        class.push_str(" division-");
        class.push_str(&kind);
    }

    let mut head = Element::new("header")
        .with_class("division-head")
        .with_child(Element::new("h2").with_text(heading.clone()));
    let toggle = div.has_annotations().then(|| {
        head.push(AnnotationToggle::control(&notes_id));
        AnnotationToggle::default()
    });

    let mut section = Element::new("section")
        .with_id(id.clone())
        .with_class(class)
        .with_child(head)
        .with_child(
            Element::new("div")
                .with_class("division-body")
                .with_child(split_bilingual(&div.html)),
        );

    if toggle.is_some() {
        let mut notes = Element::new("div").with_id(notes_id).with_class("annotations");
        if div.has_commentary() {
            notes.push(labeled_block("commentary", COMMENTARY_LABEL, &div.commentary_html));
        }
        if div.has_apparatus() {
            notes.push(labeled_block("apparatus", APPARATUS_LABEL, &div.apparatus_html));
        }
        section.push(notes);
    }

    (SectionView { id, heading, toggle }, section)
}

fn labeled_block(class: &str, label: &str, markup: &str) -> Element {
    Element::new("div")
        .with_class(class)
        .with_child(Element::new("div").with_class("block-label").with_text(label))
        .with_child(
            Element::new("div")
                .with_class("block-body")
                .with_children(parse_fragment(markup)),
        )
}
