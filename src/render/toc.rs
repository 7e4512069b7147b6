//! Table of contents entries.

use crate::markup::Element;
use crate::payload::Division;

use super::ids::section_id;

/// Class marking the TOC link of the section currently in view.
pub const ACTIVE_CLASS: &str = "active";

/// Pairing of a section id with its TOC anchor. Built once per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocLink {
    pub section_id: String,
    pub label: String,
}

impl TocLink {
    pub fn for_division(div: &Division) -> Self {
        Self {
            section_id: section_id(div),
            label: div.label().to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.section_id)
    }

    /// The `li > a` element for this link.
    pub fn element(&self) -> Element {
        Element::new("li").with_child(
            Element::new("a")
                .with_attr("href", self.href())
                .with_attr("data-section", self.section_id.clone())
                .with_text(self.label.clone()),
        )
    }
}

/// Put the active marker on the `index`-th TOC anchor only.
///
/// Every anchor loses the marker first; `None` leaves nothing active.
pub fn mark_active(toc: &mut Element, index: Option<usize>) {
    let mut position = 0usize;
    toc.for_each_mut(&mut |el| {
        if el.tag != "a" {
            return;
        }
        el.remove_class(ACTIVE_CLASS);
        if index == Some(position) {
            el.add_class(ACTIVE_CLASS);
        }
        position += 1;
    });
}
