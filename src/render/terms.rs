//! Hover titles for glossed terms.

use crate::markup::Element;

/// Attributes consulted for a term's title, in order.
const TITLE_SOURCES: &[&str] = &["data-key", "data-ref", "data-ana", "data-ident", "data-n"];

/// Give every `.term` element without a `title` one taken from its data
/// attributes. Returns how many elements were enriched.
pub fn enrich_term_titles(root: &mut Element) -> usize {
    let mut enriched = 0;
    root.for_each_mut(&mut |el| {
        if !el.has_class("term") || el.attr("title").is_some() {
            return;
        }
        if let Some(title) = term_title(el) {
            el.set_attr("title", title);
            enriched += 1;
        }
    });
    enriched
}

fn term_title(el: &Element) -> Option<String> {
    TITLE_SOURCES.iter().find_map(|name| {
        let value = el.attr(name)?.trim().trim_start_matches('#').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
