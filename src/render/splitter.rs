//! Bilingual column split of a division's markup.

use crate::markup::{Element, Node, parse_fragment};

/// Language tag of source-text paragraphs.
pub const SOURCE_LANG: &str = "grc";
/// Language tag of translation paragraphs.
pub const TRANSLATION_LANG: &str = "en";

/// Build the main content of a division.
///
/// Without any translation paragraph the parsed markup is returned as-is in
/// a `div.single`. Otherwise source paragraphs go to the left column and
/// translation paragraphs to the right, each in document order. Anything
/// else in the markup is not carried into the columns.
pub fn split_bilingual(markup: &str) -> Element {
    let fragment = parse_fragment(markup);

    let mut source = Vec::new();
    let mut translation = Vec::new();
    for node in &fragment {
        collect_paragraphs(node, &mut source, &mut translation);
    }

    if translation.is_empty() {
        return Element::new("div")
            .with_class("single")
            .with_children(fragment);
    }

    let left = Element::new("div")
        .with_class(format!("col col-{SOURCE_LANG}"))
        .with_attr("lang", SOURCE_LANG)
        .with_children(source.into_iter().map(Node::Element));
    let right = Element::new("div")
        .with_class(format!("col col-{TRANSLATION_LANG}"))
        .with_attr("lang", TRANSLATION_LANG)
        .with_children(translation.into_iter().map(Node::Element));
    Element::new("div")
        .with_class("row bilingual")
        .with_child(left)
        .with_child(right)
}

fn collect_paragraphs(node: &Node, source: &mut Vec<Element>, translation: &mut Vec<Element>) {
    let Node::Element(el) = node else {
        return;
    };
    if el.tag == "p" {
        match el.attr("lang") {
            Some(SOURCE_LANG) => {
                source.push(el.clone());
                return;
            }
            Some(TRANSLATION_LANG) => {
                translation.push(el.clone());
                return;
            }
            _ => {}
        }
    }
    for child in &el.children {
        collect_paragraphs(child, source, translation);
    }
}
