//! HTML serialization of the element tree.

use std::fmt::Write;

use super::{Element, Node, RAW_TEXT_ELEMENTS, VOID_ELEMENTS};

/// Serialize a node to HTML text.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Append the HTML of `node` to `out`.
pub fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(el) => write_element(out, el),
    }
}

fn write_element(out: &mut String, el: &Element) {
    let _ = write!(out, "<{}", el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    out.push('>');
    let tag = el.tag.as_str();
    if VOID_ELEMENTS.contains(&tag) {
        return;
    }
    if RAW_TEXT_ELEMENTS.contains(&tag) {
        out.push_str(&el.text_content());
    } else {
        for child in &el.children {
            write_node(out, child);
        }
    }
    let _ = write!(out, "</{}>", el.tag);
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_with_attributes_and_text() {
        let el = Element::new("a")
            .with_attr("href", "#sec-1")
            .with_text("1 & 2");
        assert_eq!(to_html(&Node::Element(el)), r##"<a href="#sec-1">1 &amp; 2</a>"##);
    }

    #[test]
    fn test_attribute_quotes_are_escaped() {
        let el = Element::new("span").with_attr("title", r#"say "λόγος""#);
        assert_eq!(
            to_html(&el.into()),
            r#"<span title="say &quot;λόγος&quot;"></span>"#
        );
    }

    #[test]
    fn test_void_element_has_no_end_tag() {
        let el = Element::new("p")
            .with_text("a")
            .with_child(Element::new("br"))
            .with_text("b");
        assert_eq!(to_html(&el.into()), "<p>a<br>b</p>");
    }

    #[test]
    fn test_every_void_element_serializes_without_end_tag() {
        for tag in VOID_ELEMENTS {
            let html = to_html(&Element::new(*tag).into());
            assert_eq!(html, format!("<{tag}>"));
        }
    }

    #[test]
    fn test_style_text_is_not_escaped() {
        let el = Element::new("style").with_text(".row > .col { gap: 1rem; }");
        assert_eq!(to_html(&el.into()), "<style>.row > .col { gap: 1rem; }</style>");
        let el = Element::new("p").with_text("a > b");
        assert_eq!(to_html(&el.into()), "<p>a &gt; b</p>");
    }
}
