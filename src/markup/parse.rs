//! Lenient HTML fragment parsing on top of the quick-xml tokenizer.
//!
//! Division markup is producer-generated and close to XHTML, but it is not
//! trusted to be well formed. Unmatched end tags are dropped, void elements
//! close themselves, unknown entities stay literal and an unreadable tail is
//! kept as text.

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{Element, Node, VOID_ELEMENTS};

/// Start tags that close an open `p`, as an HTML parser would.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Parse a markup fragment into a detached list of nodes.
pub fn parse_fragment(markup: &str) -> Vec<Node> {
    let mut reader = Reader::from_reader(markup.as_bytes());
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;

    let mut buf = Vec::with_capacity(64);
    let mut root = Element::new("#fragment");
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let el = element_from_start(&reader, &e);
                close_implied_paragraph(&mut root, &mut stack, &el.tag);
                if is_void(&el.tag) {
                    append(&mut root, &mut stack, Node::Element(el));
                } else {
                    stack.push(el);
                }
            }
            Ok(Event::Empty(e)) => {
                let el = element_from_start(&reader, &e);
                close_implied_paragraph(&mut root, &mut stack, &el.tag);
                append(&mut root, &mut stack, Node::Element(el));
            }
            Ok(Event::End(e)) => {
                let tag = decode_tag_name(&reader, e.name().as_ref());
                close_element(&mut root, &mut stack, &tag);
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .decode()
                    .map_or_else(|_| String::from_utf8_lossy(&e).into_owned(), Cow::into_owned);
                append_text(&mut root, &mut stack, &text);
            }
            Ok(Event::CData(e)) => {
                let text = reader
                    .decoder()
                    .decode(&e)
                    .map_or_else(|_| String::from_utf8_lossy(&e).into_owned(), Cow::into_owned);
                append_text(&mut root, &mut stack, &text);
            }
            Ok(Event::GeneralRef(e)) => {
                let name = e
                    .decode()
                    .map_or_else(|_| String::from_utf8_lossy(&e).into_owned(), Cow::into_owned);
                let entity = format!("&{name};");
                append_text(&mut root, &mut stack, &resolve_entities(&entity));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                let offset = usize::try_from(reader.buffer_position()).unwrap_or(markup.len());
                let tail = markup.get(offset.min(markup.len())..).unwrap_or_default();
                tracing::warn!(%err, offset, "division markup is malformed; keeping tail as text");
                if !tail.is_empty() {
                    append_text(&mut root, &mut stack, tail);
                }
                break;
            }
        }
        buf.clear();
    }

    while let Some(open) = stack.pop() {
        append(&mut root, &mut stack, Node::Element(open));
    }
    root.children
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Resolve XML, HTML5 and character references. Text with an unknown
/// reference is kept as written.
fn resolve_entities(raw: &str) -> String {
    unescape_with(raw, resolve_html5_entity).map_or_else(|_| raw.to_string(), Cow::into_owned)
}

fn close_implied_paragraph(root: &mut Element, stack: &mut Vec<Element>, tag: &str) {
    if CLOSES_PARAGRAPH.contains(&tag) && stack.iter().any(|el| el.tag == "p") {
        close_element(root, stack, "p");
    }
}

fn append(root: &mut Element, stack: &mut [Element], node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.children.push(node),
    }
}

fn append_text(root: &mut Element, stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    let parent = match stack.last_mut() {
        Some(parent) => parent,
        None => root,
    };
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

/// Pop up to and including the nearest open element named `tag`. End tags
/// with no matching open element are dropped.
fn close_element(root: &mut Element, stack: &mut Vec<Element>, tag: &str) {
    let Some(depth) = stack.iter().rposition(|el| el.tag == tag) else {
        return;
    };
    while stack.len() > depth {
        let Some(done) = stack.pop() else {
            break;
        };
        append(root, stack, Node::Element(done));
    }
}

fn decode_tag_name(reader: &Reader<&[u8]>, raw: &[u8]) -> String {
    reader
        .decoder()
        .decode(raw)
        .map_or_else(|_| String::from_utf8_lossy(raw).into_owned(), Cow::into_owned)
        .to_ascii_lowercase()
}

fn element_from_start(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Element {
    let mut el = Element::new(decode_tag_name(reader, e.name().as_ref()));
    for attr in e.html_attributes().flatten() {
        let Ok(key) = reader.decoder().decode(attr.key.as_ref()) else {
            continue;
        };
        let Ok(raw_value) = reader.decoder().decode(&attr.value) else {
            continue;
        };
        let value = resolve_entities(&raw_value);
        el.set_attr(key.to_ascii_lowercase(), value);
    }
    el
}
