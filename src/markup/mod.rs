//! Virtual element tree for edition markup.
//!
//! Rendering builds [`Element`] trees with plain functions; adapters commit
//! them to a surface (HTML text or terminal lines). The [`parse_fragment`]
//! and [`to_html`] pair stands in for a browser's `innerHTML`.

mod node;
mod parse;
mod serialize;

pub use node::{Element, Node};
pub use parse::parse_fragment;
pub use serialize::{escape_attr, escape_text, to_html, write_node};

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];
