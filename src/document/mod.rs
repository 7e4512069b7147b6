//! Terminal layout of a rendered page.
//!
//! This module turns the page's element tree into wrapped display lines:
//! - Section headings and annotation controls
//! - Bilingual rows laid out as two columns
//! - Commentary and apparatus, only while a section is expanded

mod layout;
mod types;

pub use layout::{COLUMN_GAP, layout_page, wrap_text};
pub use types::{Document, LineSpan, LineType, RenderedLine};
