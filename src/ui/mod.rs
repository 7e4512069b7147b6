//! Terminal viewer.
//!
//! - [`viewport`]: scroll position of the document pane
//! - [`visibility`]: section visibility derived from the scroll position
//! - [`style`]: per-theme colors

pub mod style;
pub mod viewport;
pub mod visibility;

mod overlays;
mod render;
mod status;

pub use render::{PaneLayout, document_content_width, document_viewport_height, pane_layout, render};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
pub const TOC_WIDTH_PERCENT: u16 = 25;
pub const WITNESS_PANE_WIDTH: u16 = 32;
/// Rows above and below the panes: masthead and status bar.
pub const CHROME_ROWS: u16 = 2;

#[cfg(test)]
mod tests;
