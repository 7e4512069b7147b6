// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderedEdition)
    clippy::module_name_repetitions
)]

//! # Lectio
//!
//! A reader for bilingual critical editions.
//!
//! Lectio takes a pre-parsed edition payload (divisions with Greek and
//! English paragraphs, commentary, apparatus criticus, witness sigla) and
//! renders it into a page with:
//! - A table of contents that follows the section in view
//! - Two-column source/translation rows
//! - Collapsible commentary and apparatus per section
//! - A witness card and a persisted light/dark theme
//!
//! The page is a plain element tree. It is either written out as a
//! standalone HTML file ([`export`]) or browsed in the terminal ([`app`]).
//!
//! ## Architecture
//!
//! The terminal viewer uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`payload`]: Payload types and loading
//! - [`markup`]: Element tree, fragment parser and HTML writer
//! - [`render`]: Payload to page rendering
//! - [`annotations`]: Per-section notes toggle
//! - [`tracker`]: Active TOC entry tracking
//! - [`theme`]: Theme toggle and preference storage
//! - [`document`]: Page to display lines
//! - [`app`]: Terminal viewer state and event loop
//! - [`ui`]: Terminal UI components

pub mod annotations;
pub mod app;
pub mod config;
pub mod document;
pub mod export;
pub mod markup;
pub mod payload;
pub mod perf;
pub mod render;
pub mod theme;
pub mod tracker;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::payload::{DocumentPayload, LoadError, PayloadSource, load_payload};
    pub use crate::render::{Page, RenderedEdition, render_document};
    pub use crate::theme::{PreferenceStore, ThemeMode};
    pub use crate::ui::viewport::Viewport;
}
