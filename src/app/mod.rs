//! Terminal viewer state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::Model;
pub use update::{Message, update};

use std::path::PathBuf;

use crate::annotations::AnnotationState;
use crate::payload::{PayloadSource, load_payload};
use crate::render::{Page, RenderedEdition, render_document, render_load_failure};
use crate::theme::{MemoryPreferenceStore, PreferenceStore, ThemeToggle};
use crate::tracker::ObserverOptions;
use crate::ui::visibility::ViewportObserver;

/// Main application struct that owns the preference store and runs the
/// event loop.
pub struct App {
    source: PayloadSource,
    toc_visible: bool,
    witnesses_visible: bool,
    expand_all: bool,
    prefs: Box<dyn PreferenceStore>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("source", &self.source)
            .field("toc_visible", &self.toc_visible)
            .field("witnesses_visible", &self.witnesses_visible)
            .field("expand_all", &self.expand_all)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create a viewer for the payload at `source`.
    pub fn new(source: PayloadSource) -> Self {
        Self {
            source,
            toc_visible: true,
            witnesses_visible: true,
            expand_all: false,
            prefs: Box::new(MemoryPreferenceStore::default()),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set initial TOC visibility.
    #[must_use]
    pub const fn with_toc_visible(mut self, visible: bool) -> Self {
        self.toc_visible = visible;
        self
    }

    /// Without witnesses the page has no sidebar at all.
    #[must_use]
    pub const fn with_witnesses_visible(mut self, visible: bool) -> Self {
        self.witnesses_visible = visible;
        self
    }

    /// Open every section's notes on load.
    #[must_use]
    pub const fn with_expand_all(mut self, enabled: bool) -> Self {
        self.expand_all = enabled;
        self
    }

    /// Where the theme choice is read from and saved to.
    #[must_use]
    pub fn with_preferences(mut self, prefs: Box<dyn PreferenceStore>) -> Self {
        self.prefs = prefs;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Load and render the payload and build the initial model. A load
    /// failure yields a model showing the error page.
    pub fn prepare_model(&self, terminal_size: (u16, u16)) -> Model {
        let _scope = crate::perf::scope("app.prepare_model");
        let mut page = Page::new();
        if !self.witnesses_visible {
            page = page.without_sidebar();
        }
        let mut observer = ViewportObserver::new(ObserverOptions::default());

        let edition = match load_payload(&self.source) {
            Ok(payload) => {
                let mut edition =
                    render_document(&payload, page, &mut observer, self.prefs.as_ref());
                if self.expand_all {
                    edition.set_all_annotations(AnnotationState::Expanded);
                }
                edition
            }
            Err(err) => {
                render_load_failure(&mut page, &err);
                let theme = ThemeToggle::init(self.prefs.as_ref());
                page.apply_theme(theme.mode());
                RenderedEdition {
                    page,
                    theme,
                    ..RenderedEdition::default()
                }
            }
        };

        let mut model = Model::new(edition, observer, terminal_size)
            .with_source_name(self.source.path().display().to_string())
            .with_toc_visible(self.toc_visible);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }
}
