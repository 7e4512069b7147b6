//! Light/dark preference.
//!
//! The mode is a small value; persistence goes through a [`PreferenceStore`]
//! so the toggle logic stays testable without touching the filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key under which the explicit choice is stored.
pub const THEME_STORAGE_KEY: &str = "theme";
/// Root attribute carrying an explicit choice.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    /// No explicit choice: follow the system.
    #[default]
    Unset,
    Light,
    Dark,
}

impl ThemeMode {
    /// Read a stored value. Anything but `light`/`dark` means unset.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            _ => Self::Unset,
        }
    }

    /// Value of the root attribute; `None` removes it.
    pub const fn attribute(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Light => Some("light"),
            Self::Dark => Some("dark"),
        }
    }

    /// Next mode on activation. The toggle never returns to `Unset`.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light | Self::Unset => Self::Dark,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unset => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Key/value persistence for viewer preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error when the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as `key=value` lines in a file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Vec<(String, String)> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all()
            .into_iter()
            .rev()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all();
        entries.retain(|(k, _)| k != key);
        entries.push((key.to_string(), value.to_string()));
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create prefs dir {}", parent.display()))?;
        }
        let body = entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&self.path, format!("{body}\n"))
            .with_context(|| format!("Failed to write prefs {}", self.path.display()))
    }
}

/// The theme toggle control's state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeToggle {
    mode: ThemeMode,
}

impl ThemeToggle {
    /// Restore the stored choice; absence means [`ThemeMode::Unset`].
    pub fn init(store: &dyn PreferenceStore) -> Self {
        let mode = ThemeMode::from_stored(store.get(THEME_STORAGE_KEY).as_deref());
        tracing::debug!(mode = mode.label(), "theme restored");
        Self { mode }
    }

    pub const fn mode(self) -> ThemeMode {
        self.mode
    }

    /// Flip light/dark and persist the new explicit choice.
    ///
    /// A failed write is logged; the new mode still applies for this run.
    pub fn activate(&mut self, store: &mut dyn PreferenceStore) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Some(value) = self.mode.attribute()
            && let Err(err) = store.set(THEME_STORAGE_KEY, value)
        {
            tracing::warn!("theme preference not saved: {err:#}");
        }
        self.mode
    }
}
