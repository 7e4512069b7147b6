//! Payload loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::DocumentPayload;

/// Fixed relative path of the payload next to the viewer.
pub const DEFAULT_PAYLOAD_PATH: &str = "body.json";

/// Environment variable holding a pre-set payload. When present and not
/// `null`, it is used instead of reading the payload file.
pub const EMBEDDED_PAYLOAD_ENV: &str = "LECTIO_PAYLOAD_JSON";

/// The payload could not be obtained.
#[derive(Debug, Error)]
#[error("Failed to load {source_name}: {status}")]
pub struct LoadError {
    /// Where the payload was expected to come from.
    pub source_name: String,
    /// Reason reported by the underlying read or decode step.
    pub status: String,
}

impl LoadError {
    fn new(source_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            status: status.into(),
        }
    }
}

/// Where the payload comes from.
#[derive(Debug, Clone)]
pub struct PayloadSource {
    embedded: Option<DocumentPayload>,
    use_env: bool,
    path: PathBuf,
}

impl Default for PayloadSource {
    fn default() -> Self {
        Self::from_path(DEFAULT_PAYLOAD_PATH)
    }
}

impl PayloadSource {
    /// Read the payload from `path`, unless an embedded payload is set.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            embedded: None,
            use_env: true,
            path: path.into(),
        }
    }

    /// Use an in-memory payload instead of reading anything.
    pub fn with_embedded(mut self, payload: Option<DocumentPayload>) -> Self {
        self.embedded = payload;
        self
    }

    /// Enable or disable the `LECTIO_PAYLOAD_JSON` override.
    pub const fn with_env_override(mut self, enabled: bool) -> Self {
        self.use_env = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Load the payload from `source`.
///
/// Resolution order: embedded payload, `LECTIO_PAYLOAD_JSON`, file. The
/// file is read from disk on every call.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read or does not decode.
pub fn load_payload(source: &PayloadSource) -> Result<DocumentPayload, LoadError> {
    let preset = source
        .use_env
        .then(|| std::env::var_os(EMBEDDED_PAYLOAD_ENV))
        .flatten()
        .map(|raw| raw.to_string_lossy().into_owned());
    load_with_preset(source, preset.as_deref())
}

/// Resolution behind [`load_payload`], with the environment value passed in.
fn load_with_preset(
    source: &PayloadSource,
    preset: Option<&str>,
) -> Result<DocumentPayload, LoadError> {
    if let Some(payload) = &source.embedded {
        tracing::debug!("using embedded payload");
        return Ok(payload.clone());
    }
    if let Some(raw) = preset
        && !is_null_payload(raw)
    {
        tracing::debug!("using payload from {EMBEDDED_PAYLOAD_ENV}");
        return parse_payload(raw).map_err(|err| LoadError::new(EMBEDDED_PAYLOAD_ENV, err));
    }

    let name = source.path.display().to_string();
    let bytes = std::fs::read(&source.path).map_err(|err| LoadError::new(&name, err.to_string()))?;
    let text = String::from_utf8_lossy(&bytes);
    let payload = parse_payload(&text).map_err(|err| LoadError::new(&name, err))?;
    tracing::info!(path = %name, divisions = payload.divs.len(), "payload loaded");
    Ok(payload)
}

/// Decode a payload from JSON text. The error is the decoder's status text.
///
/// # Errors
///
/// Returns the decoder message when `text` is not a payload object.
pub fn parse_payload(text: &str) -> Result<DocumentPayload, String> {
    serde_json::from_str(text).map_err(|err| err.to_string())
}

fn is_null_payload(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "null"
}
