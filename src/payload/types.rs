//! Wire types for the edition payload.
//!
//! Every field is optional on the wire. Missing values, `null` and empty
//! strings all read as "absent", and numbers are accepted where a label is
//! expected, so a sloppy producer never turns into a load failure.

use serde::{Deserialize, Deserializer};

/// The complete document as delivered by the payload producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentPayload {
    pub meta: Meta,
    #[serde(deserialize_with = "null_as_default")]
    pub divs: Vec<Division>,
}

/// Header metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub witnesses: Vec<Witness>,
    /// Name of the TEI file the payload was generated from.
    #[serde(deserialize_with = "lenient_string")]
    pub generated_from: String,
}

/// One structural division of the edited text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Division {
    /// Division label, e.g. `1.1`.
    #[serde(deserialize_with = "lenient_string")]
    pub n: String,
    /// Division category, e.g. `verse` or `chapter`.
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_string")]
    pub html: String,
    #[serde(deserialize_with = "lenient_string")]
    pub commentary_html: String,
    #[serde(deserialize_with = "lenient_string")]
    pub apparatus_html: String,
}

impl Division {
    /// Label used for the TOC entry: `n`, else `type`, else empty.
    pub fn label(&self) -> &str {
        if !self.n.is_empty() {
            &self.n
        } else {
            &self.kind
        }
    }

    /// Section heading: `n — type` when both are present.
    pub fn heading(&self) -> String {
        match (self.n.is_empty(), self.kind.is_empty()) {
            (false, false) => format!("{} — {}", self.n, self.kind),
            (false, true) => self.n.clone(),
            (true, false) => self.kind.clone(),
            (true, true) => String::new(),
        }
    }

    pub fn has_commentary(&self) -> bool {
        !self.commentary_html.trim().is_empty()
    }

    pub fn has_apparatus(&self) -> bool {
        !self.apparatus_html.trim().is_empty()
    }

    /// Whether the section gets an annotation toggle.
    pub fn has_annotations(&self) -> bool {
        self.has_commentary() || self.has_apparatus()
    }
}

/// A manuscript witness: siglum plus its expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Witness {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub text: String,
}

impl Witness {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null | serde_json::Value::Bool(false) => String::new(),
        serde_json::Value::String(s) => s,
        // Zero is falsy like null and the empty string.
        serde_json::Value::Number(n) if n.as_f64().is_some_and(|v| v.abs() < f64::EPSILON) => {
            String::new()
        }
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
