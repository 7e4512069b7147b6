//! Edition payload: data model and loading.
//!
//! The payload is produced ahead of time from a TEI source and read here
//! exactly once per run.

mod loader;
mod types;

pub use loader::{
    DEFAULT_PAYLOAD_PATH, EMBEDDED_PAYLOAD_ENV, LoadError, PayloadSource, load_payload,
    parse_payload,
};
pub use types::{Division, DocumentPayload, Meta, Witness};
