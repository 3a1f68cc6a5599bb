//! Core type definitions for diaspora federation.
//!
//! This crate defines the small, protocol-level types shared by every other
//! crate in the workspace:
//! - UTC timestamps with the single canonical wire representation
//! - Diaspora IDs (`user@domain`) and entity GUIDs
//! - A minimal XML element tree used for entity payloads and envelopes
//!
//! Entity schemas, cryptography and the receive pipeline live in their own
//! crates and build on these types.

mod ids;
mod timestamp;
pub mod xml;

pub use ids::{DiasporaId, Guid, GUID_MAX_LENGTH, GUID_MIN_LENGTH};
pub use timestamp::{Timestamp, TIMESTAMP_FORMAT};
pub use xml::{Element, XmlError};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid diaspora ID: {0}")]
    InvalidDiasporaId(String),

    #[error("invalid GUID: {0}")]
    InvalidGuid(String),

    #[error("xml error: {0}")]
    Xml(#[from] XmlError),
}
