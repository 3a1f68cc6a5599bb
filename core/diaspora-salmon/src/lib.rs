//! Salmon protocol for diaspora federation.
//!
//! - [`MagicEnvelope`]: signs an entity's XML (optionally AES-encrypted) and
//!   verifies it again on receipt
//! - [`Slap`]: public message, envelope plus the author in a plain header
//! - [`EncryptedSlap`]: private message, the header (author and the
//!   envelope's cipher params) encrypted for a single recipient
//!
//! ```text
//! send:    Entity ─► payload ─[encrypt]─► sign ─► <me:env> ─► slap XML
//! receive: slap XML ─► <me:env> ─► verify ─[decrypt]─► Entity
//! ```

mod encoding;
mod encrypted_slap;
mod error;
mod magic_envelope;
mod slap;

pub use encrypted_slap::EncryptedSlap;
pub use error::{SalmonError, SalmonResult};
pub use magic_envelope::{signature_subject, MagicEnvelope, ALGORITHM, ENCODING, XMLNS};
pub use slap::{Slap, DIASPORA_XMLNS};
