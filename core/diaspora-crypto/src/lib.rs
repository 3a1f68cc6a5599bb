//! Cryptographic primitives for diaspora federation.
//!
//! - [`PrivateKey`] / [`PublicKey`]: RSA key pairs of people, PEM import and
//!   export, PKCS#1 v1.5 key wrapping
//! - RSA-SHA256 (PKCS#1 v1.5) signatures over arbitrary byte strings
//! - [`CipherParams`]: AES-256-CBC key and IV, generated fresh for every
//!   encrypted payload and transmitted outside the payload itself
//!
//! Nothing in here knows about envelopes or entities; the salmon crate
//! composes these primitives into the wire format.

mod cipher;
mod error;
mod key;
mod signing;

pub use cipher::{decrypt, encrypt, CipherParams, AES_IV_SIZE, AES_KEY_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{PrivateKey, PublicKey, DEFAULT_KEY_BITS};
