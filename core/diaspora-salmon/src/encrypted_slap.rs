//! Private Salmon messages.
//!
//! The envelope payload is encrypted with fresh cipher params. Those params
//! and the author travel in a header that only the recipient can open:
//!
//! ```text
//! <encrypted_header> = base64(JSON {
//!     "aes_key":    base64(RSA(recipient, JSON {key, iv})),
//!     "ciphertext": base64(AES(header key, <decrypted_header>)),
//! })
//!
//! <decrypted_header>
//!   <iv>..</iv><aes_key>..</aes_key><author_id>..</author_id>
//! </decrypted_header>
//! ```

use diaspora_crypto::{self as crypto, CipherParams, CryptoError, PrivateKey, PublicKey};
use diaspora_entities::Entity;
use diaspora_types::Element;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoding;
use crate::error::{SalmonError, SalmonResult};
use crate::magic_envelope::MagicEnvelope;
use crate::slap::{envelope_of, parse_root, root};

#[derive(Serialize, Deserialize)]
struct WrappedHeader {
    aes_key: String,
    ciphertext: String,
}

/// A private Salmon message, opened with the recipient's key.
#[derive(Debug, Clone)]
pub struct EncryptedSlap {
    author_id: String,
    cipher_params: CipherParams,
    envelope: Element,
}

impl EncryptedSlap {
    /// Signs and encrypts `entity`, addressing the header to `recipient`.
    pub fn generate_xml(
        author_id: &str,
        key: &PrivateKey,
        entity: &Entity,
        recipient: &PublicKey,
    ) -> SalmonResult<String> {
        let mut envelope = MagicEnvelope::new(key, entity)?;
        let params = envelope.encrypt()?;
        let envelope = envelope.envelop()?;

        let header = encrypt_header(author_id, &params, recipient)?;
        Ok(root()
            .with_child(Element::new("encrypted_header").with_text(header))
            .with_child(envelope)
            .to_xml()?)
    }

    /// Parses a private slap and decrypts its header with the recipient's key.
    /// The envelope is not verified yet.
    pub fn from_xml(xml: &str, recipient_key: &PrivateKey) -> SalmonResult<Self> {
        let root = parse_root(xml)?;
        let encrypted_header = root
            .child("encrypted_header")
            .map(Element::text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| SalmonError::InvalidSlap("missing encrypted_header".into()))?;

        let header = decrypt_header(encrypted_header, recipient_key)?;
        let author_id = header_field(&header, "author_id")?;
        let cipher_params = CipherParams {
            key: header_field(&header, "aes_key")?,
            iv: header_field(&header, "iv")?,
        };
        let envelope = envelope_of(&root)?;

        debug!(author = %author_id, "Decrypted private slap header");
        Ok(Self {
            author_id,
            cipher_params,
            envelope,
        })
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    /// The params that decrypt the envelope payload.
    pub fn cipher_params(&self) -> &CipherParams {
        &self.cipher_params
    }

    pub fn envelope(&self) -> &Element {
        &self.envelope
    }

    /// Verifies and decrypts the envelope, returning its entity.
    pub fn entity(&self, author_key: &PublicKey) -> SalmonResult<Entity> {
        MagicEnvelope::unenvelop(&self.envelope, author_key, Some(&self.cipher_params))
    }
}

fn encrypt_header(
    author_id: &str,
    params: &CipherParams,
    recipient: &PublicKey,
) -> SalmonResult<String> {
    let header_xml = Element::new("decrypted_header")
        .with_child(Element::new("iv").with_text(params.iv.as_str()))
        .with_child(Element::new("aes_key").with_text(params.key.as_str()))
        .with_child(Element::new("author_id").with_text(author_id))
        .to_xml()?;

    let header_params = CipherParams::generate();
    let ciphertext = crypto::encrypt(&header_params, header_xml.as_bytes())?;
    let wrapped_key = recipient.encrypt(header_params.to_json()?.as_bytes())?;

    let json = serde_json::to_string(&WrappedHeader {
        aes_key: encoding::encode(wrapped_key),
        ciphertext: encoding::encode(ciphertext),
    })
    .map_err(CryptoError::from)?;
    Ok(encoding::encode(json))
}

fn decrypt_header(encrypted_header: &str, recipient_key: &PrivateKey) -> SalmonResult<Element> {
    let json = encoding::decode(encrypted_header)
        .ok_or_else(|| SalmonError::InvalidSlap("encrypted_header is not base64".into()))?;
    let wrapped: WrappedHeader = serde_json::from_slice(&json)
        .map_err(|e| SalmonError::InvalidSlap(format!("encrypted_header: {e}")))?;

    let wrapped_key = encoding::decode(&wrapped.aes_key)
        .ok_or_else(|| SalmonError::InvalidSlap("aes_key is not base64".into()))?;
    let ciphertext = encoding::decode(&wrapped.ciphertext)
        .ok_or_else(|| SalmonError::InvalidSlap("ciphertext is not base64".into()))?;

    let key_json = recipient_key
        .decrypt(&wrapped_key)
        .map_err(SalmonError::Decryption)?;
    let key_json = std::str::from_utf8(&key_json).map_err(|_| {
        SalmonError::Decryption(CryptoError::Decryption("header key is not UTF-8".into()))
    })?;
    let header_params = CipherParams::from_json(key_json).map_err(SalmonError::Decryption)?;

    let plaintext = crypto::decrypt(&header_params, &ciphertext).map_err(SalmonError::Decryption)?;
    let xml = String::from_utf8(plaintext).map_err(|_| {
        SalmonError::Decryption(CryptoError::Decryption("header is not UTF-8".into()))
    })?;
    Ok(Element::parse(&xml)?)
}

fn header_field(header: &Element, name: &str) -> SalmonResult<String> {
    header
        .child(name)
        .map(|field| field.text().trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| SalmonError::InvalidSlap(format!("decrypted header has no {name}")))
}
