//! Commands behind the `diaspora-salmon` binary.
//!
//! Each command works on PEM and XML text so it can be driven from files,
//! pipes or tests alike.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use diaspora_crypto::{CipherParams, PrivateKey, PublicKey};
use diaspora_entities::Entity;
use diaspora_salmon::{EncryptedSlap, MagicEnvelope, Slap};
use diaspora_types::Element;
use tracing::{debug, info};

/// A PEM encoded RSA key pair.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_pem: String,
    pub public_pem: String,
}

pub fn generate_keys(bits: usize) -> Result<KeyPair> {
    let key = PrivateKey::generate(bits).context("Failed to generate key")?;
    Ok(KeyPair {
        private_pem: key.to_pem()?,
        public_pem: key.public_key().to_pem()?,
    })
}

/// Writes the private key to `path` and the public key next to it with a
/// `.pub` extension. Returns the public key path.
pub fn write_keys(keys: &KeyPair, path: &Path) -> Result<PathBuf> {
    let public_path = path.with_extension("pub");
    fs::write(path, &keys.private_pem)
        .with_context(|| format!("Failed to write private key to {}", path.display()))?;
    fs::write(&public_path, &keys.public_pem)
        .with_context(|| format!("Failed to write public key to {}", public_path.display()))?;
    info!("Wrote key pair to {:?} and {:?}", path, public_path);
    Ok(public_path)
}

pub fn read_private_key(path: &Path) -> Result<PrivateKey> {
    let pem = read(path)?;
    PrivateKey::from_pem(&pem).with_context(|| format!("{} is not a private key", path.display()))
}

/// Reads a public key, or derives it from a private key file.
pub fn read_public_key(path: &Path) -> Result<PublicKey> {
    let pem = read(path)?;
    PublicKey::from_pem(&pem)
        .or_else(|_| PrivateKey::from_pem(&pem).map(|key| key.public_key()))
        .with_context(|| format!("{} is not an RSA key", path.display()))
}

pub fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Output of [`sign`].
#[derive(Debug, Clone)]
pub struct Signed {
    pub envelope: String,
    /// Cipher params as JSON, when the payload was encrypted.
    pub params: Option<String>,
}

/// Wraps the entity XML in a signed Magic Envelope.
pub fn sign(key: &PrivateKey, entity_xml: &str, encrypt: bool) -> Result<Signed> {
    let entity = Entity::parse_xml(entity_xml).context("Failed to parse entity")?;
    let mut envelope = MagicEnvelope::new(key, &entity)?;
    let params = if encrypt {
        Some(envelope.encrypt()?.to_json()?)
    } else {
        None
    };
    debug!(kind = %entity.kind(), encrypted = encrypt, "Signed entity");
    Ok(Signed {
        envelope: envelope.envelop()?.to_xml()?,
        params,
    })
}

/// Checks an envelope's signature and returns its entity.
pub fn verify(key: &PublicKey, envelope_xml: &str, params_json: Option<&str>) -> Result<Entity> {
    let params = params_json
        .map(CipherParams::from_json)
        .transpose()
        .context("Failed to parse cipher params")?;
    let envelope = Element::parse(envelope_xml).context("Failed to parse envelope")?;
    let entity = MagicEnvelope::unenvelop(&envelope, key, params.as_ref())?;
    Ok(entity)
}

/// Builds a public slap, or a private one when `recipient` is given.
pub fn slap(
    author: &str,
    key: &PrivateKey,
    entity_xml: &str,
    recipient: Option<&PublicKey>,
) -> Result<String> {
    let entity = Entity::parse_xml(entity_xml).context("Failed to parse entity")?;
    let xml = match recipient {
        Some(recipient) => EncryptedSlap::generate_xml(author, key, &entity, recipient)?,
        None => Slap::generate_xml(author, key, &entity)?,
    };
    Ok(xml)
}

/// Opens a slap and verifies it against the author's key. Private slaps
/// need the recipient's key.
pub fn open(
    author_key: &PublicKey,
    slap_xml: &str,
    recipient_key: Option<&PrivateKey>,
) -> Result<(String, Entity)> {
    match recipient_key {
        Some(recipient_key) => {
            let slap = EncryptedSlap::from_xml(slap_xml, recipient_key)?;
            let entity = slap.entity(author_key)?;
            Ok((slap.author_id().to_string(), entity))
        }
        None => {
            let slap = Slap::from_xml(slap_xml)?;
            let entity = slap.entity(author_key)?;
            Ok((slap.author_id().to_string(), entity))
        }
    }
}
