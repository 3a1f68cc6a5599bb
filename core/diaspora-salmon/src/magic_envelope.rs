//! Magic Envelope.
//!
//! ```xml
//! <me:env xmlns:me="http://salmon-protocol.org/ns/magic-env">
//!   <me:data type="status_message">{base64url payload}</me:data>
//!   <me:encoding>base64url</me:encoding>
//!   <me:alg>RSA-SHA256</me:alg>
//!   <me:sig>{base64url signature}</me:sig>
//! </me:env>
//! ```
//!
//! The payload is the entity's XML fragment, or after [`MagicEnvelope::encrypt`]
//! the standard base64 of its AES-256-CBC ciphertext. The signature covers
//! [`signature_subject`] of the payload and the three metadata fields.

use diaspora_crypto::{self as crypto, CipherParams, CryptoError, PrivateKey, PublicKey};
use diaspora_entities::{Entity, EntityKind};
use diaspora_types::Element;
use tracing::debug;

use crate::encoding;
use crate::error::{SalmonError, SalmonResult};

/// Namespace of the `me:` elements.
pub const XMLNS: &str = "http://salmon-protocol.org/ns/magic-env";

/// The only supported data encoding.
pub const ENCODING: &str = "base64url";

/// The only supported signature algorithm.
pub const ALGORITHM: &str = "RSA-SHA256";

/// An entity being wrapped for sending.
///
/// Single use: [`envelop`](Self::envelop) consumes it.
pub struct MagicEnvelope<'a> {
    key: &'a PrivateKey,
    data_type: &'static str,
    payload: String,
    encrypted: bool,
}

impl<'a> MagicEnvelope<'a> {
    /// Prepares `entity` for signing with the author's `key`.
    pub fn new(key: &'a PrivateKey, entity: &Entity) -> SalmonResult<Self> {
        Ok(Self {
            key,
            data_type: entity.kind().name(),
            payload: entity.to_xml()?,
            encrypted: false,
        })
    }

    /// The current payload: XML, or base64 ciphertext once encrypted.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Encrypts the payload with a fresh AES key and IV.
    ///
    /// The returned params are needed to open the envelope and are not part
    /// of it; the caller transmits them separately.
    pub fn encrypt(&mut self) -> SalmonResult<CipherParams> {
        if self.encrypted {
            return Err(SalmonError::AlreadyEncrypted);
        }

        let params = CipherParams::generate();
        let ciphertext = crypto::encrypt(&params, self.payload.as_bytes())?;
        self.payload = encoding::encode(ciphertext);
        self.encrypted = true;
        Ok(params)
    }

    /// Signs the payload and builds the `me:env` element.
    pub fn envelop(self) -> SalmonResult<Element> {
        let subject = signature_subject(
            self.payload.as_bytes(),
            self.data_type,
            ENCODING,
            ALGORITHM,
        );
        let signature = self.key.sign(subject.as_bytes())?;

        let data = Element::new("me:data")
            .with_attribute("type", self.data_type)
            .with_text(encoding::urlsafe_encode(&self.payload));

        Ok(Element::new("me:env")
            .with_attribute("xmlns:me", XMLNS)
            .with_child(data)
            .with_child(Element::new("me:encoding").with_text(ENCODING))
            .with_child(Element::new("me:alg").with_text(ALGORITHM))
            .with_child(Element::new("me:sig").with_text(encoding::urlsafe_encode(signature))))
    }

    /// Verifies an envelope and returns the entity inside it.
    ///
    /// Checks, in order: structure, signature, encoding, algorithm. With
    /// `params` the payload is decrypted before it is deserialized.
    pub fn unenvelop(
        env: &Element,
        key: &PublicKey,
        params: Option<&CipherParams>,
    ) -> SalmonResult<Entity> {
        let parts = EnvelopeParts::parse(env)?;

        let subject =
            signature_subject(&parts.payload, parts.data_type, parts.encoding, parts.alg);
        let signature =
            encoding::urlsafe_decode(parts.sig).ok_or(SalmonError::InvalidSignature)?;
        key.verify(subject.as_bytes(), &signature)
            .map_err(|_| SalmonError::InvalidSignature)?;

        if parts.encoding != ENCODING {
            return Err(SalmonError::InvalidEncoding(parts.encoding.to_string()));
        }
        if parts.alg != ALGORITHM {
            return Err(SalmonError::InvalidAlgorithm(parts.alg.to_string()));
        }

        let payload = match params {
            Some(params) => decrypt_payload(&parts.payload, params)?,
            None => parts.payload,
        };
        let xml = String::from_utf8(payload)
            .map_err(|_| SalmonError::InvalidEnvelope("payload is not UTF-8".into()))?;

        let kind = EntityKind::from_name(parts.data_type)
            .ok_or_else(|| SalmonError::UnknownEntityType(parts.data_type.to_string()))?;
        let entity = Entity::from_xml(kind, &xml)?;

        debug!(kind = %kind, encrypted = params.is_some(), "Opened magic envelope");
        Ok(entity)
    }
}

/// Builds the string that is signed:
/// `b64url(payload).b64url(type).b64url(encoding).b64url(alg)`.
pub fn signature_subject(
    payload: &[u8],
    data_type: &str,
    data_encoding: &str,
    alg: &str,
) -> String {
    [
        encoding::urlsafe_encode(payload),
        encoding::urlsafe_encode(data_type),
        encoding::urlsafe_encode(data_encoding),
        encoding::urlsafe_encode(alg),
    ]
    .join(".")
}

struct EnvelopeParts<'e> {
    payload: Vec<u8>,
    data_type: &'e str,
    encoding: &'e str,
    alg: &'e str,
    sig: &'e str,
}

impl<'e> EnvelopeParts<'e> {
    fn parse(env: &'e Element) -> SalmonResult<Self> {
        if env.local_name() != "env" {
            return Err(SalmonError::InvalidEnvelope(format!(
                "expected <me:env>, found <{}>",
                env.name()
            )));
        }

        let data = required_child(env, "data")?;
        let data_type = data
            .attribute("type")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SalmonError::InvalidEnvelope("data has no type".into()))?;
        let payload = encoding::urlsafe_decode(data.text())
            .ok_or_else(|| SalmonError::InvalidEnvelope("data is not base64url".into()))?;

        Ok(Self {
            payload,
            data_type,
            encoding: required_child(env, "encoding")?.text().trim(),
            alg: required_child(env, "alg")?.text().trim(),
            sig: required_child(env, "sig")?.text(),
        })
    }
}

fn required_child<'e>(env: &'e Element, name: &str) -> SalmonResult<&'e Element> {
    env.child(name)
        .filter(|child| !child.text().trim().is_empty())
        .ok_or_else(|| SalmonError::InvalidEnvelope(format!("missing or empty {name}")))
}

fn decrypt_payload(payload: &[u8], params: &CipherParams) -> SalmonResult<Vec<u8>> {
    let text = std::str::from_utf8(payload)
        .ok()
        .and_then(encoding::decode)
        .ok_or_else(|| {
            SalmonError::Decryption(CryptoError::Decryption(
                "encrypted payload is not base64".into(),
            ))
        })?;
    crypto::decrypt(params, &text).map_err(SalmonError::Decryption)
}
