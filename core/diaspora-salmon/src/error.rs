use diaspora_crypto::CryptoError;
use diaspora_entities::EntityError;
use diaspora_types::XmlError;
use thiserror::Error;

/// Errors from building or opening envelopes and slaps.
#[derive(Debug, Error)]
pub enum SalmonError {
    #[error("invalid magic envelope: {0}")]
    InvalidEnvelope(String),

    #[error("magic envelope signature verification failed")]
    InvalidSignature,

    #[error("unsupported envelope encoding: {0}")]
    InvalidEncoding(String),

    #[error("unsupported envelope algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("decryption failed: {0}")]
    Decryption(#[source] CryptoError),

    #[error("payload is already encrypted")]
    AlreadyEncrypted,

    #[error("invalid salmon slap: {0}")]
    InvalidSlap(String),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

pub type SalmonResult<T> = Result<T, SalmonError>;
