//! Error types for the federation library.

use diaspora_entities::{EntityKind, ValidationError};
use diaspora_salmon::SalmonError;
use thiserror::Error;

use crate::callbacks::EventName;

/// Error returned by a host callback handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from registering or triggering callbacks.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("unknown callback event: {0}")]
    UnknownEvent(String),

    #[error("a handler for {0} is already registered")]
    DuplicateHandler(EventName),

    #[error("no handler registered for {0}")]
    HandlerMissing(EventName),

    #[error("{event} handler failed: {source}")]
    Handler {
        event: EventName,
        source: HandlerError,
    },
}

/// Invalid configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigurationError(pub(crate) String);

impl ConfigurationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Reasons an incoming message was rejected.
#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error(transparent)]
    Salmon(#[from] SalmonError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no public key known for {0}")]
    AuthorKeyNotFound(String),

    #[error("slap author {slap_author} does not match entity author {entity_author}")]
    AuthorMismatch {
        slap_author: String,
        entity_author: String,
    },

    #[error("expected a {expected} entity, got {found}")]
    UnexpectedKind {
        expected: EntityKind,
        found: EntityKind,
    },

    #[error(transparent)]
    Callback(#[from] CallbackError),
}

/// Reasons an outgoing message could not be built.
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Salmon(#[from] SalmonError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} entities have no author")]
    MissingAuthor(EntityKind),

    #[error("no private key known for {0}")]
    AuthorKeyNotFound(String),

    #[error(transparent)]
    Callback(#[from] CallbackError),
}
