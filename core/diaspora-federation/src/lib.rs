//! Federation layer for diaspora pods.
//!
//! Connects the entity model and the Salmon envelopes to the host
//! application. The host provides storage and keys through a fixed set of
//! callbacks; the library verifies incoming messages and builds outgoing ones.
//!
//! # Setup
//!
//! ```ignore
//! use diaspora_federation::{events, FederationBuilder, FederationConfig};
//!
//! let federation = FederationBuilder::new(FederationConfig::new("https://pod.example.org/"))
//!     .on::<events::FetchPublicKeyByDiasporaId, _>(|id| Ok(store.public_key(&id)))?
//!     // ... one handler per event
//!     .build()?;
//!
//! federation.receive_public(&salmon_xml)?;
//! ```
//!
//! `build` runs [`validate_config`], so a half-configured library fails at
//! startup instead of on the first message.

mod callbacks;
mod config;
mod discovery;
mod error;
mod federation;
mod receiver;
mod relayable;
mod sender;

pub use callbacks::{events, CallbackEvent, Callbacks, EventName};
pub use config::{
    validate_config, Environment, FederationConfig, DEFAULT_HTTP_CONCURRENCY,
    DEFAULT_HTTP_REDIRECT_LIMIT, DEFAULT_HTTP_TIMEOUT,
};
pub use discovery::{HCard, WebFinger};
pub use error::{CallbackError, ConfigurationError, HandlerError, ReceiveError, SendError};
pub use federation::{Federation, FederationBuilder};
pub use relayable::ParentRef;
