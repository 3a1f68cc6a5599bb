//! Host callback registry.
//!
//! The library owns no storage. Everything it needs to know about people,
//! keys and entities, and everything it hands back, goes through one of a
//! fixed set of callbacks ([`EventName`]). Each event has a marker type in
//! [`events`] that fixes its argument and result types, so handlers and
//! triggers are checked at compile time.
//!
//! ```ignore
//! let mut callbacks = Callbacks::federation();
//! callbacks.on::<events::FetchPublicKeyByDiasporaId, _>(|id| Ok(keys.get(&id).cloned()))?;
//! let key = callbacks.trigger::<events::FetchPublicKeyByDiasporaId>(author)?;
//! ```

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{CallbackError, HandlerError};

/// The closed set of callback events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventName {
    FetchPersonForWebfinger,
    FetchPersonForHcard,
    SavePersonAfterWebfinger,
    FetchPrivateKeyByDiasporaId,
    FetchAuthorPrivateKeyByEntityGuid,
    FetchPublicKeyByDiasporaId,
    FetchAuthorPublicKeyByEntityGuid,
    EntityAuthorIsLocal,
    FetchEntityAuthorIdByGuid,
    QueuePublicReceive,
    QueuePrivateReceive,
    SaveEntityAfterReceive,
}

impl EventName {
    pub const ALL: [EventName; 12] = [
        Self::FetchPersonForWebfinger,
        Self::FetchPersonForHcard,
        Self::SavePersonAfterWebfinger,
        Self::FetchPrivateKeyByDiasporaId,
        Self::FetchAuthorPrivateKeyByEntityGuid,
        Self::FetchPublicKeyByDiasporaId,
        Self::FetchAuthorPublicKeyByEntityGuid,
        Self::EntityAuthorIsLocal,
        Self::FetchEntityAuthorIdByGuid,
        Self::QueuePublicReceive,
        Self::QueuePrivateReceive,
        Self::SaveEntityAfterReceive,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchPersonForWebfinger => "fetch_person_for_webfinger",
            Self::FetchPersonForHcard => "fetch_person_for_hcard",
            Self::SavePersonAfterWebfinger => "save_person_after_webfinger",
            Self::FetchPrivateKeyByDiasporaId => "fetch_private_key_by_diaspora_id",
            Self::FetchAuthorPrivateKeyByEntityGuid => "fetch_author_private_key_by_entity_guid",
            Self::FetchPublicKeyByDiasporaId => "fetch_public_key_by_diaspora_id",
            Self::FetchAuthorPublicKeyByEntityGuid => "fetch_author_public_key_by_entity_guid",
            Self::EntityAuthorIsLocal => "entity_author_is_local?",
            Self::FetchEntityAuthorIdByGuid => "fetch_entity_author_id_by_guid",
            Self::QueuePublicReceive => "queue_public_receive",
            Self::QueuePrivateReceive => "queue_private_receive",
            Self::SaveEntityAfterReceive => "save_entity_after_receive",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = CallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| CallbackError::UnknownEvent(s.to_string()))
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Ties a marker type to its event name and handler signature.
///
/// Implemented only by the types in [`events`].
pub trait CallbackEvent: sealed::Sealed + 'static {
    const NAME: EventName;
    type Args: 'static;
    type Output: 'static;
}

type Handler<E> = Box<
    dyn Fn(<E as CallbackEvent>::Args) -> Result<<E as CallbackEvent>::Output, HandlerError>
        + Send
        + Sync,
>;

macro_rules! callback_events {
    ($($(#[$doc:meta])* $marker:ident => $name:ident, ($args:ty) -> $output:ty;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy)]
            pub struct $marker;

            impl super::sealed::Sealed for $marker {}

            impl super::CallbackEvent for $marker {
                const NAME: super::EventName = super::EventName::$name;
                type Args = $args;
                type Output = $output;
            }
        )*
    };
}

/// One marker type per [`EventName`].
///
/// Arguments that name an entity by `(entity type, guid)` use the parent
/// type as it appears on the wire, e.g. `("Post", guid)`.
pub mod events {
    use diaspora_crypto::{PrivateKey, PublicKey};
    use diaspora_entities::Entity;

    use crate::discovery::{HCard, WebFinger};

    callback_events! {
        /// Diaspora ID → local person's WebFinger data.
        FetchPersonForWebfinger => FetchPersonForWebfinger, (String) -> Option<WebFinger>;
        /// Person GUID → local person's hCard data.
        FetchPersonForHcard => FetchPersonForHcard, (String) -> Option<HCard>;
        /// Stores a person discovered through WebFinger.
        SavePersonAfterWebfinger => SavePersonAfterWebfinger, (Entity) -> ();
        FetchPrivateKeyByDiasporaId => FetchPrivateKeyByDiasporaId, (String) -> Option<PrivateKey>;
        FetchAuthorPrivateKeyByEntityGuid => FetchAuthorPrivateKeyByEntityGuid, ((String, String)) -> Option<PrivateKey>;
        FetchPublicKeyByDiasporaId => FetchPublicKeyByDiasporaId, (String) -> Option<PublicKey>;
        FetchAuthorPublicKeyByEntityGuid => FetchAuthorPublicKeyByEntityGuid, ((String, String)) -> Option<PublicKey>;
        /// `entity_author_is_local?`
        EntityAuthorIsLocal => EntityAuthorIsLocal, ((String, String)) -> bool;
        FetchEntityAuthorIdByGuid => FetchEntityAuthorIdByGuid, ((String, String)) -> Option<String>;
        /// Salmon XML of a public message, to be received later.
        QueuePublicReceive => QueuePublicReceive, (String) -> ();
        /// `(recipient guid, salmon XML)`; `false` if the recipient is unknown.
        QueuePrivateReceive => QueuePrivateReceive, ((String, String)) -> bool;
        /// Hands a verified, validated entity to the host.
        SaveEntityAfterReceive => SaveEntityAfterReceive, (Entity) -> ();
    }
}

/// Registry of host handlers for a declared set of events.
///
/// Handlers are registered through `&mut self` while the application starts
/// up; afterwards the registry is shared read-only.
pub struct Callbacks {
    events: BTreeSet<EventName>,
    handlers: HashMap<EventName, Box<dyn Any + Send + Sync>>,
}

impl Callbacks {
    /// Creates a registry that accepts handlers for `events` only.
    pub fn new(events: impl IntoIterator<Item = EventName>) -> Self {
        Self {
            events: events.into_iter().collect(),
            handlers: HashMap::new(),
        }
    }

    /// Creates a registry for every federation event.
    pub fn federation() -> Self {
        Self::new(EventName::ALL)
    }

    /// Registers the handler for `E`.
    pub fn on<E, F>(&mut self, handler: F) -> Result<&mut Self, CallbackError>
    where
        E: CallbackEvent,
        F: Fn(E::Args) -> Result<E::Output, HandlerError> + Send + Sync + 'static,
    {
        self.ensure_declared(E::NAME)?;
        if self.handlers.contains_key(&E::NAME) {
            return Err(CallbackError::DuplicateHandler(E::NAME));
        }

        let handler: Handler<E> = Box::new(handler);
        self.handlers.insert(E::NAME, Box::new(handler));
        debug!(event = %E::NAME, "Registered callback handler");
        Ok(self)
    }

    /// Calls the handler for `E` and returns its result.
    pub fn trigger<E: CallbackEvent>(&self, args: E::Args) -> Result<E::Output, CallbackError> {
        self.ensure_declared(E::NAME)?;
        let handler = self
            .handlers
            .get(&E::NAME)
            .and_then(|h| h.downcast_ref::<Handler<E>>())
            .ok_or(CallbackError::HandlerMissing(E::NAME))?;

        handler(args).map_err(|source| CallbackError::Handler {
            event: E::NAME,
            source,
        })
    }

    /// Whether a handler is registered for `event`.
    pub fn is_registered(&self, event: EventName) -> bool {
        self.handlers.contains_key(&event)
    }

    /// Declared events without a handler, in declaration order of [`EventName`].
    pub fn missing_handlers(&self) -> Vec<EventName> {
        self.events
            .iter()
            .copied()
            .filter(|event| !self.handlers.contains_key(event))
            .collect()
    }

    /// `true` once every declared event has a handler.
    pub fn definition_complete(&self) -> bool {
        self.missing_handlers().is_empty()
    }

    fn ensure_declared(&self, event: EventName) -> Result<(), CallbackError> {
        if self.events.contains(&event) {
            Ok(())
        } else {
            Err(CallbackError::UnknownEvent(event.to_string()))
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("events", &self.events)
            .field("registered", &self.handlers.keys().collect::<BTreeSet<_>>())
            .finish()
    }
}
