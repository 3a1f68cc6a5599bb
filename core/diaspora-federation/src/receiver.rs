//! Incoming messages and discovery passthrough.

use diaspora_crypto::PublicKey;
use diaspora_entities::{Entity, EntityKind};
use diaspora_salmon::{EncryptedSlap, Slap};
use tracing::{debug, info, warn};

use crate::callbacks::events;
use crate::discovery::{HCard, WebFinger};
use crate::error::{CallbackError, ReceiveError};
use crate::federation::Federation;

impl Federation {
    /// Hands a public Salmon message to the host's queue.
    pub fn queue_public(&self, xml: impl Into<String>) -> Result<(), CallbackError> {
        self.trigger::<events::QueuePublicReceive>(xml.into())
    }

    /// Hands a private Salmon message for `recipient_guid` to the host's
    /// queue. `false` if the host does not know the recipient.
    pub fn queue_private(
        &self,
        recipient_guid: impl Into<String>,
        xml: impl Into<String>,
    ) -> Result<bool, CallbackError> {
        self.trigger::<events::QueuePrivateReceive>((recipient_guid.into(), xml.into()))
    }

    /// Verifies a public slap and delivers its entity to the host.
    pub fn receive_public(&self, xml: &str) -> Result<(), ReceiveError> {
        let result = self.open_public(xml).and_then(|(author, entity)| self.accept(&author, entity));
        if let Err(e) = &result {
            warn!(error = %e, "Rejected public message");
        }
        result
    }

    /// Decrypts and verifies a private slap addressed to `recipient` and
    /// delivers its entity to the host.
    ///
    /// `Ok(false)` if the recipient's private key is unknown; nothing is
    /// parsed in that case.
    pub fn receive_private(&self, recipient: &str, xml: &str) -> Result<bool, ReceiveError> {
        let recipient_key =
            match self.trigger::<events::FetchPrivateKeyByDiasporaId>(recipient.to_string()) {
                Ok(Some(key)) => key,
                Ok(None) => {
                    debug!(recipient, "No private key for recipient, skipping message");
                    return Ok(false);
                }
                Err(e) => {
                    warn!(recipient, error = %e, "Rejected private message");
                    return Err(e.into());
                }
            };

        let result = EncryptedSlap::from_xml(xml, &recipient_key)
            .map_err(ReceiveError::from)
            .and_then(|slap| {
                let author_key = self.author_public_key(slap.author_id())?;
                let entity = slap.entity(&author_key)?;
                Ok((slap.author_id().to_string(), entity))
            })
            .and_then(|(author, entity)| self.accept(&author, entity));

        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(recipient, error = %e, "Rejected private message");
                Err(e)
            }
        }
    }

    /// WebFinger data for a local person, if the host knows them.
    pub fn webfinger(&self, diaspora_id: &str) -> Result<Option<WebFinger>, CallbackError> {
        self.trigger::<events::FetchPersonForWebfinger>(diaspora_id.to_string())
    }

    /// hCard data for a local person, if the host knows them.
    pub fn hcard(&self, guid: &str) -> Result<Option<HCard>, CallbackError> {
        self.trigger::<events::FetchPersonForHcard>(guid.to_string())
    }

    /// Validates a person found through discovery and hands it to the host.
    pub fn save_discovered_person(&self, person: Entity) -> Result<(), ReceiveError> {
        if person.kind() != EntityKind::Person {
            return Err(ReceiveError::UnexpectedKind {
                expected: EntityKind::Person,
                found: person.kind(),
            });
        }
        person.validate()?;
        self.trigger::<events::SavePersonAfterWebfinger>(person)?;
        Ok(())
    }

    fn open_public(&self, xml: &str) -> Result<(String, Entity), ReceiveError> {
        let slap = Slap::from_xml(xml)?;
        let author_key = self.author_public_key(slap.author_id())?;
        let entity = slap.entity(&author_key)?;
        Ok((slap.author_id().to_string(), entity))
    }

    fn author_public_key(&self, author: &str) -> Result<PublicKey, ReceiveError> {
        self.trigger::<events::FetchPublicKeyByDiasporaId>(author.to_string())?
            .ok_or_else(|| ReceiveError::AuthorKeyNotFound(author.to_string()))
    }

    fn accept(&self, slap_author: &str, entity: Entity) -> Result<(), ReceiveError> {
        entity.validate()?;
        if let Some(entity_author) = entity.author() {
            if entity_author != slap_author {
                return Err(ReceiveError::AuthorMismatch {
                    slap_author: slap_author.to_string(),
                    entity_author: entity_author.to_string(),
                });
            }
        }

        let kind = entity.kind();
        let guid = entity.guid().map(str::to_string);
        self.trigger::<events::SaveEntityAfterReceive>(entity)?;
        info!(author = slap_author, %kind, guid = guid.as_deref().unwrap_or(""), "Received entity");
        Ok(())
    }
}
