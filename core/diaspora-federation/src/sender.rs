//! Outgoing messages.

use diaspora_crypto::{PrivateKey, PublicKey};
use diaspora_entities::Entity;
use diaspora_salmon::{EncryptedSlap, Slap};
use tracing::debug;

use crate::callbacks::events;
use crate::error::SendError;
use crate::federation::Federation;

impl Federation {
    /// Signs `entity` with its author's key and wraps it in a public slap.
    pub fn public_salmon(&self, entity: &Entity) -> Result<String, SendError> {
        let (author, key) = self.signing_key(entity)?;
        let xml = Slap::generate_xml(author, &key, entity)?;
        debug!(author, kind = %entity.kind(), "Built public slap");
        Ok(xml)
    }

    /// Signs and encrypts `entity` for a single recipient.
    pub fn private_salmon(&self, entity: &Entity, recipient: &PublicKey) -> Result<String, SendError> {
        let (author, key) = self.signing_key(entity)?;
        let xml = EncryptedSlap::generate_xml(author, &key, entity, recipient)?;
        debug!(author, kind = %entity.kind(), "Built private slap");
        Ok(xml)
    }

    fn signing_key<'e>(&self, entity: &'e Entity) -> Result<(&'e str, PrivateKey), SendError> {
        entity.validate()?;
        let author = entity
            .author()
            .ok_or(SendError::MissingAuthor(entity.kind()))?;
        let key = self
            .trigger::<events::FetchPrivateKeyByDiasporaId>(author.to_string())?
            .ok_or_else(|| SendError::AuthorKeyNotFound(author.to_string()))?;
        Ok((author, key))
    }
}
