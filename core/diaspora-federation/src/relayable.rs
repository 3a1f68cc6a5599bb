//! Lookups on the parent of a relayable entity (comments and likes).

use diaspora_crypto::{PrivateKey, PublicKey};
use diaspora_entities::Entity;

use crate::callbacks::events;
use crate::error::CallbackError;
use crate::federation::Federation;

/// The `(parent_type, parent_guid)` pair of a relayable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRef<'e> {
    pub parent_type: &'e str,
    pub parent_guid: &'e str,
}

impl<'e> ParentRef<'e> {
    pub fn new(parent_type: &'e str, parent_guid: &'e str) -> Self {
        Self {
            parent_type,
            parent_guid,
        }
    }

    /// `None` unless `entity` is relayable and names its parent.
    pub fn of(entity: &'e Entity) -> Option<Self> {
        if !entity.kind().is_relayable() {
            return None;
        }
        Some(Self::new(
            entity.get_str("parent_type")?,
            entity.get_str("parent_guid")?,
        ))
    }

    fn args(&self) -> (String, String) {
        (self.parent_type.to_string(), self.parent_guid.to_string())
    }
}

impl Federation {
    /// Whether the parent's author lives on this pod.
    pub fn parent_author_is_local(&self, parent: &ParentRef<'_>) -> Result<bool, CallbackError> {
        self.trigger::<events::EntityAuthorIsLocal>(parent.args())
    }

    pub fn parent_author_id(&self, parent: &ParentRef<'_>) -> Result<Option<String>, CallbackError> {
        self.trigger::<events::FetchEntityAuthorIdByGuid>(parent.args())
    }

    /// Key for checking the parent author's signature on a relayed entity.
    pub fn parent_author_public_key(
        &self,
        parent: &ParentRef<'_>,
    ) -> Result<Option<PublicKey>, CallbackError> {
        self.trigger::<events::FetchAuthorPublicKeyByEntityGuid>(parent.args())
    }

    /// Key for signing as the parent author; only available when the parent
    /// author is local.
    pub fn parent_author_private_key(
        &self,
        parent: &ParentRef<'_>,
    ) -> Result<Option<PrivateKey>, CallbackError> {
        self.trigger::<events::FetchAuthorPrivateKeyByEntityGuid>(parent.args())
    }
}
