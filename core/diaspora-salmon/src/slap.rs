use diaspora_crypto::{PrivateKey, PublicKey};
use diaspora_entities::Entity;
use diaspora_types::Element;
use tracing::debug;

use crate::error::{SalmonError, SalmonResult};
use crate::magic_envelope::{MagicEnvelope, XMLNS};

/// Namespace of the `<diaspora>` root element.
pub const DIASPORA_XMLNS: &str = "https://joindiaspora.com/protocol";

/// A public Salmon message.
///
/// ```xml
/// <diaspora xmlns="https://joindiaspora.com/protocol"
///           xmlns:me="http://salmon-protocol.org/ns/magic-env">
///   <header><author_id>alice@pod.example.org</author_id></header>
///   <me:env>...</me:env>
/// </diaspora>
/// ```
#[derive(Debug, Clone)]
pub struct Slap {
    author_id: String,
    envelope: Element,
}

impl Slap {
    /// Signs `entity` with the author's key and writes the slap.
    pub fn generate_xml(
        author_id: &str,
        key: &PrivateKey,
        entity: &Entity,
    ) -> SalmonResult<String> {
        let envelope = MagicEnvelope::new(key, entity)?.envelop()?;
        let header = Element::new("header")
            .with_child(Element::new("author_id").with_text(author_id));
        Ok(root().with_child(header).with_child(envelope).to_xml()?)
    }

    /// Parses a public slap. The envelope is not verified yet.
    pub fn from_xml(xml: &str) -> SalmonResult<Self> {
        let root = parse_root(xml)?;
        let author_id = root
            .child("header")
            .and_then(|header| header.child("author_id"))
            .map(|id| id.text().trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SalmonError::InvalidSlap("missing author_id".into()))?;
        let envelope = envelope_of(&root)?;

        debug!(author = %author_id, "Parsed public slap");
        Ok(Self {
            author_id,
            envelope,
        })
    }

    /// The sender's diaspora ID, as claimed by the header.
    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn envelope(&self) -> &Element {
        &self.envelope
    }

    /// Verifies the envelope against the author's key and returns its entity.
    pub fn entity(&self, author_key: &PublicKey) -> SalmonResult<Entity> {
        MagicEnvelope::unenvelop(&self.envelope, author_key, None)
    }
}

pub(crate) fn root() -> Element {
    Element::new("diaspora")
        .with_attribute("xmlns", DIASPORA_XMLNS)
        .with_attribute("xmlns:me", XMLNS)
}

pub(crate) fn parse_root(xml: &str) -> SalmonResult<Element> {
    let root = Element::parse(xml)?;
    if root.local_name() != "diaspora" {
        return Err(SalmonError::InvalidSlap(format!(
            "expected <diaspora>, found <{}>",
            root.name()
        )));
    }
    Ok(root)
}

pub(crate) fn envelope_of(root: &Element) -> SalmonResult<Element> {
    root.child("env")
        .cloned()
        .ok_or_else(|| SalmonError::InvalidSlap("missing magic envelope".into()))
}
