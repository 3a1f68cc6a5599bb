use diaspora_types::{DiasporaId, Guid, Timestamp};

use crate::entity::Entity;
use crate::schema::PropertyKind;

/// A property value held by an [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Timestamp(Timestamp),
    Entity(Box<Entity>),
    Entities(Vec<Entity>),
}

impl PropertyValue {
    /// Short description of the value's type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::String(_) => "string".into(),
            Self::Boolean(_) => "boolean".into(),
            Self::Integer(_) => "integer".into(),
            Self::Timestamp(_) => "timestamp".into(),
            Self::Entity(e) => format!("entity({})", e.kind()),
            Self::Entities(_) => "entities".into(),
        }
    }

    /// Whether this value is acceptable for a property of `kind`.
    #[must_use]
    pub fn matches(&self, kind: PropertyKind) -> bool {
        match (self, kind) {
            (Self::String(_), PropertyKind::String)
            | (Self::Boolean(_), PropertyKind::Boolean)
            | (Self::Integer(_), PropertyKind::Integer)
            | (Self::Timestamp(_), PropertyKind::Timestamp) => true,
            (Self::Entity(e), PropertyKind::Entity(expected)) => e.kind() == expected,
            (Self::Entities(list), PropertyKind::Entities(expected)) => {
                list.iter().all(|e| e.kind() == expected)
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<Timestamp> for PropertyValue {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<Entity> for PropertyValue {
    fn from(entity: Entity) -> Self {
        Self::Entity(Box::new(entity))
    }
}

impl From<Vec<Entity>> for PropertyValue {
    fn from(entities: Vec<Entity>) -> Self {
        Self::Entities(entities)
    }
}

impl From<Guid> for PropertyValue {
    fn from(guid: Guid) -> Self {
        Self::String(guid.into_string())
    }
}

impl From<&DiasporaId> for PropertyValue {
    fn from(id: &DiasporaId) -> Self {
        Self::String(id.to_string())
    }
}
