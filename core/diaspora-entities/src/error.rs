use diaspora_types::XmlError;
use thiserror::Error;

use crate::kind::EntityKind;
use crate::schema::PropertyKind;

/// Errors from constructing or (de)serializing entities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntityError {
    #[error("{kind}: missing required properties: {}", .properties.join(", "))]
    MissingProperties {
        kind: EntityKind,
        properties: Vec<&'static str>,
    },

    #[error("{kind}.{property}: expected {expected}, got {found}")]
    TypeMismatch {
        kind: EntityKind,
        property: &'static str,
        expected: PropertyKind,
        found: String,
    },

    #[error("{kind}: unknown property {property}")]
    UnknownProperty { kind: EntityKind, property: String },

    #[error("{kind}.{property}: invalid value {value:?}")]
    InvalidValue {
        kind: EntityKind,
        property: &'static str,
        value: String,
    },

    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("unexpected element <{found}>, expected <{expected}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    #[error("entities nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error(transparent)]
    Xml(#[from] XmlError),
}

pub type EntityResult<T> = Result<T, EntityError>;
