//! Federated entity model.
//!
//! Defines the typed objects that pods exchange:
//! - [`EntityKind`]: the closed set of federated entity types, each with a
//!   static [`EntitySchema`] of ordered [`PropertyDecl`]s
//! - [`Entity`]: an immutable, structurally valid instance of a kind
//! - XML serialization ([`Entity::to_xml`], [`Entity::from_xml`])
//! - [`validate`]: per-kind semantic rules ([`RuleSet`]) checked before an
//!   entity is trusted
//!
//! Structural validity (required properties present, values of the declared
//! type) is enforced when an entity is constructed; semantic validity
//! (identifier formats, lengths) is a separate, explicit step.

mod codec;
mod entity;
mod error;
mod kind;
mod rules;
mod schema;
mod validation;
mod value;

pub use codec::MAX_NESTING_DEPTH;
pub use entity::Entity;
pub use error::{EntityError, EntityResult};
pub use kind::EntityKind;
pub use schema::{DefaultValue, EntitySchema, PropertyDecl, PropertyKind};
pub use validation::{validate, Rule, RuleSet, ValidationError, Violation};
pub use value::PropertyValue;
