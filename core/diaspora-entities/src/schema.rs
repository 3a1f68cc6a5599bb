use std::fmt;

use crate::kind::EntityKind;
use crate::value::PropertyValue;

/// Describes an entity kind's properties, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub properties: &'static [PropertyDecl],
}

impl EntitySchema {
    /// Looks up a declaration by property name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'static PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Names of the properties that must always be present.
    pub fn required(&self) -> impl Iterator<Item = &'static str> {
        self.properties
            .iter()
            .filter(|p| !p.optional)
            .map(|p| p.name)
    }
}

/// A single declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Name used by the host application.
    pub name: &'static str,
    /// Element name on the wire, when it differs from `name`.
    pub alias: Option<&'static str>,
    pub kind: PropertyKind,
    pub optional: bool,
    /// Value substituted when the property is absent.
    pub default: Option<DefaultValue>,
}

impl PropertyDecl {
    const fn new(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            alias: None,
            kind,
            optional: false,
            default: None,
        }
    }

    /// Shorthand for a string property.
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, PropertyKind::String)
    }

    /// Shorthand for a boolean property.
    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Boolean)
    }

    /// Shorthand for an integer property.
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Integer)
    }

    /// Shorthand for a UTC timestamp property.
    #[must_use]
    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Timestamp)
    }

    /// Shorthand for a single nested entity.
    #[must_use]
    pub const fn entity(name: &'static str, kind: EntityKind) -> Self {
        Self::new(name, PropertyKind::Entity(kind))
    }

    /// Shorthand for a list of nested entities.
    ///
    /// Lists are never missing: an absent list is an empty list.
    #[must_use]
    pub const fn entities(name: &'static str, kind: EntityKind) -> Self {
        Self {
            optional: true,
            ..Self::new(name, PropertyKind::Entities(kind))
        }
    }

    /// Marks the property as optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Serializes the property under a different element name.
    #[must_use]
    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Sets a default value. Implies optional.
    #[must_use]
    pub const fn default(mut self, value: DefaultValue) -> Self {
        self.optional = true;
        self.default = Some(value);
        self
    }

    /// The element name used on the wire.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }
}

/// The data type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Boolean,
    Integer,
    Timestamp,
    Entity(EntityKind),
    Entities(EntityKind),
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Boolean => f.write_str("boolean"),
            Self::Integer => f.write_str("integer"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::Entity(kind) => write!(f, "entity({kind})"),
            Self::Entities(kind) => write!(f, "entities({kind})"),
        }
    }
}

/// A default value for an optional property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Boolean(bool),
    String(&'static str),
}

impl DefaultValue {
    #[must_use]
    pub fn to_value(self) -> PropertyValue {
        match self {
            Self::Boolean(b) => PropertyValue::Boolean(b),
            Self::String(s) => PropertyValue::String(s.to_string()),
        }
    }
}
