use std::collections::BTreeMap;

use diaspora_types::Timestamp;

use crate::error::{EntityError, EntityResult};
use crate::kind::EntityKind;
use crate::schema::{PropertyDecl, PropertyKind};
use crate::value::PropertyValue;

/// A structurally valid instance of an [`EntityKind`].
///
/// Every non-optional property has a value and every value matches its
/// declaration. Entities are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: EntityKind,
    properties: BTreeMap<&'static str, PropertyValue>,
}

impl Entity {
    /// Builds an entity from `(property name, value)` pairs.
    ///
    /// Absent optional properties take their declared default, if any.
    /// Absent entity lists become empty lists. All missing required
    /// properties are reported in one [`EntityError::MissingProperties`].
    pub fn new<I, K>(kind: EntityKind, values: I) -> EntityResult<Self>
    where
        I: IntoIterator<Item = (K, PropertyValue)>,
        K: AsRef<str>,
    {
        let schema = kind.schema();
        let mut properties = BTreeMap::new();

        for (name, value) in values {
            let name = name.as_ref();
            let decl = schema
                .property(name)
                .ok_or_else(|| EntityError::UnknownProperty {
                    kind,
                    property: name.to_string(),
                })?;
            if !value.matches(decl.kind) {
                return Err(EntityError::TypeMismatch {
                    kind,
                    property: decl.name,
                    expected: decl.kind,
                    found: value.type_name(),
                });
            }
            properties.insert(decl.name, value);
        }

        let mut missing = Vec::new();
        for decl in schema.properties {
            if properties.contains_key(decl.name) {
                continue;
            }
            if let Some(default) = decl.default {
                properties.insert(decl.name, default.to_value());
            } else if let PropertyKind::Entities(_) = decl.kind {
                properties.insert(decl.name, PropertyValue::Entities(Vec::new()));
            } else if !decl.optional {
                missing.push(decl.name);
            }
        }

        if !missing.is_empty() {
            return Err(EntityError::MissingProperties {
                kind,
                properties: missing,
            });
        }

        Ok(Self { kind, properties })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the raw value of a property, if present.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Extract a string property.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_str)
    }

    /// Extract a boolean property.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropertyValue::as_bool)
    }

    /// Extract an integer property.
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(PropertyValue::as_integer)
    }

    pub fn get_timestamp(&self, name: &str) -> Option<Timestamp> {
        match self.get(name)? {
            PropertyValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        match self.get(name)? {
            PropertyValue::Entity(e) => Some(e),
            _ => None,
        }
    }

    /// Extract an entity list. Unknown names yield an empty slice.
    pub fn get_entities(&self, name: &str) -> &[Entity] {
        match self.get(name) {
            Some(PropertyValue::Entities(list)) => list,
            _ => &[],
        }
    }

    /// The `author` property, for kinds that declare one.
    pub fn author(&self) -> Option<&str> {
        self.get_str("author")
    }

    pub fn guid(&self) -> Option<&str> {
        self.get_str("guid")
    }

    /// Present properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static PropertyDecl, &PropertyValue)> {
        self.kind
            .schema()
            .properties
            .iter()
            .filter_map(|decl| self.properties.get(decl.name).map(|v| (decl, v)))
    }
}
