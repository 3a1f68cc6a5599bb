//! XML serialization of entities.
//!
//! An entity serializes to an element named after its kind, with one child
//! per present property in declaration order. A single nested entity becomes
//! a child element named after the property's wire name, not its own kind;
//! entity lists become repeated elements named after the nested kind. The two
//! only differ where a property name differs from its kind, as with the
//! `test` property of `test_nested_entity`.

use diaspora_types::{Element, Timestamp};

use crate::entity::Entity;
use crate::error::{EntityError, EntityResult};
use crate::kind::EntityKind;
use crate::schema::{PropertyDecl, PropertyKind};
use crate::value::PropertyValue;

/// Maximum depth of nested entities accepted while deserializing.
pub const MAX_NESTING_DEPTH: usize = 4;

impl Entity {
    /// Serializes the entity to an element tree.
    pub fn to_element(&self) -> Element {
        self.to_element_named(self.kind().name())
    }

    /// Serializes the entity to its canonical XML fragment.
    pub fn to_xml(&self) -> EntityResult<String> {
        Ok(self.to_element().to_xml()?)
    }

    /// Deserializes an element of the given kind.
    pub fn from_element(kind: EntityKind, element: &Element) -> EntityResult<Self> {
        if element.local_name() != kind.name() {
            return Err(EntityError::UnexpectedElement {
                expected: kind.name(),
                found: element.name().to_string(),
            });
        }
        decode(kind, element, 0)
    }

    /// Deserializes an XML fragment of the given kind.
    pub fn from_xml(kind: EntityKind, xml: &str) -> EntityResult<Self> {
        Self::from_element(kind, &Element::parse(xml)?)
    }

    /// Deserializes an XML fragment, taking the kind from the root element.
    pub fn parse_xml(xml: &str) -> EntityResult<Self> {
        let root = Element::parse(xml)?;
        let kind = root.local_name().parse::<EntityKind>()?;
        decode(kind, &root, 0)
    }

    fn to_element_named(&self, name: &str) -> Element {
        let mut element = Element::new(name);
        for (decl, value) in self.iter() {
            match value {
                PropertyValue::Entity(nested) => {
                    element.push_child(nested.to_element_named(decl.wire_name()));
                }
                PropertyValue::Entities(list) => {
                    for nested in list {
                        element.push_child(nested.to_element());
                    }
                }
                scalar => {
                    let child = Element::new(decl.wire_name()).with_text(scalar_text(scalar));
                    element.push_child(child);
                }
            }
        }
        element
    }
}

fn scalar_text(value: &PropertyValue) -> String {
    match value {
        PropertyValue::String(s) => s.clone(),
        PropertyValue::Boolean(b) => b.to_string(),
        PropertyValue::Integer(i) => i.to_string(),
        PropertyValue::Timestamp(ts) => ts.to_string(),
        PropertyValue::Entity(_) | PropertyValue::Entities(_) => String::new(),
    }
}

fn decode(kind: EntityKind, element: &Element, depth: usize) -> EntityResult<Entity> {
    if depth > MAX_NESTING_DEPTH {
        return Err(EntityError::NestingTooDeep(MAX_NESTING_DEPTH));
    }

    let mut values: Vec<(&'static str, PropertyValue)> = Vec::new();
    for decl in kind.schema().properties {
        match decl.kind {
            PropertyKind::Entities(nested) => {
                let list = element
                    .children_named(nested.name())
                    .map(|child| decode(nested, child, depth + 1))
                    .collect::<EntityResult<Vec<_>>>()?;
                values.push((decl.name, PropertyValue::Entities(list)));
            }
            PropertyKind::Entity(nested) => {
                if let Some(child) = element.child(decl.wire_name()) {
                    let entity = decode(nested, child, depth + 1)?;
                    values.push((decl.name, entity.into()));
                }
            }
            _ => {
                if let Some(child) = element.child(decl.wire_name()) {
                    values.push((decl.name, parse_scalar(kind, decl, child.text())?));
                }
            }
        }
    }

    Entity::new(kind, values)
}

fn parse_scalar(
    kind: EntityKind,
    decl: &'static PropertyDecl,
    text: &str,
) -> EntityResult<PropertyValue> {
    let invalid = || EntityError::InvalidValue {
        kind,
        property: decl.name,
        value: text.to_string(),
    };

    match decl.kind {
        PropertyKind::Boolean => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(PropertyValue::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(PropertyValue::Boolean(false))
            } else {
                Err(invalid())
            }
        }
        PropertyKind::Integer => text
            .trim()
            .parse::<i64>()
            .map(PropertyValue::Integer)
            .map_err(|_| invalid()),
        PropertyKind::Timestamp => Timestamp::parse(text)
            .map(PropertyValue::Timestamp)
            .map_err(|_| invalid()),
        _ => Ok(PropertyValue::String(text.to_string())),
    }
}
