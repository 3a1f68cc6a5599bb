//! Semantic validation of entities.
//!
//! Rules are declared per kind and per property name (see [`RuleSet`]).
//! Rules on absent optional properties are skipped. Nested entities are
//! validated with their own kind's rules and reported under a dotted path.

use std::fmt;

use diaspora_types::{DiasporaId, Guid};
use thiserror::Error;

use crate::entity::Entity;
use crate::kind::EntityKind;
use crate::value::PropertyValue;

/// A semantic check applied to a single property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `user@host[:port]`.
    DiasporaId,
    /// 16..=255 ASCII alphanumerics.
    Guid,
    /// Contains something other than whitespace.
    NotEmpty,
    /// Character count within `min..=max`.
    Length { min: usize, max: usize },
    NonNegative,
}

impl Rule {
    /// Returns `true` if `value` satisfies the rule.
    ///
    /// A value of a type the rule does not apply to never satisfies it.
    #[must_use]
    pub fn check(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (Self::DiasporaId, PropertyValue::String(s)) => DiasporaId::is_valid(s),
            (Self::Guid, PropertyValue::String(s)) => Guid::is_valid(s),
            (Self::NotEmpty, PropertyValue::String(s)) => !s.trim().is_empty(),
            (Self::Length { min, max }, PropertyValue::String(s)) => {
                let len = s.chars().count();
                *min <= len && len <= *max
            }
            (Self::NonNegative, PropertyValue::Integer(i)) => *i >= 0,
            _ => false,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiasporaId => f.write_str("diaspora_id"),
            Self::Guid => f.write_str("guid"),
            Self::NotEmpty => f.write_str("not_empty"),
            Self::Length { min, max } => write!(f, "length({min}..={max})"),
            Self::NonNegative => f.write_str("non_negative"),
        }
    }
}

/// The rules for one entity kind, keyed by property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub kind: EntityKind,
    pub rules: &'static [(&'static str, &'static [Rule])],
}

impl RuleSet {
    /// Rules declared for a property.
    #[must_use]
    pub fn for_property(&self, name: &str) -> &'static [Rule] {
        self.rules
            .iter()
            .find(|(property, _)| *property == name)
            .map(|(_, rules)| *rules)
            .unwrap_or(&[])
    }
}

/// A property that failed a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path from the validated entity (`location.lat`, `photos[0].guid`).
    pub property: String,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.property, self.rule)
    }
}

/// Every rule violation found in an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failed validation: {}", format_violations(.violations))]
pub struct ValidationError {
    pub kind: EntityKind,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Whether `property` (a full path) failed any rule.
    #[must_use]
    pub fn has_violation(&self, property: &str) -> bool {
        self.violations.iter().any(|v| v.property == property)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates an entity and its nested entities against their kinds' rules.
pub fn validate(entity: &Entity) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    collect(entity, "", &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            kind: entity.kind(),
            violations,
        })
    }
}

impl Entity {
    /// See [`validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self)
    }
}

fn collect(entity: &Entity, prefix: &str, out: &mut Vec<Violation>) {
    let rules = entity.kind().rules();
    for (name, property_rules) in rules.rules {
        let Some(value) = entity.get(name) else {
            continue;
        };
        for rule in *property_rules {
            if !rule.check(value) {
                out.push(Violation {
                    property: path(prefix, name),
                    rule: *rule,
                });
            }
        }
    }

    for (decl, value) in entity.iter() {
        match value {
            PropertyValue::Entity(nested) => collect(nested, &path(prefix, decl.name), out),
            PropertyValue::Entities(list) => {
                for (i, nested) in list.iter().enumerate() {
                    let indexed = format!("{}[{i}]", path(prefix, decl.name));
                    collect(nested, &indexed, out);
                }
            }
            _ => {}
        }
    }
}

fn path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
