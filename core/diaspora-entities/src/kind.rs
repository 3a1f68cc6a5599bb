use std::fmt;
use std::str::FromStr;

use crate::error::EntityError;
use crate::schema::{DefaultValue, EntitySchema, PropertyDecl};

/// The closed set of federated entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    TestEntity,
    TestDefaultEntity,
    TestNestedEntity,
    Location,
    Event,
    Profile,
    Person,
    Photo,
    StatusMessage,
    Comment,
    Like,
    Reshare,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        Self::TestEntity,
        Self::TestDefaultEntity,
        Self::TestNestedEntity,
        Self::Location,
        Self::Event,
        Self::Profile,
        Self::Person,
        Self::Photo,
        Self::StatusMessage,
        Self::Comment,
        Self::Like,
        Self::Reshare,
    ];

    /// The wire name: root element name and the envelope's `type` attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TestEntity => "test_entity",
            Self::TestDefaultEntity => "test_default_entity",
            Self::TestNestedEntity => "test_nested_entity",
            Self::Location => "location",
            Self::Event => "event",
            Self::Profile => "profile",
            Self::Person => "person",
            Self::Photo => "photo",
            Self::StatusMessage => "status_message",
            Self::Comment => "comment",
            Self::Like => "like",
            Self::Reshare => "reshare",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    #[must_use]
    pub fn schema(self) -> &'static EntitySchema {
        match self {
            Self::TestEntity => &TEST_ENTITY,
            Self::TestDefaultEntity => &TEST_DEFAULT_ENTITY,
            Self::TestNestedEntity => &TEST_NESTED_ENTITY,
            Self::Location => &LOCATION,
            Self::Event => &EVENT,
            Self::Profile => &PROFILE,
            Self::Person => &PERSON,
            Self::Photo => &PHOTO,
            Self::StatusMessage => &STATUS_MESSAGE,
            Self::Comment => &COMMENT,
            Self::Like => &LIKE,
            Self::Reshare => &RESHARE,
        }
    }

    /// Whether the kind refers to a parent entity (`parent_guid`/`parent_type`).
    #[must_use]
    pub fn is_relayable(self) -> bool {
        matches!(self, Self::Comment | Self::Like)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| EntityError::UnknownEntityType(s.to_string()))
    }
}

// ── Schemas ──────────────────────────────────────────────────────

static TEST_ENTITY: EntitySchema = EntitySchema {
    kind: EntityKind::TestEntity,
    properties: &[PropertyDecl::string("test")],
};

static TEST_DEFAULT_ENTITY: EntitySchema = EntitySchema {
    kind: EntityKind::TestDefaultEntity,
    properties: &[
        PropertyDecl::string("test1"),
        PropertyDecl::string("test2").optional(),
        PropertyDecl::boolean("test3").default(DefaultValue::Boolean(true)),
        PropertyDecl::boolean("test4").default(DefaultValue::Boolean(false)),
    ],
};

static TEST_NESTED_ENTITY: EntitySchema = EntitySchema {
    kind: EntityKind::TestNestedEntity,
    properties: &[
        PropertyDecl::string("asdf"),
        PropertyDecl::entity("test", EntityKind::TestEntity).optional(),
        PropertyDecl::entities("multi", EntityKind::TestEntity),
    ],
};

static LOCATION: EntitySchema = EntitySchema {
    kind: EntityKind::Location,
    properties: &[
        PropertyDecl::string("address"),
        PropertyDecl::string("lat"),
        PropertyDecl::string("lng"),
    ],
};

static EVENT: EntitySchema = EntitySchema {
    kind: EntityKind::Event,
    properties: &[
        PropertyDecl::string("author"),
        PropertyDecl::string("guid"),
        PropertyDecl::timestamp("edited_at").optional(),
        PropertyDecl::string("summary"),
        PropertyDecl::string("description").alias("text").optional(),
        PropertyDecl::timestamp("start"),
        PropertyDecl::timestamp("end").optional(),
        PropertyDecl::boolean("all_day").default(DefaultValue::Boolean(false)),
        PropertyDecl::string("timezone").optional(),
        PropertyDecl::entity("location", EntityKind::Location).optional(),
    ],
};

static PROFILE: EntitySchema = EntitySchema {
    kind: EntityKind::Profile,
    properties: &[
        PropertyDecl::string("author"),
        PropertyDecl::string("first_name").optional(),
        PropertyDecl::string("last_name").optional(),
        PropertyDecl::string("image_url").optional(),
        PropertyDecl::string("bio").optional(),
        PropertyDecl::string("birthday").optional(),
        PropertyDecl::string("gender").optional(),
        PropertyDecl::string("location").optional(),
        PropertyDecl::boolean("searchable").default(DefaultValue::Boolean(true)),
        PropertyDecl::boolean("public").default(DefaultValue::Boolean(false)),
        PropertyDecl::boolean("nsfw").default(DefaultValue::Boolean(false)),
        PropertyDecl::string("tag_string").optional(),
    ],
};

static PERSON: EntitySchema = EntitySchema {
    kind: EntityKind::Person,
    properties: &[
        PropertyDecl::string("guid"),
        PropertyDecl::string("author").alias("diaspora_id"),
        PropertyDecl::string("url"),
        PropertyDecl::string("exported_key"),
        PropertyDecl::entity("profile", EntityKind::Profile),
    ],
};

static PHOTO: EntitySchema = EntitySchema {
    kind: EntityKind::Photo,
    properties: &[
        PropertyDecl::string("author"),
        PropertyDecl::string("guid"),
        PropertyDecl::boolean("public").default(DefaultValue::Boolean(false)),
        PropertyDecl::timestamp("created_at"),
        PropertyDecl::string("remote_photo_path"),
        PropertyDecl::string("remote_photo_name"),
        PropertyDecl::string("text").optional(),
        PropertyDecl::string("status_message_guid").optional(),
        PropertyDecl::integer("height"),
        PropertyDecl::integer("width"),
    ],
};

static STATUS_MESSAGE: EntitySchema = EntitySchema {
    kind: EntityKind::StatusMessage,
    properties: &[
        PropertyDecl::string("author"),
        PropertyDecl::string("guid"),
        PropertyDecl::timestamp("created_at"),
        PropertyDecl::string("text").alias("raw_message"),
        PropertyDecl::entities("photos", EntityKind::Photo),
        PropertyDecl::entity("location", EntityKind::Location).optional(),
        PropertyDecl::entity("event", EntityKind::Event).optional(),
        PropertyDecl::boolean("public").default(DefaultValue::Boolean(false)),
        PropertyDecl::string("provider_display_name").optional(),
    ],
};

static COMMENT: EntitySchema = EntitySchema {
    kind: EntityKind::Comment,
    properties: &[
        PropertyDecl::string("author"),
        PropertyDecl::string("guid"),
        PropertyDecl::string("parent_guid"),
        PropertyDecl::string("parent_type").default(DefaultValue::String("Post")),
        PropertyDecl::string("text"),
        PropertyDecl::timestamp("created_at").optional(),
    ],
};

static LIKE: EntitySchema = EntitySchema {
    kind: EntityKind::Like,
    properties: &[
        PropertyDecl::string("author"),
        PropertyDecl::string("guid"),
        PropertyDecl::string("parent_guid"),
        PropertyDecl::string("parent_type"),
        PropertyDecl::boolean("positive"),
    ],
};

static RESHARE: EntitySchema = EntitySchema {
    kind: EntityKind::Reshare,
    properties: &[
        PropertyDecl::string("root_author"),
        PropertyDecl::string("root_guid"),
        PropertyDecl::string("author"),
        PropertyDecl::string("guid"),
        PropertyDecl::boolean("public").default(DefaultValue::Boolean(true)),
        PropertyDecl::timestamp("created_at"),
        PropertyDecl::string("provider_display_name").optional(),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_schema() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.schema().kind, kind);
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EntityKind::from_name("post"), None);
    }

    #[test]
    fn wire_names_are_unique_within_a_schema() {
        for kind in EntityKind::ALL {
            let props = kind.schema().properties;
            for (i, a) in props.iter().enumerate() {
                for b in &props[i + 1..] {
                    assert_ne!(a.wire_name(), b.wire_name(), "{kind}");
                }
            }
        }
    }
}
