//! Fixtures shared by the entity integration tests.

#![allow(dead_code)]

use diaspora_entities::{Entity, EntityKind, EntityResult, PropertyValue};
use diaspora_types::Timestamp;

pub const AUTHOR: &str = "alice@pod.example.org";
pub const GUID: &str = "0123456789abcdef0123";

pub fn ts(seconds: i64) -> Timestamp {
    Timestamp::from_unix(seconds).unwrap()
}

pub fn try_build(kind: EntityKind, values: Vec<(&str, PropertyValue)>) -> EntityResult<Entity> {
    Entity::new(kind, values)
}

pub fn build(kind: EntityKind, values: Vec<(&str, PropertyValue)>) -> Entity {
    try_build(kind, values).unwrap()
}

pub fn test_entity(value: &str) -> Entity {
    build(EntityKind::TestEntity, vec![("test", value.into())])
}

pub fn location() -> Entity {
    build(
        EntityKind::Location,
        vec![
            ("address", "Vienna, Austria".into()),
            ("lat", "48.208174".into()),
            ("lng", "16.373819".into()),
        ],
    )
}

pub fn event() -> Entity {
    build(
        EntityKind::Event,
        vec![
            ("author", AUTHOR.into()),
            ("guid", "eventguid0123456789".into()),
            ("summary", "Federation meetup".into()),
            ("description", "Bring your own pod".into()),
            ("start", ts(1_500_000_000).into()),
            ("end", ts(1_500_003_600).into()),
            ("timezone", "Europe/Vienna".into()),
            ("location", location().into()),
        ],
    )
}

pub fn profile() -> Entity {
    build(
        EntityKind::Profile,
        vec![
            ("author", AUTHOR.into()),
            ("first_name", "Alice".into()),
            ("last_name", "Smith".into()),
            ("image_url", "https://pod.example.org/a.png".into()),
            ("bio", "federated".into()),
            ("tag_string", "#rust #xml".into()),
        ],
    )
}

pub fn person() -> Entity {
    build(
        EntityKind::Person,
        vec![
            ("guid", GUID.into()),
            ("author", AUTHOR.into()),
            ("url", "https://pod.example.org/".into()),
            ("exported_key", "-----BEGIN PUBLIC KEY-----".into()),
            ("profile", profile().into()),
        ],
    )
}

pub fn photo(guid: &str) -> Entity {
    build(
        EntityKind::Photo,
        vec![
            ("author", AUTHOR.into()),
            ("guid", guid.into()),
            ("created_at", ts(1_450_000_000).into()),
            ("remote_photo_path", "https://pod.example.org/uploads/".into()),
            ("remote_photo_name", "cat.jpg".into()),
            ("status_message_guid", GUID.into()),
            ("height", PropertyValue::Integer(480)),
            ("width", PropertyValue::Integer(640)),
        ],
    )
}

pub fn status_message() -> Entity {
    build(
        EntityKind::StatusMessage,
        vec![
            ("author", AUTHOR.into()),
            ("guid", GUID.into()),
            ("created_at", ts(1_450_000_100).into()),
            ("text", "hello fediverse".into()),
            (
                "photos",
                vec![photo("photoguid0000000001"), photo("photoguid0000000002")].into(),
            ),
            ("location", location().into()),
            ("event", event().into()),
            ("public", true.into()),
        ],
    )
}

pub fn comment() -> Entity {
    build(
        EntityKind::Comment,
        vec![
            ("author", AUTHOR.into()),
            ("guid", "commentguid00000001".into()),
            ("parent_guid", GUID.into()),
            ("text", "nice post".into()),
            ("created_at", ts(1_450_000_200).into()),
        ],
    )
}

pub fn like() -> Entity {
    build(
        EntityKind::Like,
        vec![
            ("author", AUTHOR.into()),
            ("guid", "likeguid00000000001".into()),
            ("parent_guid", GUID.into()),
            ("parent_type", "Post".into()),
            ("positive", true.into()),
        ],
    )
}

pub fn reshare() -> Entity {
    build(
        EntityKind::Reshare,
        vec![
            ("root_author", "bob@other.example.net".into()),
            ("root_guid", GUID.into()),
            ("author", AUTHOR.into()),
            ("guid", "reshareguid00000001".into()),
            ("created_at", ts(1_450_000_300).into()),
        ],
    )
}

/// A valid sample of every kind.
pub fn sample(kind: EntityKind) -> Entity {
    match kind {
        EntityKind::TestEntity => test_entity("asdf"),
        EntityKind::TestDefaultEntity => build(
            EntityKind::TestDefaultEntity,
            vec![("test1", "a".into()), ("test2", "b".into())],
        ),
        EntityKind::TestNestedEntity => build(
            EntityKind::TestNestedEntity,
            vec![
                ("asdf", "outer".into()),
                ("test", test_entity("inner").into()),
                ("multi", vec![test_entity("one"), test_entity("two")].into()),
            ],
        ),
        EntityKind::Location => location(),
        EntityKind::Event => event(),
        EntityKind::Profile => profile(),
        EntityKind::Person => person(),
        EntityKind::Photo => photo("photoguid0000000001"),
        EntityKind::StatusMessage => status_message(),
        EntityKind::Comment => comment(),
        EntityKind::Like => like(),
        EntityKind::Reshare => reshare(),
    }
}
