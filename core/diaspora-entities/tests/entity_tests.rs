mod common;

use common::*;
use diaspora_entities::{EntityError, EntityKind, PropertyKind, PropertyValue};

// ── Construction ─────────────────────────────────────────────────

#[test]
fn construct_test_entity() {
    let e = test_entity("asdf");
    assert_eq!(e.kind(), EntityKind::TestEntity);
    assert_eq!(e.get_str("test"), Some("asdf"));
}

#[test]
fn missing_properties_are_reported_together() {
    let err = try_build(
        EntityKind::Like,
        vec![("author", PropertyValue::from(AUTHOR))],
    )
    .unwrap_err();

    assert_eq!(
        err,
        EntityError::MissingProperties {
            kind: EntityKind::Like,
            properties: vec!["guid", "parent_guid", "parent_type", "positive"],
        }
    );
}

#[test]
fn missing_message_lists_every_property() {
    let err = try_build(EntityKind::Location, Vec::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "location: missing required properties: address, lat, lng"
    );
}

#[test]
fn optional_properties_may_be_absent() {
    let e = build(
        EntityKind::Comment,
        vec![
            ("author", AUTHOR.into()),
            ("guid", GUID.into()),
            ("parent_guid", GUID.into()),
            ("text", "hi".into()),
        ],
    );
    assert!(!e.has("created_at"));
    assert_eq!(e.get_timestamp("created_at"), None);
}

#[test]
fn string_default_is_substituted() {
    let e = comment();
    assert_eq!(e.get_str("parent_type"), Some("Post"));
}

#[test]
fn type_mismatch_is_rejected() {
    let err = try_build(
        EntityKind::TestEntity,
        vec![("test", PropertyValue::Integer(1))],
    )
    .unwrap_err();

    assert_eq!(
        err,
        EntityError::TypeMismatch {
            kind: EntityKind::TestEntity,
            property: "test",
            expected: PropertyKind::String,
            found: "integer".into(),
        }
    );
}

#[test]
fn nested_entity_of_wrong_kind_is_a_type_mismatch() {
    let err = try_build(
        EntityKind::StatusMessage,
        vec![
            ("author", AUTHOR.into()),
            ("guid", GUID.into()),
            ("created_at", ts(0).into()),
            ("text", "x".into()),
            ("location", test_entity("nope").into()),
        ],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        EntityError::TypeMismatch { property: "location", .. }
    ));
    assert!(err.to_string().contains("entity(location)"));
    assert!(err.to_string().contains("entity(test_entity)"));
}

#[test]
fn entity_list_with_wrong_kind_is_a_type_mismatch() {
    let err = try_build(
        EntityKind::TestNestedEntity,
        vec![
            ("asdf", PropertyValue::from("x")),
            ("multi", vec![location()].into()),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, EntityError::TypeMismatch { property: "multi", .. }));
}

#[test]
fn unknown_property_is_rejected() {
    let err = try_build(
        EntityKind::TestEntity,
        vec![
            ("test", PropertyValue::from("x")),
            ("bogus", PropertyValue::from("y")),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err,
        EntityError::UnknownProperty {
            kind: EntityKind::TestEntity,
            property: "bogus".into(),
        }
    );
}

#[test]
fn absent_entity_list_is_empty() {
    let e = build(
        EntityKind::TestNestedEntity,
        vec![("asdf", "x".into())],
    );
    assert!(e.get_entities("multi").is_empty());
    assert!(e.get_entity("test").is_none());
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn typed_accessors() {
    let photo = photo("photoguid0000000001");
    assert_eq!(photo.get_integer("height"), Some(480));
    assert_eq!(photo.get_bool("public"), Some(false));
    assert_eq!(photo.get_timestamp("created_at"), Some(ts(1_450_000_000)));
    assert_eq!(photo.author(), Some(AUTHOR));
    assert_eq!(photo.guid(), Some("photoguid0000000001"));

    // Wrong type yields None rather than a coerced value.
    assert_eq!(photo.get_str("height"), None);
    assert_eq!(photo.get_integer("author"), None);
}

#[test]
fn nested_accessors() {
    let message = status_message();
    let location = message.get_entity("location").unwrap();
    assert_eq!(location.get_str("lat"), Some("48.208174"));

    let photos = message.get_entities("photos");
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[1].guid(), Some("photoguid0000000002"));

    let event = message.get_entity("event").unwrap();
    assert_eq!(
        event.get_entity("location").unwrap().get_str("address"),
        Some("Vienna, Austria")
    );
}

#[test]
fn iter_skips_absent_properties() {
    let e = build(
        EntityKind::TestDefaultEntity,
        vec![("test1", "a".into())],
    );
    let names: Vec<_> = e.iter().map(|(decl, _)| decl.name).collect();
    assert_eq!(names, vec!["test1", "test3", "test4"]);
}

// ── Kinds ────────────────────────────────────────────────────────

#[test]
fn kind_names_are_snake_case() {
    assert_eq!(EntityKind::StatusMessage.name(), "status_message");
    assert_eq!(EntityKind::TestDefaultEntity.to_string(), "test_default_entity");
    assert_eq!("reshare".parse::<EntityKind>().unwrap(), EntityKind::Reshare);
}

#[test]
fn unknown_kind_name_fails() {
    let err = "post".parse::<EntityKind>().unwrap_err();
    assert_eq!(err, EntityError::UnknownEntityType("post".into()));
}

#[test]
fn schema_lookup() {
    let schema = EntityKind::Person.schema();
    let author = schema.property("author").unwrap();
    assert_eq!(author.wire_name(), "diaspora_id");
    assert_eq!(
        schema.property("profile").unwrap().kind,
        PropertyKind::Entity(EntityKind::Profile)
    );
    let required: Vec<_> = schema.required().collect();
    assert_eq!(required, vec!["guid", "author", "url", "exported_key", "profile"]);
}

#[test]
fn relayable_kinds() {
    assert!(EntityKind::Comment.is_relayable());
    assert!(EntityKind::Like.is_relayable());
    assert!(!EntityKind::StatusMessage.is_relayable());
}
