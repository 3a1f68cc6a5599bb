//! Shared test helpers for salmon tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use diaspora_crypto::PrivateKey;
use diaspora_entities::{Entity, EntityKind, PropertyValue};
use diaspora_salmon::signature_subject;
use diaspora_types::{Element, Timestamp};

pub const TEST_KEY_BITS: usize = 1024;
pub const AUTHOR: &str = "alice@pod.example.org";

/// The author's key pair, shared by every test in the binary.
pub fn author_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| PrivateKey::generate(TEST_KEY_BITS).unwrap())
}

/// A recipient's key pair.
pub fn recipient_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| PrivateKey::generate(TEST_KEY_BITS).unwrap())
}

pub fn test_entity() -> Entity {
    Entity::new(EntityKind::TestEntity, [("test", PropertyValue::from("asdf"))]).unwrap()
}

pub fn status_message() -> Entity {
    let values: Vec<(&str, PropertyValue)> = vec![
        ("author", AUTHOR.into()),
        ("guid", "0123456789abcdef0123".into()),
        ("created_at", Timestamp::from_unix(1_450_000_000).unwrap().into()),
        ("text", "hello <b>fediverse</b>".into()),
        ("public", false.into()),
    ];
    Entity::new(EntityKind::StatusMessage, values).unwrap()
}

/// Sets the text of one of the envelope's `me:` children.
pub fn set_field(env: &mut Element, name: &str, value: &str) {
    env.child_mut(name).unwrap().set_text(value);
}

/// Signs the envelope's current fields again, as an attacker holding `key`
/// would after tampering with them.
pub fn re_sign(env: &mut Element, key: &PrivateKey) {
    let data = env.child("data").unwrap();
    let payload = URL_SAFE.decode(data.text()).unwrap();
    let subject = signature_subject(
        &payload,
        data.attribute("type").unwrap(),
        env.child("encoding").unwrap().text(),
        env.child("alg").unwrap().text(),
    );
    let sig = key.sign(subject.as_bytes()).unwrap();
    set_field(env, "sig", &URL_SAFE.encode(sig));
}
