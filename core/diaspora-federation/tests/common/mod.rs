//! In-memory host application for the federation tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use diaspora_crypto::PrivateKey;
use diaspora_entities::{Entity, EntityKind, PropertyValue};
use diaspora_federation::{
    events, Callbacks, Environment, Federation, FederationBuilder, FederationConfig, HCard, WebFinger,
};
use diaspora_types::Timestamp;

pub const TEST_KEY_BITS: usize = 1024;
pub const ALICE: &str = "alice@pod.example.org";
pub const BOB: &str = "bob@other.example.net";
pub const ALICE_GUID: &str = "aliceguid0123456789";
pub const POST_GUID: &str = "0123456789abcdef0123";
pub const LOCAL_POST_GUID: &str = "localpost0123456789";

pub fn alice_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| PrivateKey::generate(TEST_KEY_BITS).unwrap())
}

pub fn bob_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| PrivateKey::generate(TEST_KEY_BITS).unwrap())
}

pub fn test_config() -> FederationConfig {
    FederationConfig::new("https://pod.example.org/").with_environment(Environment::Test)
}

/// Records everything the library hands to the host.
///
/// Alice is local (private key known), Bob is remote (public key only).
/// The host knows Bob's post [`POST_GUID`] and Alice's post
/// [`LOCAL_POST_GUID`].
#[derive(Clone, Default)]
pub struct Host {
    pub saved: Arc<Mutex<Vec<Entity>>>,
    pub people: Arc<Mutex<Vec<Entity>>>,
    pub queued_public: Arc<Mutex<Vec<String>>>,
    pub queued_private: Arc<Mutex<Vec<(String, String)>>>,
    /// Makes `save_entity_after_receive` fail.
    pub read_only: bool,
}

impl Host {
    pub fn saved(&self) -> Vec<Entity> {
        self.saved.lock().unwrap().clone()
    }

    /// A builder with every handler registered.
    pub fn builder(&self) -> FederationBuilder {
        let mut builder = FederationBuilder::new(test_config());
        self.register_all(builder.callbacks_mut());
        builder
    }

    pub fn callbacks(&self) -> Callbacks {
        let mut callbacks = Callbacks::federation();
        self.register_all(&mut callbacks);
        callbacks
    }

    pub fn federation(&self) -> Federation {
        self.builder().build().unwrap()
    }

    pub fn register_all(&self, callbacks: &mut Callbacks) {
        let private_keys: HashMap<&str, PrivateKey> = [(ALICE, alice_key().clone())].into();
        let public_keys: HashMap<&str, _> = [
            (ALICE, alice_key().public_key()),
            (BOB, bob_key().public_key()),
        ]
        .into();
        let post_author = |(parent_type, guid): (String, String)| match guid.as_str() {
            POST_GUID if parent_type == "Post" => Some(BOB),
            LOCAL_POST_GUID if parent_type == "Post" => Some(ALICE),
            _ => None,
        };

        callbacks
            .on::<events::FetchPersonForWebfinger, _>(|id| {
                Ok((id == ALICE).then(alice_webfinger))
            })
            .unwrap()
            .on::<events::FetchPersonForHcard, _>(|guid| Ok((guid == ALICE_GUID).then(alice_hcard)))
            .unwrap();

        let people = Arc::clone(&self.people);
        callbacks
            .on::<events::SavePersonAfterWebfinger, _>(move |person| {
                people.lock().unwrap().push(person);
                Ok(())
            })
            .unwrap();

        let keys = private_keys.clone();
        callbacks
            .on::<events::FetchPrivateKeyByDiasporaId, _>(move |id| {
                Ok(keys.get(id.as_str()).cloned())
            })
            .unwrap();
        callbacks
            .on::<events::FetchAuthorPrivateKeyByEntityGuid, _>(move |parent| {
                Ok(post_author(parent).and_then(|author| private_keys.get(author).cloned()))
            })
            .unwrap();

        let keys = public_keys.clone();
        callbacks
            .on::<events::FetchPublicKeyByDiasporaId, _>(move |id| {
                Ok(keys.get(id.as_str()).cloned())
            })
            .unwrap();
        callbacks
            .on::<events::FetchAuthorPublicKeyByEntityGuid, _>(move |parent| {
                Ok(post_author(parent).and_then(|author| public_keys.get(author).cloned()))
            })
            .unwrap();
        callbacks
            .on::<events::EntityAuthorIsLocal, _>(move |parent| {
                Ok(post_author(parent) == Some(ALICE))
            })
            .unwrap();
        callbacks
            .on::<events::FetchEntityAuthorIdByGuid, _>(move |parent| {
                Ok(post_author(parent).map(str::to_string))
            })
            .unwrap();

        let queued = Arc::clone(&self.queued_public);
        callbacks
            .on::<events::QueuePublicReceive, _>(move |xml| {
                queued.lock().unwrap().push(xml);
                Ok(())
            })
            .unwrap();
        let queued = Arc::clone(&self.queued_private);
        callbacks
            .on::<events::QueuePrivateReceive, _>(move |(guid, xml)| {
                if guid != ALICE_GUID {
                    return Ok(false);
                }
                queued.lock().unwrap().push((guid, xml));
                Ok(true)
            })
            .unwrap();

        let saved = Arc::clone(&self.saved);
        let read_only = self.read_only;
        callbacks
            .on::<events::SaveEntityAfterReceive, _>(move |entity| {
                if read_only {
                    return Err("database is read-only".into());
                }
                saved.lock().unwrap().push(entity);
                Ok(())
            })
            .unwrap();
    }
}

pub fn alice_webfinger() -> WebFinger {
    WebFinger {
        acct_uri: format!("acct:{ALICE}"),
        alias_url: "https://pod.example.org/people/aliceguid0123456789".into(),
        hcard_url: "https://pod.example.org/hcard/users/aliceguid0123456789".into(),
        seed_url: "https://pod.example.org/".into(),
        profile_url: "https://pod.example.org/u/alice".into(),
        atom_url: "https://pod.example.org/public/alice.atom".into(),
        salmon_url: "https://pod.example.org/receive/users/aliceguid0123456789".into(),
        guid: ALICE_GUID.into(),
        public_key: alice_key().public_key().to_pem().unwrap(),
    }
}

pub fn alice_hcard() -> HCard {
    HCard {
        guid: ALICE_GUID.into(),
        nickname: "alice".into(),
        full_name: "Alice Smith".into(),
        url: "https://pod.example.org/".into(),
        searchable: true,
        first_name: "Alice".into(),
        last_name: "Smith".into(),
        public_key: alice_key().public_key().to_pem().unwrap(),
        ..HCard::default()
    }
}

pub fn build(kind: EntityKind, values: Vec<(&str, PropertyValue)>) -> Entity {
    Entity::new(kind, values).unwrap()
}

pub fn status_message(author: &str) -> Entity {
    build(
        EntityKind::StatusMessage,
        vec![
            ("author", author.into()),
            ("guid", POST_GUID.into()),
            ("created_at", Timestamp::from_unix(1_450_000_000).unwrap().into()),
            ("text", "hello fediverse".into()),
            ("public", true.into()),
        ],
    )
}

pub fn comment(author: &str) -> Entity {
    build(
        EntityKind::Comment,
        vec![
            ("author", author.into()),
            ("guid", "commentguid00000001".into()),
            ("parent_guid", POST_GUID.into()),
            ("text", "nice post".into()),
        ],
    )
}

pub fn person(author: &str) -> Entity {
    let profile = build(
        EntityKind::Profile,
        vec![("author", author.into()), ("first_name", "Bob".into())],
    );
    build(
        EntityKind::Person,
        vec![
            ("guid", "bobguid000000000001".into()),
            ("author", author.into()),
            ("url", "https://other.example.net/".into()),
            ("exported_key", bob_key().public_key().to_pem().unwrap().into()),
            ("profile", profile.into()),
        ],
    )
}
