mod common;

use common::*;
use diaspora_federation::{events, CallbackError, Callbacks, EventName};
use pretty_assertions::assert_eq;

fn registry() -> Callbacks {
    Callbacks::new([EventName::QueuePublicReceive, EventName::QueuePrivateReceive])
}

// ── Event names ──────────────────────────────────────────────────

#[test]
fn twelve_federation_events() {
    assert_eq!(EventName::ALL.len(), 12);
    let names: Vec<_> = EventName::ALL.iter().map(|e| e.as_str()).collect();
    assert!(names.contains(&"entity_author_is_local?"));
    assert!(names.contains(&"save_entity_after_receive"));
}

#[test]
fn unknown_event_name_fails_to_parse() {
    let err = "fetch_everything".parse::<EventName>().unwrap_err();
    assert!(matches!(err, CallbackError::UnknownEvent(name) if name == "fetch_everything"));
}

// ── Registration ─────────────────────────────────────────────────

#[test]
fn handler_for_undeclared_event_is_rejected() {
    let mut callbacks = registry();
    let result = callbacks.on::<events::SaveEntityAfterReceive, _>(|_| Ok(()));
    assert!(matches!(result, Err(CallbackError::UnknownEvent(name)) if name == "save_entity_after_receive"));
}

#[test]
fn second_handler_is_rejected() {
    let mut callbacks = registry();
    callbacks.on::<events::QueuePublicReceive, _>(|_| Ok(())).unwrap();
    let result = callbacks.on::<events::QueuePublicReceive, _>(|_| Ok(()));
    assert!(matches!(
        result,
        Err(CallbackError::DuplicateHandler(EventName::QueuePublicReceive))
    ));
}

#[test]
fn completeness_tracks_registered_handlers() {
    let mut callbacks = registry();
    assert!(!callbacks.definition_complete());
    assert_eq!(
        callbacks.missing_handlers(),
        vec![EventName::QueuePublicReceive, EventName::QueuePrivateReceive]
    );

    callbacks.on::<events::QueuePublicReceive, _>(|_| Ok(())).unwrap();
    assert!(callbacks.is_registered(EventName::QueuePublicReceive));
    assert_eq!(callbacks.missing_handlers(), vec![EventName::QueuePrivateReceive]);

    callbacks.on::<events::QueuePrivateReceive, _>(|_| Ok(true)).unwrap();
    assert!(callbacks.definition_complete());
    assert!(callbacks.missing_handlers().is_empty());
}

#[test]
fn federation_registry_expects_every_event() {
    let callbacks = Callbacks::federation();
    assert_eq!(callbacks.missing_handlers(), EventName::ALL.to_vec());
}

#[test]
fn test_host_registers_every_event() {
    assert!(Host::default().callbacks().definition_complete());
}

// ── Trigger ──────────────────────────────────────────────────────

#[test]
fn trigger_returns_handler_result() {
    let mut callbacks = registry();
    callbacks
        .on::<events::QueuePrivateReceive, _>(|(guid, _xml)| Ok(guid == "known"))
        .unwrap();

    let known = callbacks
        .trigger::<events::QueuePrivateReceive>(("known".into(), "<xml/>".into()))
        .unwrap();
    let unknown = callbacks
        .trigger::<events::QueuePrivateReceive>(("other".into(), "<xml/>".into()))
        .unwrap();
    assert!(known);
    assert!(!unknown);
}

#[test]
fn trigger_without_handler_is_handler_missing() {
    let callbacks = registry();
    let result = callbacks.trigger::<events::QueuePublicReceive>("<xml/>".into());
    assert!(matches!(
        result,
        Err(CallbackError::HandlerMissing(EventName::QueuePublicReceive))
    ));
}

#[test]
fn trigger_of_undeclared_event_is_unknown() {
    let callbacks = registry();
    let result = callbacks.trigger::<events::FetchPublicKeyByDiasporaId>(ALICE.into());
    assert!(matches!(result, Err(CallbackError::UnknownEvent(_))));
}

#[test]
fn handler_error_keeps_its_source() {
    let mut callbacks = registry();
    callbacks
        .on::<events::QueuePublicReceive, _>(|_| Err("queue is full".into()))
        .unwrap();

    let err = callbacks
        .trigger::<events::QueuePublicReceive>("<xml/>".into())
        .unwrap_err();
    assert_eq!(err.to_string(), "queue_public_receive handler failed: queue is full");
    match err {
        CallbackError::Handler { event, source } => {
            assert_eq!(event, EventName::QueuePublicReceive);
            assert_eq!(source.to_string(), "queue is full");
        }
        other => panic!("expected Handler error, got {other:?}"),
    }
}
