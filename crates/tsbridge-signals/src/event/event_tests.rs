#![allow(non_snake_case)]

use super::*;
use serde_json::json;
use test_case::test_case;

#[test_case("set", EventType::Set)]
#[test_case("REPLACE", EventType::Replace)]
#[test_case("Insert", EventType::Insert)]
#[test_case("remove", EventType::Remove)]
#[test_case("snapshot", EventType::Snapshot)]
fn EventType___parse___case_insensitive(raw: &str, expected: EventType) {
    assert_eq!(EventType::parse(raw), Some(expected));
}

#[test]
fn EventType___parse_unknown___none() {
    assert_eq!(EventType::parse("upsert"), None);
}

#[test]
fn EventType___is_inbound___excludes_outbound_types() {
    assert!(EventType::Set.is_inbound());
    assert!(!EventType::Snapshot.is_inbound());
    assert!(!EventType::Reject.is_inbound());
}

#[test]
fn StateEvent___from_json_set___decodes_fields() {
    let event = StateEvent::from_json(&json!({"id": "e1", "type": "set", "value": 42})).unwrap();

    assert_eq!(event.id, "e1");
    assert_eq!(event.event_type, EventType::Set);
    assert_eq!(event.value, Some(json!(42)));
    assert_eq!(event.accepted, None);
}

#[test]
fn StateEvent___from_json_null_value___keeps_present_null() {
    let event = StateEvent::from_json(&json!({"id": "e1", "type": "set", "value": null})).unwrap();

    assert_eq!(event.value, Some(Value::Null));
}

#[test]
fn StateEvent___from_json_insert___decodes_position() {
    let event = StateEvent::from_json(
        &json!({"id": "e1", "type": "insert", "value": "a", "position": "LAST"}),
    )
    .unwrap();

    assert_eq!(event.position, Some(InsertPosition::Last));
}

#[test]
fn StateEvent___from_json_remove___decodes_entry_id() {
    let entry = Uuid::new_v4();

    let event = StateEvent::from_json(
        &json!({"id": "e1", "type": "remove", "entryId": entry.to_string()}),
    )
    .unwrap();

    assert_eq!(event.entry_id, Some(entry));
}

#[test]
fn StateEvent___from_json_missing_id___missing_field() {
    let result = StateEvent::from_json(&json!({"type": "set", "value": 1}));

    assert_eq!(result, Err(SignalError::MissingField("id".into())));
}

#[test]
fn StateEvent___from_json_missing_type___invalid_event_type() {
    let result = StateEvent::from_json(&json!({"id": "e1", "value": 1}));

    assert!(matches!(result, Err(SignalError::InvalidEventType(_))));
}

#[test]
fn StateEvent___from_json_unknown_type___invalid_event_type_lists_names() {
    let result = StateEvent::from_json(&json!({"id": "e1", "type": "upsert"}));

    match result {
        Err(SignalError::InvalidEventType(message)) => {
            assert!(message.contains("upsert"));
            assert!(message.contains("replace"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn StateEvent___from_json_unknown_position___invalid_event_type() {
    let result = StateEvent::from_json(
        &json!({"id": "e1", "type": "insert", "value": 1, "position": "middle"}),
    );

    assert!(matches!(result, Err(SignalError::InvalidEventType(_))));
}

#[test]
fn StateEvent___from_json_malformed_entry_id___serialization() {
    let result = StateEvent::from_json(&json!({"id": "e1", "type": "remove", "entryId": "nope"}));

    assert!(matches!(result, Err(SignalError::Serialization(_))));
}

#[test]
fn StateEvent___from_json_not_object___serialization() {
    let result = StateEvent::from_json(&json!([1, 2]));

    assert!(matches!(result, Err(SignalError::Serialization(_))));
}

#[test]
fn StateEvent___to_json_response___carries_acceptance() {
    let event = StateEvent::new("e1", EventType::Replace)
        .with_value(json!(2))
        .rejected(Some("too large".into()));

    assert_eq!(
        event.to_json(),
        json!({
            "id": "e1",
            "type": "replace",
            "value": 2,
            "accepted": false,
            "validationError": "too large"
        })
    );
}

#[test]
fn StateEvent___to_json_snapshot___entries_in_order() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let mut event = StateEvent::new("list", EventType::Snapshot).accepted();
    event.entries = Some(vec![
        EntrySnapshot {
            id: first,
            prev: None,
            next: Some(second),
            value: json!("a"),
        },
        EntrySnapshot {
            id: second,
            prev: Some(first),
            next: None,
            value: json!("b"),
        },
    ]);

    let json = event.to_json();

    assert_eq!(json["accepted"], json!(true));
    assert_eq!(
        json["entries"],
        json!([
            {"id": first.to_string(), "next": second.to_string(), "value": "a"},
            {"id": second.to_string(), "prev": first.to_string(), "value": "b"}
        ])
    );
}

#[test]
fn StateEvent___to_json_then_from_json___same_event() {
    let event = StateEvent::insert(json!({"name": "John"}), InsertPosition::Last);

    let decoded = StateEvent::from_json(&event.to_json()).unwrap();

    assert_eq!(decoded, event);
}

#[test]
fn StateEvent___required_value_absent___missing_field() {
    let event = StateEvent::new("e1", EventType::Set);

    assert_eq!(
        event.required_value(),
        Err(SignalError::MissingField("value".into()))
    );
}
