//! State-event wire format
//!
//! Every interaction with a signal is a JSON object:
//!
//! ```json
//! {"id": "…", "type": "insert", "value": {"name": "John"}, "position": "last"}
//! ```
//!
//! | type | direction | fields |
//! |------|-----------|--------|
//! | `snapshot` | outbound | `value` (value signal) or `entries` (list signal) |
//! | `set` | inbound | `value`, optional `entryId` |
//! | `replace` | inbound | `expected`, `value`, optional `entryId` |
//! | `insert` | inbound | `value`, `position` |
//! | `remove` | inbound | `entryId` |
//! | `reject` | outbound | |
//!
//! Responses echo the event with `accepted` and, when a validator refused
//! it, `validationError`.

use crate::error::{SignalError, SignalResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// JSON field names
pub mod field {
    pub const ID: &str = "id";
    pub const TYPE: &str = "type";
    pub const VALUE: &str = "value";
    pub const EXPECTED: &str = "expected";
    pub const ENTRY_ID: &str = "entryId";
    pub const POSITION: &str = "position";
    pub const ACCEPTED: &str = "accepted";
    pub const VALIDATION_ERROR: &str = "validationError";
    pub const ENTRIES: &str = "entries";
}

/// Kind of a state event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Snapshot,
    Set,
    Replace,
    Insert,
    Remove,
    Reject,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Snapshot,
        EventType::Set,
        EventType::Replace,
        EventType::Insert,
        EventType::Remove,
        EventType::Reject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Snapshot => "snapshot",
            EventType::Set => "set",
            EventType::Replace => "replace",
            EventType::Insert => "insert",
            EventType::Remove => "remove",
            EventType::Reject => "reject",
        }
    }

    /// Case-insensitive lookup by wire name
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw))
    }

    /// Types a client may submit
    pub fn is_inbound(&self) -> bool {
        !matches!(self, EventType::Snapshot | EventType::Reject)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an `insert` places the new entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertPosition {
    First,
    Last,
    Before,
    After,
}

impl InsertPosition {
    pub const ALL: [InsertPosition; 4] = [
        InsertPosition::First,
        InsertPosition::Last,
        InsertPosition::Before,
        InsertPosition::After,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsertPosition::First => "first",
            InsertPosition::Last => "last",
            InsertPosition::Before => "before",
            InsertPosition::After => "after",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for InsertPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a list snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Uuid>,

    #[serde(default)]
    pub value: Value,
}

/// A decoded state event
#[derive(Debug, Clone, PartialEq)]
pub struct StateEvent {
    pub id: String,
    pub event_type: EventType,
    /// Present (possibly JSON `null`) when the event carried a `value`
    pub value: Option<Value>,
    pub expected: Option<Value>,
    pub entry_id: Option<Uuid>,
    pub position: Option<InsertPosition>,
    pub accepted: Option<bool>,
    pub validation_error: Option<String>,
    pub entries: Option<Vec<EntrySnapshot>>,
}

impl StateEvent {
    pub fn new(id: impl Into<String>, event_type: EventType) -> Self {
        Self {
            id: id.into(),
            event_type,
            value: None,
            expected: None,
            entry_id: None,
            position: None,
            accepted: None,
            validation_error: None,
            entries: None,
        }
    }

    /// A fresh event id
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn set(value: Value) -> Self {
        Self::new(Self::generate_id(), EventType::Set).with_value(value)
    }

    pub fn replace(expected: Value, value: Value) -> Self {
        let mut event = Self::new(Self::generate_id(), EventType::Replace).with_value(value);
        event.expected = Some(expected);
        event
    }

    pub fn insert(value: Value, position: InsertPosition) -> Self {
        let mut event = Self::new(Self::generate_id(), EventType::Insert).with_value(value);
        event.position = Some(position);
        event
    }

    pub fn remove(entry_id: Uuid) -> Self {
        Self::new(Self::generate_id(), EventType::Remove).for_entry(entry_id)
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Target an entry of a list signal
    pub fn for_entry(mut self, entry_id: Uuid) -> Self {
        self.entry_id = Some(entry_id);
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted == Some(true)
    }

    /// Decode an event, classifying what is wrong with a malformed one
    pub fn from_json(json: &Value) -> SignalResult<Self> {
        let object = json.as_object().ok_or_else(|| {
            SignalError::Serialization("a state event must be a JSON object".to_string())
        })?;

        let id = match object.get(field::ID) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => return Err(SignalError::MissingField(field::ID.into())),
            Some(other) => other.to_string(),
        };

        let event_type = match object.get(field::TYPE).and_then(Value::as_str) {
            Some(raw) => EventType::parse(raw).ok_or_else(|| {
                SignalError::InvalidEventType(format!(
                    "{raw}; expected one of {}",
                    names(EventType::ALL.iter().map(EventType::as_str))
                ))
            })?,
            None => {
                return Err(SignalError::InvalidEventType(format!(
                    "missing event type; expected one of {}",
                    names(EventType::ALL.iter().map(EventType::as_str))
                )));
            }
        };

        let position = match object.get(field::POSITION) {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                raw.as_str()
                    .and_then(InsertPosition::parse)
                    .ok_or_else(|| {
                        SignalError::InvalidEventType(format!(
                            "invalid insert position {raw}; expected one of {}",
                            names(InsertPosition::ALL.iter().map(InsertPosition::as_str))
                        ))
                    })?,
            ),
        };

        let entry_id = match object.get(field::ENTRY_ID) {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                raw.as_str()
                    .and_then(|s| Uuid::parse_str(s).ok())
                    .ok_or_else(|| {
                        SignalError::Serialization(format!("invalid entryId {raw}"))
                    })?,
            ),
        };

        let entries = match object.get(field::ENTRIES) {
            None | Some(Value::Null) => None,
            Some(raw) => Some(serde_json::from_value(raw.clone())?),
        };

        Ok(Self {
            id,
            event_type,
            value: object.get(field::VALUE).cloned(),
            expected: object.get(field::EXPECTED).cloned(),
            entry_id,
            position,
            accepted: object.get(field::ACCEPTED).and_then(Value::as_bool),
            validation_error: object
                .get(field::VALIDATION_ERROR)
                .and_then(Value::as_str)
                .map(str::to_string),
            entries,
        })
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(field::ID.into(), Value::String(self.id.clone()));
        object.insert(field::TYPE.into(), self.event_type.as_str().into());
        if let Some(value) = &self.value {
            object.insert(field::VALUE.into(), value.clone());
        }
        if let Some(expected) = &self.expected {
            object.insert(field::EXPECTED.into(), expected.clone());
        }
        if let Some(entry_id) = &self.entry_id {
            object.insert(field::ENTRY_ID.into(), entry_id.to_string().into());
        }
        if let Some(position) = &self.position {
            object.insert(field::POSITION.into(), position.as_str().into());
        }
        if let Some(entries) = &self.entries {
            let entries = entries
                .iter()
                .map(|entry| {
                    let mut json = Map::new();
                    json.insert(field::ID.into(), entry.id.to_string().into());
                    if let Some(prev) = entry.prev {
                        json.insert("prev".into(), prev.to_string().into());
                    }
                    if let Some(next) = entry.next {
                        json.insert("next".into(), next.to_string().into());
                    }
                    json.insert(field::VALUE.into(), entry.value.clone());
                    Value::Object(json)
                })
                .collect();
            object.insert(field::ENTRIES.into(), Value::Array(entries));
        }
        if let Some(accepted) = self.accepted {
            object.insert(field::ACCEPTED.into(), accepted.into());
        }
        if let Some(message) = &self.validation_error {
            object.insert(field::VALIDATION_ERROR.into(), message.clone().into());
        }
        Value::Object(object)
    }

    /// The `value` field, required by the event type
    pub(crate) fn required_value(&self) -> SignalResult<&Value> {
        self.value
            .as_ref()
            .ok_or_else(|| SignalError::MissingField(field::VALUE.into()))
    }

    pub(crate) fn accepted(mut self) -> Self {
        self.accepted = Some(true);
        self
    }

    pub(crate) fn rejected(mut self, validation_error: Option<String>) -> Self {
        self.accepted = Some(false);
        self.validation_error = validation_error;
        self
    }
}

fn names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "event/event_tests.rs"]
mod event_tests;
