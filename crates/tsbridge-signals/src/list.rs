//! List signals
//!
//! Entries live in an arena keyed by entry id; `head`, `tail` and each
//! entry's `prev`/`next` links are ids into that arena. Every entry owns a
//! [`ValueSignal`] whose id is the entry id, so a single entry can be
//! subscribed to and updated on its own.

use crate::error::{SignalError, SignalResult};
use crate::event::{EntrySnapshot, EventType, InsertPosition, StateEvent, field};
use crate::operation::{
    EntryIdGenerator, Operation, OperationValidator, RandomEntryIds, ValidationResult, Validators,
    validate_all,
};
use crate::subscribers::{EventReceiver, Subscribers};
use crate::value::{READ_ONLY_MESSAGE, SignalValue, ValueSignal, decode, encode};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// One entry of a list, as returned by [`ListSignal::entries`]
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry<T> {
    pub id: Uuid,
    pub prev: Option<Uuid>,
    pub next: Option<Uuid>,
    pub value: Option<T>,
}

struct Entry<T> {
    prev: Option<Uuid>,
    next: Option<Uuid>,
    signal: ValueSignal<T>,
}

struct ListState<T> {
    entries: HashMap<Uuid, Entry<T>>,
    head: Option<Uuid>,
    tail: Option<Uuid>,
    subscribers: Subscribers,
}

impl<T: SignalValue> ListState<T> {
    /// Entries from head to tail
    fn ordered(&self) -> Vec<(Uuid, &Entry<T>)> {
        let mut ordered = Vec::with_capacity(self.entries.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(entry) = self.entries.get(&id) else {
                break;
            };
            ordered.push((id, entry));
            if ordered.len() == self.entries.len() {
                break;
            }
            cursor = entry.next;
        }
        ordered
    }

    fn link_last(&mut self, id: Uuid, signal: ValueSignal<T>) {
        let prev = self.tail;
        if let Some(tail) = prev.and_then(|tail| self.entries.get_mut(&tail)) {
            tail.next = Some(id);
        }
        self.entries.insert(
            id,
            Entry {
                prev,
                next: None,
                signal,
            },
        );
        if self.head.is_none() {
            self.head = Some(id);
        }
        self.tail = Some(id);
    }

    fn unlink(&mut self, id: Uuid) -> Option<Entry<T>> {
        let entry = self.entries.remove(&id)?;
        match entry.prev.and_then(|prev| self.entries.get_mut(&prev)) {
            Some(prev) => prev.next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next.and_then(|next| self.entries.get_mut(&next)) {
            Some(next) => next.prev = entry.prev,
            None => self.tail = entry.prev,
        }
        Some(entry)
    }

    fn snapshot_entries(&self) -> SignalResult<Vec<EntrySnapshot>> {
        self.ordered()
            .into_iter()
            .map(|(id, entry)| {
                Ok(EntrySnapshot {
                    id,
                    prev: entry.prev,
                    next: entry.next,
                    value: encode(entry.signal.value().as_ref())?,
                })
            })
            .collect()
    }
}

struct ListInner<T> {
    id: Uuid,
    state: Mutex<ListState<T>>,
    ids: Box<dyn EntryIdGenerator>,
}

/// An ordered collection of independently addressable values.
///
/// Only `insert` at the last position is supported. Removing an unknown entry
/// is accepted as already done; removing from an empty list is rejected.
/// `set` and `replace` carrying an `entryId` are forwarded to that entry and
/// reach the entry's subscribers only.
pub struct ListSignal<T> {
    inner: Arc<ListInner<T>>,
    validators: Validators<T>,
}

impl<T> Clone for ListSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            validators: self.validators.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ListSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSignal")
            .field("id", &self.inner.id)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<T: SignalValue> Default for ListSignal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SignalValue> ListSignal<T> {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self::with_entry_ids(id, RandomEntryIds)
    }

    /// A list drawing new entry ids from `ids`
    pub fn with_entry_ids(id: Uuid, ids: impl EntryIdGenerator + 'static) -> Self {
        Self {
            inner: Arc::new(ListInner {
                id,
                state: Mutex::new(ListState {
                    entries: HashMap::new(),
                    head: None,
                    tail: None,
                    subscribers: Subscribers::default(),
                }),
                ids: Box::new(ids),
            }),
            validators: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in link order
    pub fn entries(&self) -> Vec<ListEntry<T>> {
        let state = self.inner.state.lock();
        state
            .ordered()
            .into_iter()
            .map(|(id, entry)| ListEntry {
                id,
                prev: entry.prev,
                next: entry.next,
                value: entry.signal.value(),
            })
            .collect()
    }

    /// The value signal behind one entry
    pub fn entry(&self, entry_id: Uuid) -> Option<ValueSignal<T>> {
        self.inner
            .state
            .lock()
            .entries
            .get(&entry_id)
            .map(|entry| entry.signal.clone())
    }

    /// A view of the same list that also consults `validator`
    pub fn with_operation_validator(&self, validator: impl OperationValidator<T> + 'static) -> Self {
        let mut view = self.clone();
        view.validators.push(Arc::new(validator));
        view
    }

    /// A view of the same list rejecting every modification
    pub fn as_read_only(&self) -> Self {
        self.with_operation_validator(|_: &Operation<'_, T>| {
            ValidationResult::reject(READ_ONLY_MESSAGE)
        })
    }

    /// Subscribe; the first event is a snapshot listing the entries in order
    pub fn subscribe(&self) -> SignalResult<EventReceiver> {
        let mut state = self.inner.state.lock();
        let snapshot = self.snapshot_event(&state)?;
        Ok(state.subscribers.subscribe(snapshot.to_json()))
    }

    /// Subscribe to the value events of a single entry
    pub fn subscribe_entry(&self, entry_id: Uuid) -> SignalResult<EventReceiver> {
        let state = self.inner.state.lock();
        state
            .entries
            .get(&entry_id)
            .ok_or(SignalError::EntryNotFound(entry_id))?
            .signal
            .subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().subscribers.len()
    }

    /// The current state as a snapshot event
    pub fn snapshot(&self) -> SignalResult<Value> {
        let state = self.inner.state.lock();
        Ok(self.snapshot_event(&state)?.to_json())
    }

    /// Apply a JSON state event and return the response event
    pub fn submit(&self, event: &Value) -> SignalResult<Value> {
        let event = StateEvent::from_json(event)?;
        Ok(self.apply(event)?.to_json())
    }

    pub(crate) fn apply(&self, event: StateEvent) -> SignalResult<StateEvent> {
        match event.event_type {
            EventType::Insert => self.insert(event),
            EventType::Remove => self.remove(event),
            EventType::Set | EventType::Replace => self.update_entry(event),
            other => Err(SignalError::UnsupportedOperation(format!(
                "{other} events are not supported by a list signal"
            ))),
        }
    }

    fn insert(&self, event: StateEvent) -> SignalResult<StateEvent> {
        let position = event.position.ok_or_else(|| {
            SignalError::InvalidEventType(format!(
                "missing insert {}; expected one of first, last, before, after",
                field::POSITION
            ))
        })?;
        if position != InsertPosition::Last {
            return Err(SignalError::UnsupportedOperation(format!(
                "insert at position {position}; only last is supported"
            )));
        }
        // an entry always holds a value
        let raw = event
            .required_value()
            .ok()
            .filter(|raw| !raw.is_null())
            .ok_or_else(|| SignalError::MissingField(field::VALUE.into()))?;
        let value: Option<T> = decode(Some(raw))?;

        if let ValidationResult::Reject(message) =
            validate_all(&self.validators, &Operation::Insert { value: value.as_ref() })
        {
            let mut state = self.inner.state.lock();
            return Ok(self.publish(&mut state, event.rejected(Some(message))));
        }

        let entry_id = self.inner.ids.next_id();
        let mut state = self.inner.state.lock();
        if state.entries.contains_key(&entry_id) {
            warn!(
                signal = %self.inner.id,
                entry = %entry_id,
                "Generated entry id already exists, rejecting insert"
            );
            return Ok(self.publish(&mut state, event.for_entry(entry_id).rejected(None)));
        }

        state.link_last(entry_id, ValueSignal::with_id(entry_id, value));
        Ok(self.publish(&mut state, event.for_entry(entry_id).accepted()))
    }

    fn remove(&self, event: StateEvent) -> SignalResult<StateEvent> {
        let entry_id = event
            .entry_id
            .ok_or_else(|| SignalError::MissingField(field::ENTRY_ID.into()))?;

        if let ValidationResult::Reject(message) =
            validate_all(&self.validators, &Operation::Remove { entry_id })
        {
            let mut state = self.inner.state.lock();
            return Ok(self.publish(&mut state, event.rejected(Some(message))));
        }

        let mut state = self.inner.state.lock();
        if state.head.is_none() {
            return Ok(self.publish(&mut state, event.rejected(None)));
        }
        match state.unlink(entry_id) {
            Some(entry) => entry.signal.close(),
            None => debug!(
                signal = %self.inner.id,
                entry = %entry_id,
                "Entry already removed"
            ),
        }
        Ok(self.publish(&mut state, event.accepted()))
    }

    fn update_entry(&self, event: StateEvent) -> SignalResult<StateEvent> {
        let entry_id = event.entry_id.ok_or_else(|| {
            SignalError::UnsupportedOperation(format!(
                "{} events on a list signal must target an entry",
                event.event_type
            ))
        })?;
        let value: Option<T> = decode(Some(event.required_value()?))?;
        let expected: Option<T> = decode(event.expected.as_ref())?;
        let operation = match event.event_type {
            EventType::Replace => Operation::Replace {
                expected: expected.as_ref(),
                value: value.as_ref(),
                entry_id: Some(entry_id),
            },
            _ => Operation::Set {
                value: value.as_ref(),
                entry_id: Some(entry_id),
            },
        };

        let verdict = validate_all(&self.validators, &operation);
        let state = self.inner.state.lock();
        let signal = &state
            .entries
            .get(&entry_id)
            .ok_or(SignalError::EntryNotFound(entry_id))?
            .signal;
        match verdict {
            ValidationResult::Allow => signal.apply(event),
            ValidationResult::Reject(message) => Ok(signal.reject(event, message)),
        }
    }

    fn publish(&self, state: &mut ListState<T>, response: StateEvent) -> StateEvent {
        debug!(
            signal = %self.inner.id,
            event = %response.event_type,
            accepted = response.is_accepted(),
            entries = state.entries.len(),
            "Applied state event"
        );
        state.subscribers.notify(&response.to_json());
        response
    }

    fn snapshot_event(&self, state: &ListState<T>) -> SignalResult<StateEvent> {
        let mut snapshot =
            StateEvent::new(self.inner.id.to_string(), EventType::Snapshot).accepted();
        snapshot.entries = Some(state.snapshot_entries()?);
        Ok(snapshot)
    }
}
