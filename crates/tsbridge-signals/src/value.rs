//! Value signals

use crate::error::{SignalError, SignalResult};
use crate::event::{EventType, StateEvent};
use crate::operation::{Operation, OperationValidator, ValidationResult, Validators, validate_all};
use crate::subscribers::{EventReceiver, Subscribers};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Rejection message of a read-only view
pub const READ_ONLY_MESSAGE: &str = "Read-only signal does not allow any modifications";

/// Bound on the values a signal can hold
pub trait SignalValue: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {}

impl<T> SignalValue for T where T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {}

struct ValueState<T> {
    value: Option<T>,
    subscribers: Subscribers,
}

struct ValueInner<T> {
    id: Uuid,
    state: Mutex<ValueState<T>>,
}

/// A single server-held value.
///
/// `set` replaces the value unconditionally; `replace` is a compare-and-swap
/// against `expected`. Every outcome, accepted or not, is pushed to the
/// subscribers in application order.
///
/// Cloning a signal, or deriving a view with
/// [`with_operation_validator`](Self::with_operation_validator), shares the
/// underlying state.
pub struct ValueSignal<T> {
    inner: Arc<ValueInner<T>>,
    validators: Validators<T>,
}

impl<T> Clone for ValueSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            validators: self.validators.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ValueSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueSignal")
            .field("id", &self.inner.id)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<T: SignalValue> Default for ValueSignal<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: SignalValue> ValueSignal<T> {
    pub fn new(initial: Option<T>) -> Self {
        Self::with_id(Uuid::new_v4(), initial)
    }

    pub fn with_id(id: Uuid, initial: Option<T>) -> Self {
        Self {
            inner: Arc::new(ValueInner {
                id,
                state: Mutex::new(ValueState {
                    value: initial,
                    subscribers: Subscribers::default(),
                }),
            }),
            validators: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Current value
    pub fn value(&self) -> Option<T> {
        self.inner.state.lock().value.clone()
    }

    /// A view of the same state that also consults `validator`
    pub fn with_operation_validator(&self, validator: impl OperationValidator<T> + 'static) -> Self {
        let mut view = self.clone();
        view.validators.push(Arc::new(validator));
        view
    }

    /// A view of the same state rejecting every modification
    pub fn as_read_only(&self) -> Self {
        self.with_operation_validator(|_: &Operation<'_, T>| {
            ValidationResult::reject(READ_ONLY_MESSAGE)
        })
    }

    /// Subscribe; the first event received is a snapshot of the current value
    pub fn subscribe(&self) -> SignalResult<EventReceiver> {
        let mut state = self.inner.state.lock();
        let snapshot = self.snapshot_event(state.value.as_ref())?;
        Ok(state.subscribers.subscribe(snapshot.to_json()))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().subscribers.len()
    }

    /// The current state as a snapshot event
    pub fn snapshot(&self) -> SignalResult<Value> {
        let state = self.inner.state.lock();
        Ok(self.snapshot_event(state.value.as_ref())?.to_json())
    }

    /// Apply a JSON state event and return the response event
    pub fn submit(&self, event: &Value) -> SignalResult<Value> {
        let event = StateEvent::from_json(event)?;
        Ok(self.apply(event)?.to_json())
    }

    pub(crate) fn apply(&self, event: StateEvent) -> SignalResult<StateEvent> {
        match event.event_type {
            EventType::Set => {
                let value: Option<T> = decode(Some(event.required_value()?))?;
                let verdict = validate_all(
                    &self.validators,
                    &Operation::Set {
                        value: value.as_ref(),
                        entry_id: event.entry_id,
                    },
                );

                let mut state = self.inner.state.lock();
                let response = match verdict {
                    ValidationResult::Allow => {
                        state.value = value;
                        event.accepted()
                    }
                    ValidationResult::Reject(message) => event.rejected(Some(message)),
                };
                Ok(self.publish(&mut state, response))
            }
            EventType::Replace => {
                let value: Option<T> = decode(Some(event.required_value()?))?;
                let expected: Option<T> = decode(event.expected.as_ref())?;
                let verdict = validate_all(
                    &self.validators,
                    &Operation::Replace {
                        expected: expected.as_ref(),
                        value: value.as_ref(),
                        entry_id: event.entry_id,
                    },
                );

                let mut state = self.inner.state.lock();
                let response = match verdict {
                    ValidationResult::Reject(message) => event.rejected(Some(message)),
                    ValidationResult::Allow if state.value == expected => {
                        state.value = value;
                        event.accepted()
                    }
                    ValidationResult::Allow => event.rejected(None),
                };
                Ok(self.publish(&mut state, response))
            }
            other => Err(SignalError::UnsupportedOperation(format!(
                "{other} events are not supported by a value signal"
            ))),
        }
    }

    /// Publish `event` as refused by an owning list's validator
    pub(crate) fn reject(&self, event: StateEvent, message: String) -> StateEvent {
        let mut state = self.inner.state.lock();
        self.publish(&mut state, event.rejected(Some(message)))
    }

    /// Close every subscription of this signal
    pub(crate) fn close(&self) {
        self.inner.state.lock().subscribers.close();
    }

    fn publish(&self, state: &mut ValueState<T>, response: StateEvent) -> StateEvent {
        debug!(
            signal = %self.inner.id,
            event = %response.event_type,
            accepted = response.is_accepted(),
            "Applied state event"
        );
        state.subscribers.notify(&response.to_json());
        response
    }

    fn snapshot_event(&self, value: Option<&T>) -> SignalResult<StateEvent> {
        Ok(StateEvent::new(self.inner.id.to_string(), EventType::Snapshot)
            .with_value(encode(value)?)
            .accepted())
    }
}

/// A JSON value as `T`; absent and `null` both mean no value
pub(crate) fn decode<T: DeserializeOwned>(value: Option<&Value>) -> SignalResult<Option<T>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

pub(crate) fn encode<T: Serialize>(value: Option<&T>) -> SignalResult<Value> {
    match value {
        None => Ok(Value::Null),
        Some(value) => Ok(serde_json::to_value(value)?),
    }
}
