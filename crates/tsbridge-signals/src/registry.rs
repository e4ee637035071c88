//! Signal registry

use crate::error::{SignalError, SignalResult};
use crate::list::ListSignal;
use crate::subscribers::EventReceiver;
use crate::value::{SignalValue, ValueSignal};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Global signal registry
static SIGNAL_REGISTRY: OnceCell<SignalRegistry> = OnceCell::new();

/// Type-erased access to a signal
pub trait SignalHandle: Send + Sync {
    fn id(&self) -> Uuid;

    fn subscribe(&self) -> SignalResult<EventReceiver>;

    /// Subscribe to one entry of a list signal
    fn subscribe_entry(&self, entry_id: Uuid) -> SignalResult<EventReceiver>;

    fn submit(&self, event: &Value) -> SignalResult<Value>;
}

impl<T: SignalValue> SignalHandle for ValueSignal<T> {
    fn id(&self) -> Uuid {
        ValueSignal::id(self)
    }

    fn subscribe(&self) -> SignalResult<EventReceiver> {
        ValueSignal::subscribe(self)
    }

    fn subscribe_entry(&self, _entry_id: Uuid) -> SignalResult<EventReceiver> {
        Err(SignalError::UnsupportedOperation(
            "a value signal has no entries".to_string(),
        ))
    }

    fn submit(&self, event: &Value) -> SignalResult<Value> {
        ValueSignal::submit(self, event)
    }
}

impl<T: SignalValue> SignalHandle for ListSignal<T> {
    fn id(&self) -> Uuid {
        ListSignal::id(self)
    }

    fn subscribe(&self) -> SignalResult<EventReceiver> {
        ListSignal::subscribe(self)
    }

    fn subscribe_entry(&self, entry_id: Uuid) -> SignalResult<EventReceiver> {
        ListSignal::subscribe_entry(self, entry_id)
    }

    fn submit(&self, event: &Value) -> SignalResult<Value> {
        ListSignal::submit(self, event)
    }
}

/// Routes subscriptions and events to signals by id.
///
/// Unsubscribing is dropping (or closing) the [`EventReceiver`].
pub struct SignalRegistry {
    signals: DashMap<Uuid, Arc<dyn SignalHandle>>,
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self {
            signals: DashMap::new(),
        }
    }

    /// Get the global registry
    pub fn global() -> &'static SignalRegistry {
        SIGNAL_REGISTRY.get_or_init(SignalRegistry::new)
    }

    /// Register a signal under its own id, replacing any previous one
    pub fn register(&self, signal: impl SignalHandle + 'static) -> Uuid {
        let id = signal.id();
        debug!(signal = %id, "Registering signal");
        self.signals.insert(id, Arc::new(signal));
        id
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<dyn SignalHandle>> {
        self.signals.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.signals.contains_key(&id)
    }

    pub fn subscribe(&self, id: Uuid) -> SignalResult<EventReceiver> {
        self.require(id)?.subscribe()
    }

    pub fn subscribe_entry(&self, id: Uuid, entry_id: Uuid) -> SignalResult<EventReceiver> {
        self.require(id)?.subscribe_entry(entry_id)
    }

    pub fn submit(&self, id: Uuid, event: &Value) -> SignalResult<Value> {
        self.require(id)?.submit(event)
    }

    /// Remove a signal; open subscriptions end once the last handle is dropped
    pub fn remove(&self, id: Uuid) -> Option<Arc<dyn SignalHandle>> {
        debug!(signal = %id, "Removing signal");
        self.signals.remove(&id).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    // Clone out of the map so no shard lock is held while the signal runs
    fn require(&self, id: Uuid) -> SignalResult<Arc<dyn SignalHandle>> {
        self.get(id).ok_or(SignalError::SignalNotFound(id))
    }
}

impl Default for SignalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalRegistry")
            .field("signals", &self.signals.len())
            .finish()
    }
}
