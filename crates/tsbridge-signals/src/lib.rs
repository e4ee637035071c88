//! tsbridge-signals - Server-held shared state
//!
//! A signal is a piece of server state that clients change by submitting
//! JSON state events and observe through push subscriptions:
//! - [`ValueSignal`] holds one value (`set`, compare-and-swap `replace`)
//! - [`ListSignal`] holds a linked list of entries (`insert`, `remove`), each
//!   entry being a value signal of its own
//! - [`SignalRegistry`] routes events and subscriptions by signal id
//!
//! Every signal applies one event at a time. Subscribers receive a snapshot
//! first, then every processed event in order; notification never blocks the
//! writer.
//!
//! ```
//! use serde_json::json;
//! use tsbridge_signals::ValueSignal;
//!
//! let counter = ValueSignal::new(Some(5));
//! let response = counter
//!     .submit(&json!({"id": "1", "type": "replace", "expected": 5, "value": 6}))
//!     .unwrap();
//!
//! assert_eq!(response["accepted"], json!(true));
//! assert_eq!(counter.value(), Some(6));
//! ```

mod error;
mod event;
mod list;
mod operation;
mod registry;
mod subscribers;
mod value;

pub use error::{SignalError, SignalResult};
pub use event::{EntrySnapshot, EventType, InsertPosition, StateEvent, field};
pub use list::{ListEntry, ListSignal};
pub use operation::{
    EntryIdGenerator, Operation, OperationValidator, RandomEntryIds, ValidationResult,
};
pub use registry::{SignalHandle, SignalRegistry};
pub use subscribers::EventReceiver;
pub use value::{READ_ONLY_MESSAGE, SignalValue, ValueSignal};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ListSignal, Operation, SignalError, SignalRegistry, SignalResult, StateEvent,
        ValidationResult, ValueSignal,
    };
}
