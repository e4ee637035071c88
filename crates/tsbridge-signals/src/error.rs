//! Signal error types

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

/// Error type for malformed or unsupported state events
///
/// These describe a request the signal could not interpret. A well-formed
/// event that is refused (a failed compare-and-swap, a validator veto) is
/// not an error: it comes back as a response with `accepted: false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The `type` field is missing or names no known event
    #[error("invalid event type: {0}")]
    InvalidEventType(String),

    /// A field required by the event type is absent
    #[error("missing field: {0}")]
    MissingField(String),

    /// The event is well-formed but the signal does not support it
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// No entry with this id in the list signal
    #[error("entry not found: {0}")]
    EntryNotFound(Uuid),

    /// No signal registered under this id
    #[error("signal not found: {0}")]
    SignalNotFound(Uuid),

    /// The event or its value is not valid JSON for the signal's type
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SignalError {
    /// Stable numeric code for hosts that classify failures
    pub fn error_code(&self) -> u32 {
        match self {
            SignalError::InvalidEventType(_) => 1,
            SignalError::MissingField(_) => 2,
            SignalError::UnsupportedOperation(_) => 3,
            SignalError::EntryNotFound(_) => 4,
            SignalError::SignalNotFound(_) => 5,
            SignalError::Serialization(_) => 6,
        }
    }

    /// Whether the request itself was malformed, as opposed to unsupported
    pub fn is_malformed_request(&self) -> bool {
        matches!(
            self,
            SignalError::InvalidEventType(_)
                | SignalError::MissingField(_)
                | SignalError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for SignalError {
    fn from(err: serde_json::Error) -> Self {
        SignalError::Serialization(err.to_string())
    }
}
