//! Operation validation and entry id generation

use std::sync::Arc;
use uuid::Uuid;

/// A decoded modification, handed to validators before it is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation<'a, T> {
    Set {
        value: Option<&'a T>,
        entry_id: Option<Uuid>,
    },
    Replace {
        expected: Option<&'a T>,
        value: Option<&'a T>,
        entry_id: Option<Uuid>,
    },
    Insert {
        value: Option<&'a T>,
    },
    Remove {
        entry_id: Uuid,
    },
}

impl<T> Operation<'_, T> {
    /// The new value this operation would store
    pub fn value(&self) -> Option<&T> {
        match self {
            Operation::Set { value, .. }
            | Operation::Replace { value, .. }
            | Operation::Insert { value } => *value,
            Operation::Remove { .. } => None,
        }
    }

    /// The list entry this operation targets
    pub fn entry_id(&self) -> Option<Uuid> {
        match self {
            Operation::Set { entry_id, .. } | Operation::Replace { entry_id, .. } => *entry_id,
            Operation::Remove { entry_id } => Some(*entry_id),
            Operation::Insert { .. } => None,
        }
    }
}

/// Verdict of an [`OperationValidator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Allow,
    Reject(String),
}

impl ValidationResult {
    pub fn allow() -> Self {
        ValidationResult::Allow
    }

    pub fn reject(message: impl Into<String>) -> Self {
        ValidationResult::Reject(message.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Allow)
    }
}

/// Decides whether an operation may be applied
pub trait OperationValidator<T>: Send + Sync {
    fn validate(&self, operation: &Operation<'_, T>) -> ValidationResult;
}

impl<T, F> OperationValidator<T> for F
where
    F: Fn(&Operation<'_, T>) -> ValidationResult + Send + Sync,
{
    fn validate(&self, operation: &Operation<'_, T>) -> ValidationResult {
        self(operation)
    }
}

/// Validators attached to a signal view, consulted in order
pub(crate) type Validators<T> = Vec<Arc<dyn OperationValidator<T>>>;

/// The first rejection among `validators`, or `Allow`
pub(crate) fn validate_all<T>(
    validators: &[Arc<dyn OperationValidator<T>>],
    operation: &Operation<'_, T>,
) -> ValidationResult {
    validators
        .iter()
        .map(|validator| validator.validate(operation))
        .find(|verdict| !verdict.is_ok())
        .unwrap_or(ValidationResult::Allow)
}

/// Source of ids for new list entries
pub trait EntryIdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Random version 4 ids
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomEntryIds;

impl EntryIdGenerator for RandomEntryIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

impl<F> EntryIdGenerator for F
where
    F: Fn() -> Uuid + Send + Sync,
{
    fn next_id(&self) -> Uuid {
        self()
    }
}
