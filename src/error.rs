use std::collections::TryReserveError;
use thiserror::Error;

/// Failures reported by `ChainedHashMap`. Lookups that miss are not errors;
/// they return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Memory for the bucket array or a key copy could not be reserved.
    /// The table is left exactly as it was before the call.
    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),
    #[error("invalid resize policy: {0}")]
    InvalidPolicy(&'static str),
}
