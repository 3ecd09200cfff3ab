//! Error types for the resource pool

use std::time::Duration;

use thiserror::Error;

/// A configuration invariant violated at pool construction.
///
/// The count and duration fields are unsigned types, so only the ordering
/// constraints between the limits can actually be violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Min idle greater than max idle")]
    MinIdleGreaterThanMaxIdle,

    #[error("Max idle greater than max objects")]
    MaxIdleGreaterThanMaxObjects,
}

/// Errors surfaced by pool operations.
///
/// Generic over the handler's error type so callers can distinguish "the
/// pool is saturated" (`Exhausted`) from "the backend resource is broken"
/// (`Handler`).
#[derive(Error, Debug)]
pub enum PoolError<E> {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("pool is shut down")]
    Closed,

    #[error("no resource became available within {0:?}")]
    Exhausted(Duration),

    #[error("resource handler failed")]
    Handler(#[source] E),

    #[error("borrow task was cancelled")]
    Cancelled,
}

pub type PoolResult<T, E> = Result<T, PoolError<E>>;
