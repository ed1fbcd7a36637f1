use thiserror::Error;

/// Errors surfaced at the `calculate` boundary.
///
/// Dangling parent references are *not* represented here: they are
/// tolerated by design (see [`crate::index`]) and only ever reach the
/// caller as a `tracing` diagnostic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The supplied commit records violate the intake contract: an empty
    /// hash, or a hash that collides with one already seen.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An invariant internal to lane assignment was violated. Indicates a
    /// bug in this crate, not bad input.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
