//! Policy error types.

use thiserror::Error;

/// Policy errors.
///
/// These only arise at the string boundary (parsing roles, positions and
/// capability identifiers) and when verifying the static tables. Evaluation
/// itself never fails: a denial is a `false`, not an error.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The role string did not name a known role.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The position string did not name a known staff position.
    #[error("unknown position: {0}")]
    UnknownPosition(String),

    /// The capability identifier is not part of the vocabulary.
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// A static policy table violates one of its invariants.
    #[error("policy invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
