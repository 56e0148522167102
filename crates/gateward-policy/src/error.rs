//! Error types for the policy layer.

/// Why a mutation request was rejected.
///
/// Every variant is detected before any state change; a `PolicyError`
/// means the roster is exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The username does not match the allowed shape: 3–16 characters
    /// from ASCII letters, digits, and underscore.
    #[error("invalid username {0:?}: use 3-16 letters, digits, or underscores")]
    InvalidName(String),

    /// The duration string parsed to nothing, or the duration was zero.
    /// Carries the offending input for the caller's message.
    #[error("invalid duration {0:?}")]
    InvalidDuration(String),

    /// Duplicate add: the name is already permanent, or (for temporary
    /// adds) already holds a live temporary entry. A temporary add never
    /// silently extends; extending is its own explicit operation.
    #[error("{0} is already whitelisted")]
    AlreadyPresent(String),

    /// Remove or extend target missing from the relevant store(s).
    #[error("{0} is not whitelisted")]
    NotPresent(String),
}
