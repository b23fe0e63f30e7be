//! Error types for status and role parsing.

/// Errors raised at the string boundary of the state machine.
///
/// A denied transition is not an error: `can_transition_to` returns `false`
/// and `authorized_transitions` returns an empty sequence. These variants
/// only fire when an input value is outside the closed enumerations, which
/// callers should treat as a data-integrity bug rather than user error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    /// The string is not one of the five appointment statuses.
    #[error("invalid appointment status: {0:?}")]
    InvalidStatus(String),

    /// The string is not a known actor role.
    #[error("invalid actor role: {0:?}")]
    InvalidRole(String),
}
