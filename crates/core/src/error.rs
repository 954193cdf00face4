/// Domain-level failures produced by the account operations.
///
/// Each variant maps to exactly one HTTP status in the API crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed or missing input, rejected before any store access.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unknown username or wrong password. The two cases are
    /// intentionally indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A user with this username already exists.
    #[error("A user with username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
