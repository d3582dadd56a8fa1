//! Password hashing port.

/// Password hashing service. Implementations must salt per hash; the raw
/// password never reaches a repository.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication infrastructure errors.
///
/// A credential mismatch is not an error - `verify` returns `Ok(false)` and
/// the identity service returns `None`, indistinguishable from an unknown
/// email.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Stored hash is malformed: {0}")]
    MalformedHash(String),
}
