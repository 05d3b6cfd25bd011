//! Authentication and session ports.

use uuid::Uuid;

/// Claims carried by a browser session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: i64,
}

/// Session token service. Tokens travel in an HttpOnly cookie and identify
/// the logged-in user on every request.
pub trait SessionService: Send + Sync {
    /// Issue a session token for a user.
    fn issue(&self, user_id: Uuid, username: &str) -> Result<String, AuthError>;

    /// Validate and decode a session token.
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("No session")]
    MissingSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
