//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No identity is signed in.
    #[error("not signed in")]
    NotSignedIn,

    /// The directory has no record for this email.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The directory returned a role this client does not know.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The directory could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The directory answered with something unreadable.
    #[error("malformed directory response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::MalformedResponse(e.to_string())
    }
}

impl AuthError {
    /// Check if this is a transport failure worth retrying.
    pub fn is_network(&self) -> bool {
        matches!(self, AuthError::Network(_))
    }

    /// Check if signing in again would help.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::NotSignedIn | AuthError::UserNotFound(_))
    }
}
