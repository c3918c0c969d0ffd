//! Signed-in identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity handed over by the auth provider after sign-in.
///
/// The access token is never serialized and never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Email address; the key for role lookups.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar URL.
    #[serde(default, alias = "photoURL")]
    pub photo_url: Option<String>,
    /// Bearer token for the backend.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

impl Identity {
    /// Create an identity with just an email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            photo_url: None,
            access_token: None,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the avatar URL.
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Set the backend access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Name to greet the user with.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.email.as_str())
    }

    /// Authorization header value, if a token is present.
    pub fn bearer(&self) -> Option<String> {
        self.access_token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("photo_url", &self.photo_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_redacted() {
        let identity = Identity::new("a@b.c").with_access_token("s3cret");
        let debug = format!("{:?}", identity);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[redacted]"));

        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("s3cret"));
    }

    #[test]
    fn test_bearer() {
        assert_eq!(Identity::new("a@b.c").bearer(), None);
        assert_eq!(
            Identity::new("a@b.c").with_access_token("t").bearer(),
            Some("Bearer t".to_string())
        );
    }

    #[test]
    fn test_name_falls_back_to_email() {
        assert_eq!(Identity::new("a@b.c").name(), "a@b.c");
        assert_eq!(Identity::new("a@b.c").with_display_name("Rahim").name(), "Rahim");
    }
}
