//! Role lookup by email.

use crate::error::AuthError;
use crate::role::Role;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Source of truth for user roles, keyed by email.
///
/// In the storefront this is the backend's `GET /role/:email` endpoint.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Look up the role of the account registered under `email`.
    async fn role_for(&self, email: &str) -> Result<Role, AuthError>;
}

#[derive(Deserialize)]
struct RoleResponse {
    role: Option<String>,
}

/// Parse the body of a role lookup response, e.g. `{"role":"seller"}`.
///
/// A missing or null role means the account has the default role.
pub fn parse_role_response(body: &str) -> Result<Role, AuthError> {
    let response: RoleResponse = serde_json::from_str(body)?;
    match response.role {
        Some(role) => role.parse(),
        None => Ok(Role::default()),
    }
}

/// A fixed email to role table.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    roles: HashMap<String, Role>,
    fallback: Option<Role>,
}

impl StaticDirectory {
    /// Create an empty directory; unknown emails are not found.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    pub fn with_role(mut self, email: impl AsRef<str>, role: Role) -> Self {
        self.roles.insert(normalize(email.as_ref()), role);
        self
    }

    /// Answer unknown emails with `role` instead of failing.
    pub fn with_fallback(mut self, role: Role) -> Self {
        self.fallback = Some(role);
        self
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if no account is registered.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[async_trait]
impl RoleDirectory for StaticDirectory {
    async fn role_for(&self, email: &str) -> Result<Role, AuthError> {
        self.roles
            .get(&normalize(email))
            .copied()
            .or(self.fallback)
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_lookup_ignores_case() {
        let directory = StaticDirectory::new().with_role("Admin@MediMart.com", Role::Admin);
        assert_eq!(
            directory.role_for("admin@medimart.com").await,
            Ok(Role::Admin)
        );
        assert!(matches!(
            directory.role_for("nobody@medimart.com").await,
            Err(AuthError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fallback_role() {
        let directory = StaticDirectory::new().with_fallback(Role::User);
        assert_eq!(directory.role_for("new@medimart.com").await, Ok(Role::User));
    }

    #[test]
    fn test_parse_role_response() {
        assert_eq!(parse_role_response(r#"{"role":"seller"}"#), Ok(Role::Seller));
        assert_eq!(parse_role_response(r#"{"role":null}"#), Ok(Role::User));
        assert_eq!(parse_role_response("{}"), Ok(Role::User));
        assert!(matches!(
            parse_role_response(r#"{"role":"wizard"}"#),
            Err(AuthError::UnknownRole(_))
        ));
        assert!(matches!(
            parse_role_response("<html>"),
            Err(AuthError::MalformedResponse(_))
        ));
    }
}
