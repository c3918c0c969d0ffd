//! Dashboard roles.

use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role that decides which dashboard a user may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Marketplace administrator.
    Admin,
    /// Sells medicines through the marketplace.
    Seller,
    /// Regular customer. Accounts start with this role.
    #[default]
    #[serde(alias = "customer")]
    User,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Seller => "seller",
            Role::User => "user",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Seller => "Seller",
            Role::User => "User",
        }
    }

    /// Landing route of this role's dashboard.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/dashboard/admin-home",
            Role::Seller => "/dashboard/seller-home",
            Role::User => "/dashboard/user-home",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "seller" => Ok(Role::Seller),
            "user" | "customer" => Ok(Role::User),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Seller ".parse::<Role>(), Ok(Role::Seller));
        assert_eq!("customer".parse::<Role>(), Ok(Role::User));
        assert!(matches!(
            "root".parse::<Role>(),
            Err(AuthError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_serde_accepts_customer_alias() {
        let role: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(role, Role::User);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"user\"");
    }

    #[test]
    fn test_each_role_has_its_own_dashboard() {
        assert_ne!(Role::Admin.dashboard_path(), Role::Seller.dashboard_path());
        assert!(Role::default().dashboard_path().starts_with("/dashboard/"));
    }
}
