//! Role marker for the current visitor.
//!
//! This only selects which panel the presentation layer shows; nothing in
//! the core checks it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which panel the visitor is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shopper.
    #[default]
    User,
    /// Store vendor.
    Vendor,
    /// Administrator.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Vendor => "vendor",
            Role::Admin => "admin",
        }
    }

    /// Name shown when none is given at login.
    pub fn default_display_name(&self) -> &'static str {
        match self {
            Role::User => "Customer User",
            Role::Vendor => "Vendor User",
            Role::Admin => "Admin User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "customer" => Ok(Role::User),
            "vendor" => Ok(Role::Vendor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A logged-in visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub name: String,
    pub login_time: DateTime<Utc>,
}

impl Session {
    /// Start a session. A blank or missing name uses the role's default.
    pub fn start(role: Role, name: Option<String>, now: DateTime<Utc>) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| role.default_display_name().to_string());
        Self {
            role,
            name,
            login_time: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let now = Utc::now();
        assert_eq!(Session::start(Role::User, None, now).name, "Customer User");
        assert_eq!(Session::start(Role::Vendor, Some("  ".into()), now).name, "Vendor User");
        assert_eq!(Session::start(Role::Admin, Some("Ravi".into()), now).name, "Ravi");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Vendor".parse::<Role>().unwrap(), Role::Vendor);
        assert_eq!("customer".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
