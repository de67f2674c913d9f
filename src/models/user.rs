//! User Model
//!
//! Core user data structures and type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of user roles. Stored as TEXT in the database; every role
/// check site matches exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Student,
    Tutor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Student => "student",
            UserRole::Tutor => "tutor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "student" => Ok(UserRole::Student),
            "tutor" => Ok(UserRole::Tutor),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// User representation for external API responses
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_no: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Internal user representation including the bcrypt password hash.
/// Used only for credential checks; never exposed in API responses.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserWithPassword {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub mobile_no: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub mobile_verified: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserWithPassword> for User {
    fn from(u: UserWithPassword) -> Self {
        User {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            mobile_no: u.mobile_no,
            role: u.role,
            email_verified: u.email_verified,
            mobile_verified: u.mobile_verified,
            active: u.active,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Archived snapshot of a user taken at deactivation time. Append-only.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeactivatedUser {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_no: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub deactivated_on: DateTime<Utc>,
    /// Whole days between account creation and deactivation
    pub usage_days: i64,
}

/// Compact row for the admin user listing
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_no: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Student, UserRole::Tutor] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("coach".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_conversion_strips_password() {
        let now = Utc::now();
        let with_password = UserWithPassword {
            id: 1,
            first_name: "Asha".to_string(),
            last_name: "Iyer".to_string(),
            email: "asha@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
            mobile_no: "9876543210".to_string(),
            role: UserRole::Student,
            email_verified: true,
            mobile_verified: false,
            active: true,
            created_at: now,
            updated_at: now,
        };

        let user: User = with_password.into();
        assert_eq!(user.display_name(), "Asha Iyer");
        assert_eq!(user.role, UserRole::Student);
    }
}
