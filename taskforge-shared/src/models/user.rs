/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     first_name VARCHAR(255) NOT NULL DEFAULT '',
///     last_name VARCHAR(255) NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     deleted_at TIMESTAMPTZ
/// );
///
/// CREATE UNIQUE INDEX users_username_live_idx ON users (username) WHERE deleted_at IS NULL;
/// CREATE UNIQUE INDEX users_email_live_idx ON users (email) WHERE deleted_at IS NULL;
/// ```
///
/// Username and email are unique among live (non-soft-deleted) rows only;
/// the partial indexes are what enforces that under concurrent creates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account
///
/// Passwords are stored as Argon2id hashes, never in plaintext, and the
/// hash never leaves the process: it is skipped on serialization along
/// with the soft-delete marker.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4), assigned at creation and immutable
    pub id: Uuid,

    /// Unique username among live users
    pub username: String,

    /// Unique email among live users
    pub email: String,

    /// Argon2id password hash; never serialized outward
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// First name (mutable through profile updates)
    pub first_name: String,

    /// Last name (mutable through profile updates)
    pub last_name: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; never serialized outward
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for registering a new user
///
/// Carries the plaintext password; [`crate::service::UserService`] replaces
/// it with a hash before anything touches storage.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Whether this record has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("deleted_at").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_is_deleted() {
        let mut user = sample_user();
        assert!(!user.is_deleted());

        user.deleted_at = Some(Utc::now());
        assert!(user.is_deleted());
    }
}
