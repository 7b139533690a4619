/// Category model
///
/// A category is a user-defined label for grouping tasks. Tasks reference
/// categories weakly: deleting a category leaves its tasks in place with a
/// dangling `category_id`, which detail reads simply resolve to nothing.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     color VARCHAR(32) NOT NULL DEFAULT '',
///     user_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     deleted_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined task grouping
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID (UUID v4)
    pub id: Uuid,

    /// Display name; required, never empty
    pub name: String,

    pub description: String,

    /// Free-form color string, e.g. a hex code like "#ff8800"
    pub color: String,

    /// Owning user
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; never serialized outward
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Live tasks in this category, populated on detail reads
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tasks: Vec<super::task::Task>,
}

/// Input for creating a new category
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_at_is_never_serialized() {
        let category = Category {
            id: Uuid::new_v4(),
            name: "Groceries".to_string(),
            description: String::new(),
            color: "#00ff00".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: Some(Utc::now()),
            tasks: Vec::new(),
        };

        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("deleted_at").is_none());
        assert!(json.get("tasks").is_none());
        assert_eq!(json["name"], "Groceries");
    }
}
