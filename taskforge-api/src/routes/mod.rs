/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User account endpoints
/// - `tasks`: Task endpoints
/// - `categories`: Category endpoints

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

pub mod categories;
pub mod health;
pub mod tasks;
pub mod users;

fn default_limit() -> i64 {
    10
}

/// Common pagination query parameters
///
/// Non-numeric input is rejected at deserialization (400); negative values
/// are rejected by [`Pagination::validate`]. There is deliberately no upper
/// bound on `limit`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[serde(default)]
    pub offset: i64,
}

impl Pagination {
    pub fn validate(&self) -> ApiResult<()> {
        if self.limit < 0 {
            return Err(ApiError::BadRequest("invalid limit parameter".to_string()));
        }
        if self.offset < 0 {
            return Err(ApiError::BadRequest("invalid offset parameter".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.limit, 10);
        assert_eq!(p.offset, 0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_pagination_rejects_negative_values() {
        let p = Pagination { limit: -1, offset: 0 };
        assert!(p.validate().is_err());

        let p = Pagination { limit: 10, offset: -5 };
        assert!(p.validate().is_err());
    }
}
