/// Common error taxonomy for the domain layer
///
/// Every repository and service operation returns [`Result<T>`]. The four
/// variants map one-to-one onto the outcomes the API layer knows how to
/// present: invalid input, uniqueness conflict, missing record, and
/// everything else.
///
/// Services surface the first violated invariant and stop; there is no
/// multi-error aggregation and no automatic retry anywhere in this crate.

use serde::{Deserialize, Serialize};

/// Domain result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Unified domain error
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Caller-supplied data violates a required invariant
    /// (empty title/name, missing owner)
    #[error("{0}")]
    Validation(String),

    /// A uniqueness invariant was violated (duplicate email/username)
    #[error("{0}")]
    Conflict(String),

    /// The referenced entity does not exist or is soft-deleted
    #[error("{0}")]
    NotFound(String),

    /// Store or hashing failure, not otherwise classified
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convenience constructor for validation failures
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Convenience constructor for missing records
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }
}

/// Convert sqlx errors to domain errors
///
/// The service-level uniqueness checks are advisory fast paths; the
/// database's partial unique indexes are the actual enforcement mechanism.
/// A constraint violation surfacing here is therefore translated into the
/// same `Conflict` the advisory check would have produced.
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return Error::Conflict(
                            "user with this email already exists".to_string(),
                        );
                    }
                    if constraint.contains("username") {
                        return Error::Conflict(
                            "user with this username already exists".to_string(),
                        );
                    }
                    return Error::Conflict(format!("constraint violation: {}", constraint));
                }
                Error::Internal(format!("database error: {}", db_err))
            }
            _ => Error::Internal(format!("database error: {}", err)),
        }
    }
}

impl From<crate::auth::password::PasswordError> for Error {
    fn from(err: crate::auth::password::PasswordError) -> Self {
        Error::Internal(format!("password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation("task title is required".to_string());
        assert_eq!(err.to_string(), "task title is required");

        let err = Error::NotFound("user not found".to_string());
        assert_eq!(err.to_string(), "user not found");

        let err = Error::Internal("connection reset".to_string());
        assert_eq!(err.to_string(), "internal error: connection reset");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
