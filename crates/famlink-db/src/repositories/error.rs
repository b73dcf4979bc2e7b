//! Error handling utilities for repositories

use famlink_core::error::DomainError;
use famlink_core::value_objects::ProfileId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::Database(e.to_string())
}

/// Create a "profile not found" error
pub fn profile_not_found(id: &ProfileId) -> DomainError {
    DomainError::ProfileNotFound(id.clone())
}
