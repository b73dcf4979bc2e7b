//! Model ↔ entity mappers
//!
//! Status and role columns are stored as strings; conversion back into the
//! domain enums is fallible and surfaces corrupt rows as database errors
//! instead of silently defaulting.

mod access_pass;
mod child_permissions;
mod invitation;
mod membership;
mod profile;

use famlink_core::DomainError;

/// Error for a stored enum value the domain does not recognize
pub(crate) fn bad_enum(column: &str, value: &str) -> DomainError {
    DomainError::Database(format!("unrecognized {column} value: {value}"))
}
