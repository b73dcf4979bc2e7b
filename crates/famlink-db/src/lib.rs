//! # famlink-db
//!
//! Database layer implementing the domain repository traits with PostgreSQL
//! via SQLx. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model ↔ entity mappers
//! - Repository implementations, including the conditional updates the
//!   linking and redemption race guards depend on

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAccessPassRepository, PgFamilyGraphRepository, PgInvitationRepository,
    PgMembershipRepository, PgProfileRepository,
};
