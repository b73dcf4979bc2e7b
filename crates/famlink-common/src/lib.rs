//! # famlink-common
//!
//! Shared utilities: configuration, application errors, identity-token
//! verification, and telemetry setup.

pub mod config;
pub mod error;
pub mod identity;
pub mod telemetry;

pub use config::{
    AppConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, IdentityConfig, InviteConfig,
    ServerConfig,
};
pub use error::AppError;
pub use identity::{IdentityError, IdentityVerifier, VerifiedIdentity};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
