//! # famlink-service
//!
//! Application layer: invitation issuance and acceptance, family linking,
//! capability resolution, and access-pass redemption. Services borrow a
//! [`ServiceContext`] holding the repository and delivery ports.

pub mod dto;
pub mod services;

pub use services::{
    AccessPassService, InvitationService, LinkingService, PermissionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TracingInviteDelivery, TracingNotifier,
};
