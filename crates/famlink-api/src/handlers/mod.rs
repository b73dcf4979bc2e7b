//! Request handlers organized by domain

pub mod access_passes;
pub mod capabilities;
pub mod health;
pub mod invitations;
