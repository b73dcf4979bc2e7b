//! Delivery ports - out-of-band side effects
//!
//! Email delivery and notification dispatch are best-effort: a failure is
//! logged by the caller and never rolls back the durable transition that
//! already happened.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::value_objects::{EmailAddress, ProfileId};

/// A failed out-of-band delivery attempt
#[derive(Debug, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Carries an invitation token to the invitee by email
#[async_trait]
pub trait InviteDelivery: Send + Sync {
    async fn send_invitation(
        &self,
        recipient: &EmailAddress,
        inviter_name: &str,
        token: &str,
    ) -> Result<(), DeliveryError>;
}

/// Event payloads pushed to family members
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    FamilyMemberJoined {
        member_id: ProfileId,
        member_name: String,
    },
    CoParentLinked {
        partner_id: ProfileId,
        partner_name: String,
    },
}

/// Dispatches an event notification to a profile
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        target: &ProfileId,
        event: NotificationEvent,
    ) -> Result<(), DeliveryError>;
}
