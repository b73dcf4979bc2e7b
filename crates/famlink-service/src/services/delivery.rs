//! Log-only implementations of the delivery ports
//!
//! Production deployments wire a real email provider and push gateway in
//! place of these. Both ports are best-effort by contract, so the log-only
//! versions are also what local development runs with.

use async_trait::async_trait;
use tracing::info;

use famlink_core::traits::{DeliveryError, InviteDelivery, NotificationEvent, Notifier};
use famlink_core::value_objects::{EmailAddress, ProfileId};

/// Invite delivery that logs instead of sending email
#[derive(Debug, Clone, Default)]
pub struct TracingInviteDelivery;

#[async_trait]
impl InviteDelivery for TracingInviteDelivery {
    async fn send_invitation(
        &self,
        recipient: &EmailAddress,
        inviter_name: &str,
        token: &str,
    ) -> Result<(), DeliveryError> {
        info!(
            recipient = %recipient,
            inviter = %inviter_name,
            token_prefix = &token[..token.len().min(8)],
            "Invitation email (log-only delivery)"
        );
        Ok(())
    }
}

/// Notifier that logs instead of pushing
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(
        &self,
        target: &ProfileId,
        event: NotificationEvent,
    ) -> Result<(), DeliveryError> {
        info!(target = %target, event = ?event, "Notification (log-only dispatch)");
        Ok(())
    }
}
