//! PostgreSQL implementation of InvitationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use famlink_core::entities::{Invitation, InvitationKind};
use famlink_core::error::DomainError;
use famlink_core::traits::{InvitationRepository, RepoResult};
use famlink_core::value_objects::{EmailAddress, ProfileId};

use crate::models::InvitationModel;

use super::error::{map_db_error, map_unique_violation};

const INVITATION_COLUMNS: &str =
    "id, token, inviter_id, invitee_email, kind, status, created_at, expires_at";

/// PostgreSQL implementation of InvitationRepository
#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    /// Create a new PgInvitationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    #[instrument(skip(self, token))]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Invitation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Invitation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending(
        &self,
        inviter_id: &ProfileId,
        invitee_email: &EmailAddress,
        kind: InvitationKind,
    ) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(&format!(
            r#"
            SELECT {INVITATION_COLUMNS}
            FROM invitations
            WHERE inviter_id = $1 AND invitee_email = $2 AND kind = $3 AND status = 'pending'
            "#
        ))
        .bind(inviter_id.as_str())
        .bind(invitee_email.as_str())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Invitation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_inviter(&self, inviter_id: &ProfileId) -> RepoResult<Vec<Invitation>> {
        let results = sqlx::query_as::<_, InvitationModel>(&format!(
            r#"
            SELECT {INVITATION_COLUMNS}
            FROM invitations
            WHERE inviter_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(inviter_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Invitation::try_from).collect()
    }

    #[instrument(skip(self, invitation))]
    async fn create(&self, invitation: &Invitation) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO invitations (id, token, inviter_id, invitee_email, kind, status,
                                     created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(invitation.id)
        .bind(&invitation.token)
        .bind(invitation.inviter_id.as_str())
        .bind(invitation.invitee_email.as_str())
        .bind(invitation.kind.as_str())
        .bind(invitation.status.as_str())
        .bind(invitation.created_at)
        .bind(invitation.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateInvitation))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'revoked'
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_expired(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'expired'
            WHERE id = $1 AND status = 'pending' AND expires_at < NOW()
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
