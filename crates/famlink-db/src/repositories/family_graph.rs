//! PostgreSQL implementation of FamilyGraphRepository
//!
//! Both operations run the invitation claim and the graph mutation in one
//! transaction. The claim is a conditional `pending -> accepted` update, so
//! a token can only ever be consumed once no matter how many acceptances
//! race on it.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use famlink_core::entities::FamilyMembership;
use famlink_core::error::DomainError;
use famlink_core::traits::{FamilyGraphRepository, RepoResult};
use famlink_core::value_objects::ProfileId;

use super::error::map_db_error;

/// PostgreSQL implementation of FamilyGraphRepository
#[derive(Clone)]
pub struct PgFamilyGraphRepository {
    pool: PgPool,
}

impl PgFamilyGraphRepository {
    /// Create a new PgFamilyGraphRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Claim the invitation inside the transaction: pending -> accepted
    async fn claim_invitation(
        tx: &mut Transaction<'_, Postgres>,
        token: &str,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'accepted'
            WHERE token = $1 AND status = 'pending'
            "#,
        )
        .bind(token)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyAccepted);
        }

        Ok(())
    }

    /// Point one profile at its co-parent, guarded against existing links
    async fn set_co_parent(
        tx: &mut Transaction<'_, Postgres>,
        id: &ProfileId,
        partner: &ProfileId,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET co_parent_id = $2, updated_at = NOW()
            WHERE id = $1 AND co_parent_id IS NULL
            "#,
        )
        .bind(id.as_str())
        .bind(partner.as_str())
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyLinked);
        }

        Ok(())
    }
}

#[async_trait]
impl FamilyGraphRepository for PgFamilyGraphRepository {
    #[instrument(skip(self, token))]
    async fn link_co_parents(
        &self,
        token: &str,
        accepter_id: &ProfileId,
        inviter_id: &ProfileId,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::claim_invitation(&mut tx, token).await?;
        // Both pointers or neither. An error here drops the transaction and
        // rolls back the claim with it.
        Self::set_co_parent(&mut tx, accepter_id, inviter_id).await?;
        Self::set_co_parent(&mut tx, inviter_id, accepter_id).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, token, membership))]
    async fn attach_third_party(
        &self,
        token: &str,
        membership: &FamilyMembership,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::claim_invitation(&mut tx, token).await?;

        sqlx::query(
            r#"
            INSERT INTO family_memberships (id, member_id, primary_parent_id, status,
                                            invited_by, accepted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(membership.id)
        .bind(membership.member_id.as_str())
        .bind(membership.primary_parent_id.as_str())
        .bind(membership.status.as_str())
        .bind(membership.invited_by.as_str())
        .bind(membership.accepted_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return DomainError::AlreadyFamilyMember;
                }
            }
            map_db_error(e)
        })?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
