//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use famlink_core::entities::FamilyMembership;
use famlink_core::error::DomainError;
use famlink_core::traits::{MembershipRepository, RepoResult};
use famlink_core::value_objects::ProfileId;

use crate::models::FamilyMembershipModel;

use super::error::map_db_error;

const MEMBERSHIP_COLUMNS: &str =
    "id, member_id, primary_parent_id, status, invited_by, accepted_at";

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find_active_by_member(
        &self,
        member_id: &ProfileId,
    ) -> RepoResult<Option<FamilyMembership>> {
        let result = sqlx::query_as::<_, FamilyMembershipModel>(&format!(
            r#"
            SELECT {MEMBERSHIP_COLUMNS}
            FROM family_memberships
            WHERE member_id = $1 AND status = 'active'
            "#
        ))
        .bind(member_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(FamilyMembership::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_primary_parent(
        &self,
        primary_parent_id: &ProfileId,
    ) -> RepoResult<Vec<FamilyMembership>> {
        let results = sqlx::query_as::<_, FamilyMembershipModel>(&format!(
            r#"
            SELECT {MEMBERSHIP_COLUMNS}
            FROM family_memberships
            WHERE primary_parent_id = $1 AND status = 'active'
            ORDER BY accepted_at DESC
            "#
        ))
        .bind(primary_parent_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results
            .into_iter()
            .map(FamilyMembership::try_from)
            .collect()
    }

    #[instrument(skip(self))]
    async fn revoke(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE family_memberships
            SET status = 'revoked'
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MembershipNotFound);
        }

        Ok(())
    }
}
