//! PostgreSQL implementation of AccessPassRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use famlink_core::entities::AccessPass;
use famlink_core::error::DomainError;
use famlink_core::traits::{AccessPassRepository, RepoResult};

use crate::models::AccessPassModel;

use super::error::{map_db_error, map_unique_violation};

const ACCESS_PASS_COLUMNS: &str = "id, code_hash, code_preview, label, audience, grant_reason, \
     grant_tier, max_redemptions, redeemed_count, active, expires_at, created_at";

/// PostgreSQL implementation of AccessPassRepository
#[derive(Clone)]
pub struct PgAccessPassRepository {
    pool: PgPool,
}

impl PgAccessPassRepository {
    /// Create a new PgAccessPassRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessPassRepository for PgAccessPassRepository {
    #[instrument(skip(self, code_hash))]
    async fn find_by_code_hash(&self, code_hash: &str) -> RepoResult<Option<AccessPass>> {
        let result = sqlx::query_as::<_, AccessPassModel>(&format!(
            "SELECT {ACCESS_PASS_COLUMNS} FROM access_passes WHERE code_hash = $1"
        ))
        .bind(code_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AccessPass::try_from).transpose()
    }

    #[instrument(skip(self, pass))]
    async fn create(&self, pass: &AccessPass) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_passes (id, code_hash, code_preview, label, audience,
                                       grant_reason, grant_tier, max_redemptions,
                                       redeemed_count, active, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(pass.id)
        .bind(&pass.code_hash)
        .bind(&pass.code_preview)
        .bind(&pass.label)
        .bind(&pass.audience)
        .bind(&pass.grant_reason)
        .bind(pass.grant_tier.as_str())
        .bind(pass.max_redemptions)
        .bind(pass.redeemed_count)
        .bind(pass.active)
        .bind(pass.expires_at)
        .bind(pass.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::Validation("an access pass with this code already exists".to_string())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn try_redeem(&self, id: Uuid, now: DateTime<Utc>) -> RepoResult<bool> {
        // The cap, active flag, and expiry check ride on the same UPDATE as
        // the increment. Two concurrent redemptions of the last slot yield
        // exactly one affected row.
        let result = sqlx::query(
            r#"
            UPDATE access_passes
            SET redeemed_count = redeemed_count + 1
            WHERE id = $1
              AND active
              AND redeemed_count < max_redemptions
              AND (expires_at IS NULL OR expires_at > $2)
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("UPDATE access_passes SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AccessPassNotFound);
        }

        Ok(())
    }
}
