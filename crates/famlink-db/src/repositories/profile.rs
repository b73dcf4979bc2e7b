//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use famlink_core::entities::{ChildPermissions, Profile, SubscriptionTier};
use famlink_core::traits::{ProfileRepository, RepoResult};
use famlink_core::value_objects::{EmailAddress, ProfileId};

use crate::models::{ChildPermissionsModel, ProfileModel};

use super::error::{map_db_error, map_unique_violation, profile_not_found};

const PROFILE_COLUMNS: &str = "id, auth_user_id, email, display_name, co_parent_id, role, \
     subscription_tier, subscription_status, trial_ends_at, access_reason, is_admin, \
     created_at, updated_at";

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ProfileId) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_auth_user_id(&self, auth_user_id: &str) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE auth_user_id = $1"
        ))
        .bind(auth_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &EmailAddress) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE LOWER(email) = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self, profile))]
    async fn create(&self, profile: &Profile) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, auth_user_id, email, display_name, co_parent_id, role,
                                  subscription_tier, subscription_status, trial_ends_at,
                                  is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(profile.id.as_str())
        .bind(&profile.auth_user_id)
        .bind(profile.email.as_str())
        .bind(&profile.display_name)
        .bind(profile.co_parent_id.as_ref().map(ProfileId::as_str))
        .bind(profile.role.as_str())
        .bind(profile.subscription_tier.as_str())
        .bind(profile.subscription_status.as_str())
        .bind(profile.trial_ends_at)
        .bind(profile.is_admin)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                famlink_core::DomainError::Validation("profile already exists".to_string())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, profile))]
    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET email = $2, display_name = $3, co_parent_id = $4, role = $5,
                subscription_tier = $6, subscription_status = $7, trial_ends_at = $8,
                is_admin = $9, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(profile.id.as_str())
        .bind(profile.email.as_str())
        .bind(&profile.display_name)
        .bind(profile.co_parent_id.as_ref().map(ProfileId::as_str))
        .bind(profile.role.as_str())
        .bind(profile.subscription_tier.as_str())
        .bind(profile.subscription_status.as_str())
        .bind(profile.trial_ends_at)
        .bind(profile.is_admin)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(&profile.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn start_trial(&self, id: &ProfileId, ends_at: DateTime<Utc>) -> RepoResult<()> {
        // Never downgrades an active paid subscription; extends an existing
        // trial rather than shortening it.
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET subscription_status = 'trialing',
                trial_ends_at = GREATEST(COALESCE(trial_ends_at, $2), $2),
                updated_at = NOW()
            WHERE id = $1 AND subscription_status <> 'active'
            "#,
        )
        .bind(id.as_str())
        .bind(ends_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Zero rows means the profile is on an active subscription already;
        // the trial bonus simply does not apply.
        let _ = result.rows_affected();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn apply_access_grant(
        &self,
        id: &ProfileId,
        tier: SubscriptionTier,
        reason: &str,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET subscription_tier = $2, subscription_status = 'active',
                access_reason = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(tier.as_str())
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_child_permissions(
        &self,
        child_id: &ProfileId,
    ) -> RepoResult<Option<ChildPermissions>> {
        let result = sqlx::query_as::<_, ChildPermissionsModel>(
            r#"
            SELECT child_id, can_send_messages, can_mood_checkin,
                   can_view_schedule_details, can_write_journal, updated_at
            FROM child_permissions
            WHERE child_id = $1
            "#,
        )
        .bind(child_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChildPermissions::from))
    }

    #[instrument(skip(self, permissions))]
    async fn upsert_child_permissions(&self, permissions: &ChildPermissions) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO child_permissions (child_id, can_send_messages, can_mood_checkin,
                                           can_view_schedule_details, can_write_journal, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (child_id) DO UPDATE
            SET can_send_messages = EXCLUDED.can_send_messages,
                can_mood_checkin = EXCLUDED.can_mood_checkin,
                can_view_schedule_details = EXCLUDED.can_view_schedule_details,
                can_write_journal = EXCLUDED.can_write_journal,
                updated_at = NOW()
            "#,
        )
        .bind(permissions.child_id.as_str())
        .bind(permissions.can_send_messages)
        .bind(permissions.can_mood_checkin)
        .bind(permissions.can_view_schedule_details)
        .bind(permissions.can_write_journal)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
