//! PostgreSQL adapter for ProfileStore.
//!
//! Sub-structures are stored as JSONB columns; the `revision` column backs
//! the optimistic-concurrency guard.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::activation::ActivationState;
use crate::domain::engagement::EngagementState;
use crate::domain::foundation::{DomainError, ErrorCode, Revision, Timestamp, UserId};
use crate::domain::lifecycle::LifecycleRecord;
use crate::domain::EngagementProfile;
use crate::ports::ProfileStore;

/// PostgreSQL implementation of ProfileStore.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<EngagementProfile, DomainError> {
        let user_id: String = row.get("user_id");
        let revision: i32 = row.get("revision");
        let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
        let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

        let engagement: EngagementState = serde_json::from_value(row.get("engagement"))
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to deserialize engagement state: {}", e),
                )
            })?;

        let lifecycle: LifecycleRecord =
            serde_json::from_value(row.get("lifecycle")).map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to deserialize lifecycle record: {}", e),
                )
            })?;

        let activation: ActivationState =
            serde_json::from_value(row.get("activation")).map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to deserialize activation state: {}", e),
                )
            })?;

        Ok(EngagementProfile::from_parts(
            UserId::new(user_id)?,
            engagement,
            lifecycle,
            activation,
            Revision::from_u32(revision as u32)?,
            Timestamp::from_datetime(created_at),
            Timestamp::from_datetime(updated_at),
        ))
    }

    fn json_columns(
        profile: &EngagementProfile,
    ) -> Result<(serde_json::Value, serde_json::Value, serde_json::Value), DomainError> {
        let engagement = serde_json::to_value(profile.engagement())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        let lifecycle = serde_json::to_value(profile.lifecycle())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        let activation = serde_json::to_value(profile.activation())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        Ok((engagement, lifecycle, activation))
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn create(&self, profile: &EngagementProfile) -> Result<(), DomainError> {
        let (engagement, lifecycle, activation) = Self::json_columns(profile)?;

        sqlx::query(
            r#"
            INSERT INTO engagement_profiles
                (user_id, engagement, lifecycle, activation, revision, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(engagement)
        .bind(lifecycle)
        .bind(activation)
        .bind(profile.revision().as_u32() as i32)
        .bind(profile.created_at().as_datetime())
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EngagementProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, engagement, lifecycle, activation, revision, created_at, updated_at
            FROM engagement_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn update(
        &self,
        profile: &EngagementProfile,
        expected: Revision,
    ) -> Result<(), DomainError> {
        let (engagement, lifecycle, activation) = Self::json_columns(profile)?;

        let result = sqlx::query(
            r#"
            UPDATE engagement_profiles
            SET engagement = $2,
                lifecycle = $3,
                activation = $4,
                revision = $5,
                updated_at = $6
            WHERE user_id = $1 AND revision = $7
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(engagement)
        .bind(lifecycle)
        .bind(activation)
        .bind(profile.revision().as_u32() as i32)
        .bind(profile.updated_at().as_datetime())
        .bind(expected.as_u32() as i32)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::revision_conflict(profile.user_id()));
        }
        Ok(())
    }

    async fn list_page(&self, limit: u32) -> Result<Vec<EngagementProfile>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, engagement, lifecycle, activation, revision, created_at, updated_at
            FROM engagement_profiles
            ORDER BY user_id
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.iter().map(Self::from_row).collect()
    }
}
