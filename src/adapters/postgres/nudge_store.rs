//! PostgreSQL adapter for NudgeStore.
//!
//! The `(user_id, nudge_id)` primary key plus `ON CONFLICT` upsert keeps a
//! re-fired rule on one row instead of accumulating duplicates.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, NudgeId, Timestamp, UserId};
use crate::domain::nudge::{Nudge, NudgeKind, NudgePriority, NudgeStatus, NudgeSurface};
use crate::ports::NudgeStore;

/// PostgreSQL implementation of NudgeStore.
pub struct PgNudgeStore {
    pool: PgPool,
}

impl PgNudgeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Nudge, DomainError> {
        let user_id: String = row.get("user_id");
        let nudge_id: String = row.get("nudge_id");
        let title: String = row.get("title");
        let body: String = row.get("body");
        let cta: String = row.get("cta");
        let surface: String = row.get("surface");
        let priority: String = row.get("priority");
        let status: String = row.get("status");
        let shown_at: chrono::DateTime<chrono::Utc> = row.get("shown_at");
        let shown_count: i32 = row.get("shown_count");

        let kind: NudgeKind = serde_json::from_value(row.get("kind")).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to deserialize nudge kind: {}", e),
            )
        })?;

        Ok(Nudge {
            user_id: UserId::new(user_id)?,
            nudge_id: NudgeId::new(nudge_id)?,
            kind,
            title,
            body,
            cta,
            surface: parse_surface(&surface)?,
            priority: parse_priority(&priority)?,
            status: parse_status(&status)?,
            shown_at: Timestamp::from_datetime(shown_at),
            shown_count: shown_count as u32,
        })
    }
}

fn parse_surface(s: &str) -> Result<NudgeSurface, DomainError> {
    match s {
        "toast" => Ok(NudgeSurface::Toast),
        "banner" => Ok(NudgeSurface::Banner),
        "email" => Ok(NudgeSurface::Email),
        other => Err(DomainError::validation(
            "surface",
            format!("Unknown nudge surface '{}'", other),
        )),
    }
}

fn parse_priority(s: &str) -> Result<NudgePriority, DomainError> {
    match s {
        "low" => Ok(NudgePriority::Low),
        "medium" => Ok(NudgePriority::Medium),
        "high" => Ok(NudgePriority::High),
        other => Err(DomainError::validation(
            "priority",
            format!("Unknown nudge priority '{}'", other),
        )),
    }
}

fn parse_status(s: &str) -> Result<NudgeStatus, DomainError> {
    match s {
        "active" => Ok(NudgeStatus::Active),
        "dismissed" => Ok(NudgeStatus::Dismissed),
        other => Err(DomainError::validation(
            "status",
            format!("Unknown nudge status '{}'", other),
        )),
    }
}

#[async_trait]
impl NudgeStore for PgNudgeStore {
    async fn record_shown(&self, nudge: &Nudge) -> Result<(), DomainError> {
        let kind = serde_json::to_value(nudge.kind)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO nudges
                (user_id, nudge_id, kind, title, body, cta,
                 surface, priority, status, shown_at, shown_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id, nudge_id) DO UPDATE
            SET shown_count = nudges.shown_count + 1,
                shown_at = EXCLUDED.shown_at
            WHERE nudges.status <> 'dismissed'
            "#,
        )
        .bind(nudge.user_id.as_str())
        .bind(nudge.nudge_id.as_str())
        .bind(kind)
        .bind(&nudge.title)
        .bind(&nudge.body)
        .bind(&nudge.cta)
        .bind(nudge.surface.as_str())
        .bind(nudge.priority.as_str())
        .bind(nudge.status.as_str())
        .bind(nudge.shown_at.as_datetime())
        .bind(nudge.shown_count as i32)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        nudge_id: &NudgeId,
    ) -> Result<Option<Nudge>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, nudge_id, kind, title, body, cta,
                   surface, priority, status, shown_at, shown_count
            FROM nudges
            WHERE user_id = $1 AND nudge_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(nudge_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn list_active_for_user(&self, user_id: &UserId) -> Result<Vec<Nudge>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, nudge_id, kind, title, body, cta,
                   surface, priority, status, shown_at, shown_count
            FROM nudges
            WHERE user_id = $1 AND status = 'active'
            ORDER BY shown_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.iter().map(Self::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_parsing_round_trips() {
        for surface in [NudgeSurface::Toast, NudgeSurface::Banner, NudgeSurface::Email] {
            assert_eq!(parse_surface(surface.as_str()).unwrap(), surface);
        }
        assert!(parse_surface("pigeon").is_err());
    }

    #[test]
    fn priority_parsing_round_trips() {
        for priority in [NudgePriority::Low, NudgePriority::Medium, NudgePriority::High] {
            assert_eq!(parse_priority(priority.as_str()).unwrap(), priority);
        }
        assert!(parse_priority("urgent").is_err());
    }

    #[test]
    fn status_parsing_round_trips() {
        for status in [NudgeStatus::Active, NudgeStatus::Dismissed] {
            assert_eq!(parse_status(status.as_str()).unwrap(), status);
        }
        assert!(parse_status("snoozed").is_err());
    }
}
