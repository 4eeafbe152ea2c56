//! NudgeStore port for durable nudge records.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NudgeId, UserId};
use crate::domain::nudge::Nudge;

/// Persistence for nudge records, keyed by `(user_id, nudge_id)`.
#[async_trait]
pub trait NudgeStore: Send + Sync {
    /// Upsert a fired nudge: inserts a fresh record, or bumps `shown_count`
    /// and `shown_at` on the existing one. A dismissed record is left
    /// untouched.
    async fn record_shown(&self, nudge: &Nudge) -> Result<(), DomainError>;

    /// Find one nudge record.
    async fn find(
        &self,
        user_id: &UserId,
        nudge_id: &NudgeId,
    ) -> Result<Option<Nudge>, DomainError>;

    /// All active nudges for a user, for monitoring surfaces.
    async fn list_active_for_user(&self, user_id: &UserId) -> Result<Vec<Nudge>, DomainError>;
}
