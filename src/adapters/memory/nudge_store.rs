//! In-memory NudgeStore.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NudgeId, UserId};
use crate::domain::nudge::Nudge;
use crate::ports::NudgeStore;

/// NudgeStore over a mutex-guarded map, keyed by `(user_id, nudge_id)`.
#[derive(Default)]
pub struct MemoryNudgeStore {
    nudges: Mutex<BTreeMap<(UserId, NudgeId), Nudge>>,
}

impl MemoryNudgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: flips an existing record to dismissed, as the dismissal
    /// endpoint elsewhere in the platform would.
    pub fn dismiss(&self, user_id: &UserId, nudge_id: &NudgeId) {
        let mut nudges = self.nudges.lock().unwrap();
        if let Some(nudge) = nudges.get_mut(&(user_id.clone(), nudge_id.clone())) {
            nudge.dismiss();
        }
    }
}

#[async_trait]
impl NudgeStore for MemoryNudgeStore {
    async fn record_shown(&self, nudge: &Nudge) -> Result<(), DomainError> {
        let mut nudges = self.nudges.lock().unwrap();
        let key = (nudge.user_id.clone(), nudge.nudge_id.clone());

        match nudges.get_mut(&key) {
            Some(existing) if !existing.is_active() => {}
            Some(existing) => existing.record_shown(nudge.shown_at),
            None => {
                nudges.insert(key, nudge.clone());
            }
        }
        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        nudge_id: &NudgeId,
    ) -> Result<Option<Nudge>, DomainError> {
        Ok(self
            .nudges
            .lock()
            .unwrap()
            .get(&(user_id.clone(), nudge_id.clone()))
            .cloned())
    }

    async fn list_active_for_user(&self, user_id: &UserId) -> Result<Vec<Nudge>, DomainError> {
        Ok(self
            .nudges
            .lock()
            .unwrap()
            .values()
            .filter(|n| &n.user_id == user_id && n.is_active())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::nudge::{build_nudge, GENERAL_RULES};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn sample(user_id: &str) -> Nudge {
        let rule = GENERAL_RULES.iter().find(|r| r.id == "streak_at_risk").unwrap();
        build_nudge(rule, &user(user_id), Timestamp::now())
    }

    #[tokio::test]
    async fn first_record_inserts() {
        let store = MemoryNudgeStore::new();
        let nudge = sample("user-1");
        store.record_shown(&nudge).await.unwrap();

        let found = store
            .find(&nudge.user_id, &nudge.nudge_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.shown_count, 1);
    }

    #[tokio::test]
    async fn repeat_record_bumps_count() {
        let store = MemoryNudgeStore::new();
        let first = sample("user-1");
        store.record_shown(&first).await.unwrap();

        let mut second = sample("user-1");
        second.shown_at = first.shown_at.plus_days(1);
        store.record_shown(&second).await.unwrap();

        let found = store
            .find(&first.user_id, &first.nudge_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.shown_count, 2);
        assert_eq!(found.shown_at, second.shown_at);

        let active = store.list_active_for_user(&user("user-1")).await.unwrap();
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn dismissed_record_is_left_untouched() {
        let store = MemoryNudgeStore::new();
        let nudge = sample("user-1");
        store.record_shown(&nudge).await.unwrap();
        store.dismiss(&nudge.user_id, &nudge.nudge_id);

        store.record_shown(&sample("user-1")).await.unwrap();

        let found = store
            .find(&nudge.user_id, &nudge.nudge_id)
            .await
            .unwrap()
            .unwrap();
        assert!(!found.is_active());
        assert_eq!(found.shown_count, 1);
    }

    #[tokio::test]
    async fn list_active_filters_by_user_and_status() {
        let store = MemoryNudgeStore::new();
        store.record_shown(&sample("user-1")).await.unwrap();
        store.record_shown(&sample("user-2")).await.unwrap();

        let active = store.list_active_for_user(&user("user-1")).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].user_id, user("user-1"));
    }
}
