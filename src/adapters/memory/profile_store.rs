//! In-memory ProfileStore.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Revision, UserId};
use crate::domain::EngagementProfile;
use crate::ports::ProfileStore;

/// ProfileStore over a mutex-guarded map, keyed by user ID. The BTreeMap
/// keeps `list_page` ordering deterministic.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<BTreeMap<UserId, EngagementProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn create(&self, profile: &EngagementProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.contains_key(profile.user_id()) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Profile already exists for user '{}'", profile.user_id()),
            ));
        }
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EngagementProfile>, DomainError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn update(
        &self,
        profile: &EngagementProfile,
        expected: Revision,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        let existing = profiles
            .get(profile.user_id())
            .ok_or_else(|| DomainError::profile_not_found(profile.user_id()))?;

        if existing.revision() != expected {
            return Err(DomainError::revision_conflict(profile.user_id()));
        }

        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn list_page(&self, limit: u32) -> Result<Vec<EngagementProfile>, DomainError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .values()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
