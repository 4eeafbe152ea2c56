//! ProfileStore port for engagement profile persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Revision, UserId};
use crate::domain::EngagementProfile;

/// Persistence for the profile aggregate.
///
/// `update` takes the revision the caller read; implementations must reject
/// the write with `ErrorCode::RevisionConflict` when the persisted revision
/// no longer matches, so concurrent runs cannot silently overwrite each
/// other.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create a new profile. Fails if one already exists for the user.
    async fn create(&self, profile: &EngagementProfile) -> Result<(), DomainError>;

    /// Find a profile by user ID.
    async fn find_by_user(&self, user_id: &UserId)
        -> Result<Option<EngagementProfile>, DomainError>;

    /// Write a mutated profile, guarded by the revision read before mutating.
    async fn update(
        &self,
        profile: &EngagementProfile,
        expected: Revision,
    ) -> Result<(), DomainError>;

    /// One bounded page of profiles for a batch run, ordered by user ID.
    async fn list_page(&self, limit: u32) -> Result<Vec<EngagementProfile>, DomainError>;
}
