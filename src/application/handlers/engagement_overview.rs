//! GetEngagementOverview - read-only summary for monitoring surfaces.

use std::sync::Arc;

use crate::domain::engagement::ChurnRisk;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::lifecycle::{Intervention, LifecycleState, StateHistoryEntry};
use crate::domain::nudge::Nudge;
use crate::ports::{NudgeStore, ProfileStore};

/// Query for the caller's engagement overview.
#[derive(Debug, Clone)]
pub struct GetEngagementOverviewQuery {
    pub user_id: UserId,
}

/// Read model consumed by dashboards. No mutation happens here.
#[derive(Debug, Clone)]
pub struct EngagementOverview {
    pub state: LifecycleState,
    pub state_entered_at: Timestamp,
    pub churn: Option<ChurnRisk>,
    pub suppress_upsells: bool,
    pub interventions: Vec<Intervention>,
    pub history: Vec<StateHistoryEntry>,
    pub active_nudges: Vec<Nudge>,
}

/// Handler assembling the overview from both stores.
pub struct GetEngagementOverviewHandler {
    profiles: Arc<dyn ProfileStore>,
    nudges: Arc<dyn NudgeStore>,
}

impl GetEngagementOverviewHandler {
    pub fn new(profiles: Arc<dyn ProfileStore>, nudges: Arc<dyn NudgeStore>) -> Self {
        Self { profiles, nudges }
    }

    pub async fn handle(
        &self,
        query: GetEngagementOverviewQuery,
    ) -> Result<Option<EngagementOverview>, DomainError> {
        let Some(profile) = self.profiles.find_by_user(&query.user_id).await? else {
            return Ok(None);
        };

        let active_nudges = self.nudges.list_active_for_user(&query.user_id).await?;
        let lifecycle = profile.lifecycle();

        Ok(Some(EngagementOverview {
            state: lifecycle.current(),
            state_entered_at: lifecycle.open_entry().entered_at,
            churn: profile.engagement().churn.clone(),
            suppress_upsells: lifecycle.experience().suppress_upsells,
            interventions: lifecycle.interventions().to_vec(),
            history: lifecycle.history().to_vec(),
            active_nudges,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryNudgeStore, MemoryProfileStore};
    use crate::domain::activation::ActivationPath;
    use crate::domain::engagement::EngagementSignals;
    use crate::domain::EngagementProfile;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn missing_profile_returns_none() {
        let handler = GetEngagementOverviewHandler::new(
            Arc::new(MemoryProfileStore::new()),
            Arc::new(MemoryNudgeStore::new()),
        );

        let overview = handler
            .handle(GetEngagementOverviewQuery { user_id: user("ghost") })
            .await
            .unwrap();

        assert!(overview.is_none());
    }

    #[tokio::test]
    async fn overview_reflects_profile_state() {
        let profiles = Arc::new(MemoryProfileStore::new());
        let now = Timestamp::now();

        let mut profile =
            EngagementProfile::new(user("user-1"), ActivationPath::Balanced, now);
        let churn = ChurnRisk::compute(&EngagementSignals::default(), now);
        profile.apply_classification(churn, LifecycleState::AtRisk, now);
        profiles.create(&profile).await.unwrap();

        let handler =
            GetEngagementOverviewHandler::new(profiles, Arc::new(MemoryNudgeStore::new()));
        let overview = handler
            .handle(GetEngagementOverviewQuery { user_id: user("user-1") })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(overview.state, LifecycleState::AtRisk);
        assert!(overview.suppress_upsells);
        assert_eq!(overview.interventions.len(), 1);
        assert_eq!(overview.history.len(), 2);
        assert!(overview.churn.is_some());
        assert!(overview.active_nudges.is_empty());
    }
}
