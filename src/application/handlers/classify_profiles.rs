//! ClassifyProfiles - recomputes churn risk and lifecycle state for one
//! caller or a bounded batch of profiles.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::domain::engagement::ChurnRisk;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::lifecycle::{classify, ClassificationInput, LifecycleState};
use crate::domain::EngagementProfile;
use crate::ports::ProfileStore;

/// Which profiles to classify.
#[derive(Debug, Clone)]
pub enum ClassifyMode {
    /// The authenticated caller's own profile.
    Caller(UserId),
    /// One bounded page of all profiles, for the scheduler.
    AllProfiles,
}

/// Command to run classification.
#[derive(Debug, Clone)]
pub struct ClassifyProfilesCommand {
    pub mode: ClassifyMode,
}

/// Per-profile outcome of a classification run.
#[derive(Debug, Clone)]
pub struct ProfileOutcome {
    pub user_id: UserId,
    pub state: LifecycleState,
    pub churn_score: u8,
    pub transitioned: bool,
    /// Set when the write for this profile failed; the profile is excluded
    /// from `updated_count` but siblings are unaffected.
    pub error: Option<String>,
}

/// Result of a classification run.
#[derive(Debug, Clone)]
pub struct ClassifyProfilesResult {
    pub updated_count: u32,
    pub outcomes: Vec<ProfileOutcome>,
}

/// Handler orchestrating scorer, classifier, and profile writes.
pub struct ClassifyProfilesHandler {
    store: Arc<dyn ProfileStore>,
    page_size: u32,
    concurrency: usize,
}

impl ClassifyProfilesHandler {
    pub fn new(store: Arc<dyn ProfileStore>, page_size: u32, concurrency: usize) -> Self {
        Self {
            store,
            page_size,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn handle(
        &self,
        cmd: ClassifyProfilesCommand,
        metadata: CommandMetadata,
    ) -> Result<ClassifyProfilesResult, DomainError> {
        let now = Timestamp::now();

        let profiles = match &cmd.mode {
            ClassifyMode::Caller(user_id) => {
                if user_id != &metadata.user_id {
                    return Err(DomainError::new(
                        ErrorCode::Forbidden,
                        "Cannot classify another user's profile",
                    ));
                }
                // A caller without a profile gets an empty result.
                self.store
                    .find_by_user(user_id)
                    .await?
                    .into_iter()
                    .collect::<Vec<_>>()
            }
            ClassifyMode::AllProfiles => self.store.list_page(self.page_size).await?,
        };

        let outcomes: Vec<ProfileOutcome> = stream::iter(profiles)
            .map(|profile| self.classify_one(profile, now))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let updated_count = outcomes.iter().filter(|o| o.error.is_none()).count() as u32;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            updated_count,
            total = outcomes.len(),
            "classification run finished"
        );

        Ok(ClassifyProfilesResult {
            updated_count,
            outcomes,
        })
    }

    /// Classifies and persists a single profile. Write failures become part
    /// of the outcome instead of aborting the run.
    async fn classify_one(&self, mut profile: EngagementProfile, now: Timestamp) -> ProfileOutcome {
        let expected = profile.revision();

        let churn = ChurnRisk::compute(&profile.engagement().signals, now);
        let churn_score = churn.score();

        let next = classify(&ClassificationInput {
            signals: &profile.engagement().signals,
            churn: &churn,
            current: profile.lifecycle().current(),
        });

        let transitioned = profile.apply_classification(churn, next, now);

        let error = match self.store.update(&profile, expected).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    user_id = %profile.user_id(),
                    error = %e,
                    "profile write failed during classification"
                );
                Some(e.to_string())
            }
        };

        ProfileOutcome {
            user_id: profile.user_id().clone(),
            state: next,
            churn_score,
            transitioned,
            error,
        }
    }
}
