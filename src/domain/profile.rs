//! EngagementProfile aggregate root.
//!
//! One profile per user, holding the engagement, lifecycle, and activation
//! sub-structures. Every mutation bumps the revision counter; stores use
//! the expected revision to reject lost updates.

use serde::{Deserialize, Serialize};

use crate::domain::activation::{ActivationPath, ActivationState};
use crate::domain::engagement::{ChurnRisk, EngagementSignals, EngagementState};
use crate::domain::foundation::{NudgeId, Revision, Timestamp, UserId};
use crate::domain::lifecycle::{LifecycleRecord, LifecycleState};

/// Engagement profile aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementProfile {
    user_id: UserId,
    engagement: EngagementState,
    lifecycle: LifecycleRecord,
    activation: ActivationState,
    revision: Revision,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl EngagementProfile {
    /// Creates a fresh profile for a user onboarding now.
    pub fn new(user_id: UserId, path: ActivationPath, now: Timestamp) -> Self {
        Self {
            user_id,
            engagement: EngagementState::default(),
            lifecycle: LifecycleRecord::new(now),
            activation: ActivationState::new(path, now),
            revision: Revision::initial(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reassembles a profile from persisted parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        user_id: UserId,
        engagement: EngagementState,
        lifecycle: LifecycleRecord,
        activation: ActivationState,
        revision: Revision,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            engagement,
            lifecycle,
            activation,
            revision,
            created_at,
            updated_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn engagement(&self) -> &EngagementState {
        &self.engagement
    }

    pub fn lifecycle(&self) -> &LifecycleRecord {
        &self.lifecycle
    }

    pub fn activation(&self) -> &ActivationState {
        &self.activation
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Applies one classification run: stores the freshly computed churn
    /// risk, transitions the lifecycle record if needed, and refreshes its
    /// derived settings. Returns true when a transition occurred.
    pub fn apply_classification(
        &mut self,
        churn: ChurnRisk,
        next: LifecycleState,
        now: Timestamp,
    ) -> bool {
        let score = churn.score();
        self.engagement.churn = Some(churn);
        let transitioned = self.lifecycle.apply(next, score, now);
        self.touch(now);
        transitioned
    }

    /// Replaces the raw engagement counters (signal store ingestion).
    pub fn update_signals(&mut self, signals: EngagementSignals, now: Timestamp) {
        self.engagement.signals = signals;
        self.touch(now);
    }

    /// Records a nudge dismissal on the activation sub-structure.
    pub fn dismiss_nudge(&mut self, nudge_id: NudgeId, now: Timestamp) {
        self.activation.dismiss(nudge_id);
        self.touch(now);
    }

    /// Records an activation milestone.
    pub fn record_milestone(&mut self, key: impl Into<String>, now: Timestamp) {
        self.activation.record_milestone(key, now);
        self.touch(now);
    }

    fn touch(&mut self, now: Timestamp) {
        self.revision = self.revision.next();
        self.updated_at = now;
    }
}
