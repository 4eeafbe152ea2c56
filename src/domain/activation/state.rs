//! Activation sub-structure embedded on the profile aggregate.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{NudgeId, Timestamp};

use super::ActivationPath;

/// Per-path behavioral counters, maintained by the platform's tracking glue.
/// All fields default to zero so rule predicates are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehavioralSignals {
    pub deals_viewed: u32,
    pub deals_saved: u32,
    pub watchlists_created: u32,
    pub portfolio_assets_linked: u32,
    pub portfolio_syncs: u32,
    pub posts_created: u32,
    pub replies_created: u32,
    pub searches_run: u32,
}

/// Activation state: path, counters, dismissals, and milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationState {
    path: ActivationPath,

    #[serde(default)]
    signals: BehavioralSignals,

    /// Nudge ids the user has dismissed. Dismissal is permanent for the
    /// lifetime of the set; a dismissed rule never fires again.
    #[serde(default)]
    dismissed_nudges: BTreeSet<NudgeId>,

    #[serde(default)]
    milestones: BTreeMap<String, Timestamp>,

    onboarded_at: Timestamp,
}

impl ActivationState {
    /// Creates activation state for a user onboarding now.
    pub fn new(path: ActivationPath, onboarded_at: Timestamp) -> Self {
        Self {
            path,
            signals: BehavioralSignals::default(),
            dismissed_nudges: BTreeSet::new(),
            milestones: BTreeMap::new(),
            onboarded_at,
        }
    }

    pub fn path(&self) -> ActivationPath {
        self.path
    }

    pub fn signals(&self) -> &BehavioralSignals {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut BehavioralSignals {
        &mut self.signals
    }

    pub fn onboarded_at(&self) -> Timestamp {
        self.onboarded_at
    }

    pub fn milestones(&self) -> &BTreeMap<String, Timestamp> {
        &self.milestones
    }

    /// Whole days since onboarding, clamped at zero.
    pub fn days_since_onboarding(&self, now: Timestamp) -> u32 {
        now.days_since(&self.onboarded_at).max(0) as u32
    }

    /// True when the user has dismissed the given nudge.
    pub fn is_dismissed(&self, nudge_id: &str) -> bool {
        self.dismissed_nudges.contains(nudge_id)
    }

    /// Records a dismissal.
    pub fn dismiss(&mut self, nudge_id: NudgeId) {
        self.dismissed_nudges.insert(nudge_id);
    }

    pub fn dismissed(&self) -> &BTreeSet<NudgeId> {
        &self.dismissed_nudges
    }

    /// Records a milestone the first time it is reached; later calls keep
    /// the original timestamp.
    pub fn record_milestone(&mut self, key: impl Into<String>, reached_at: Timestamp) {
        self.milestones.entry(key.into()).or_insert(reached_at);
    }
}
