//! Raw engagement counters supplied by the platform's signal store.
//!
//! Every field defaults to zero/empty so downstream scoring and
//! classification are total over partial input: a profile that has never
//! reported a signal still scores and classifies without error.

use serde::{Deserialize, Serialize};

/// Coarse onboarding stage flag set by the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStage {
    #[default]
    Onboarding,
    Activated,
}

/// A tracked recurring behavior pattern, flagged active or lapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLoop {
    pub loop_id: String,
    pub active: bool,
}

/// Per-user engagement counters for one scoring window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementSignals {
    pub sessions_this_week: u32,
    pub sessions_prior_week: u32,
    pub days_since_last_activity: u32,
    pub streak_weeks: u32,
    pub stage: EngagementStage,

    /// Capability tiers the user has unlocked, e.g. `"deal_syndication"`.
    pub unlocked_tiers: Vec<String>,

    pub habit_loops: Vec<HabitLoop>,

    /// Trailing 14-day nudge interaction counters.
    pub nudges_shown_14d: u32,
    pub nudges_dismissed_14d: u32,

    /// Trailing 14-day feature flow counters.
    pub flows_started_14d: u32,
    pub flows_abandoned_14d: u32,
}

impl EngagementSignals {
    /// Fraction of habit loops currently active, `None` when no loops exist.
    pub fn active_loop_fraction(&self) -> Option<f64> {
        if self.habit_loops.is_empty() {
            return None;
        }
        let active = self.habit_loops.iter().filter(|l| l.active).count();
        Some(active as f64 / self.habit_loops.len() as f64)
    }

    /// True when the user has unlocked any capability tier.
    pub fn has_unlocked_tier(&self) -> bool {
        !self.unlocked_tiers.is_empty()
    }
}
