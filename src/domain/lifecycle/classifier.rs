//! Lifecycle classification: a declarative, priority-ordered transition
//! table evaluated first-match per run.

use crate::domain::engagement::{ChurnRisk, EngagementSignals, EngagementStage};

use super::LifecycleState;

/// Days of inactivity after which a user is dormant.
pub const DORMANCY_DAYS: u32 = 21;

/// Activity recency window for the `returning` state.
pub const RETURNING_WINDOW_DAYS: u32 = 7;

/// Churn score at or above which a user is at risk.
pub const AT_RISK_SCORE: u8 = 60;

/// Session and streak floors for the `engaged` state.
pub const ENGAGED_MIN_SESSIONS: u32 = 2;
pub const ENGAGED_MIN_STREAK_WEEKS: u32 = 2;

/// Everything a guard may look at for one run.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationInput<'a> {
    pub signals: &'a EngagementSignals,
    pub churn: &'a ChurnRisk,
    /// The state being exited, i.e. the profile's stored state before this
    /// run. Guards use it instead of a bare entry timestamp so `returning`
    /// only fires for users actually coming out of dormancy.
    pub current: LifecycleState,
}

type Guard = fn(&ClassificationInput) -> bool;

/// One row of the transition table.
pub struct TransitionRule {
    pub target: LifecycleState,
    pub guard: Guard,
}

/// The transition table. Rows are evaluated top to bottom and the first
/// matching guard wins; the final row is a catch-all, so classification is
/// total. Priority order is part of the contract: a dormant signal beats an
/// elevated churn score, which beats a healthy streak.
pub static TRANSITION_TABLE: &[TransitionRule] = &[
    TransitionRule {
        target: LifecycleState::PowerUser,
        guard: |input| input.signals.has_unlocked_tier(),
    },
    TransitionRule {
        target: LifecycleState::Dormant,
        guard: |input| input.signals.days_since_last_activity >= DORMANCY_DAYS,
    },
    TransitionRule {
        target: LifecycleState::Returning,
        guard: |input| {
            matches!(
                input.current,
                LifecycleState::Dormant | LifecycleState::Returning
            ) && input.signals.days_since_last_activity <= RETURNING_WINDOW_DAYS
        },
    },
    TransitionRule {
        target: LifecycleState::AtRisk,
        guard: |input| input.churn.score() >= AT_RISK_SCORE,
    },
    TransitionRule {
        target: LifecycleState::Engaged,
        guard: |input| {
            input.signals.sessions_this_week >= ENGAGED_MIN_SESSIONS
                && input.signals.streak_weeks >= ENGAGED_MIN_STREAK_WEEKS
        },
    },
    TransitionRule {
        target: LifecycleState::Activated,
        guard: |input| input.signals.stage == EngagementStage::Activated,
    },
    TransitionRule {
        target: LifecycleState::New,
        guard: |_| true,
    },
];

/// Classifies one run's input against the transition table.
pub fn classify(input: &ClassificationInput) -> LifecycleState {
    TRANSITION_TABLE
        .iter()
        .find(|rule| (rule.guard)(input))
        .map(|rule| rule.target)
        .unwrap_or(LifecycleState::New)
}
