//! Lifecycle states and the signals that trigger entry into each.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete behavioral lifecycle state of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    New,
    Activated,
    Engaged,
    PowerUser,
    AtRisk,
    Dormant,
    Returning,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::New => "new",
            LifecycleState::Activated => "activated",
            LifecycleState::Engaged => "engaged",
            LifecycleState::PowerUser => "power_user",
            LifecycleState::AtRisk => "at_risk",
            LifecycleState::Dormant => "dormant",
            LifecycleState::Returning => "returning",
        }
    }

    /// The signal recorded in history when this state is entered.
    pub fn trigger(&self) -> TriggerSignal {
        match self {
            LifecycleState::New => TriggerSignal::ProfileCreated,
            LifecycleState::Activated => TriggerSignal::OnboardingActivated,
            LifecycleState::Engaged => TriggerSignal::ConsistentUsage,
            LifecycleState::PowerUser => TriggerSignal::TierUnlocked,
            LifecycleState::AtRisk => TriggerSignal::ChurnRiskElevated,
            LifecycleState::Dormant => TriggerSignal::InactivityThreshold,
            LifecycleState::Returning => TriggerSignal::ActivityResumed,
        }
    }

    /// States that suppress upsell messaging regardless of churn score.
    pub fn suppresses_upsells(&self) -> bool {
        matches!(self, LifecycleState::AtRisk | LifecycleState::Dormant)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a lifecycle state was entered; fixed per target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSignal {
    ProfileCreated,
    OnboardingActivated,
    ConsistentUsage,
    TierUnlocked,
    ChurnRiskElevated,
    InactivityThreshold,
    ActivityResumed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&LifecycleState::PowerUser).unwrap();
        assert_eq!(json, "\"power_user\"");

        let back: LifecycleState = serde_json::from_str("\"at_risk\"").unwrap();
        assert_eq!(back, LifecycleState::AtRisk);
    }

    #[test]
    fn every_state_has_a_trigger() {
        assert_eq!(LifecycleState::Dormant.trigger(), TriggerSignal::InactivityThreshold);
        assert_eq!(LifecycleState::Returning.trigger(), TriggerSignal::ActivityResumed);
        assert_eq!(LifecycleState::PowerUser.trigger(), TriggerSignal::TierUnlocked);
    }

    #[test]
    fn only_risk_adjacent_states_suppress_upsells() {
        assert!(LifecycleState::AtRisk.suppresses_upsells());
        assert!(LifecycleState::Dormant.suppresses_upsells());
        assert!(!LifecycleState::Engaged.suppresses_upsells());
        assert!(!LifecycleState::Returning.suppresses_upsells());
    }
}
