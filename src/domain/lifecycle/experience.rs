//! Adaptive experience settings derived from lifecycle state.

use serde::{Deserialize, Serialize};

use super::LifecycleState;

/// Churn score at or above which upsells are suppressed.
pub const UPSELL_SUPPRESSION_SCORE: u8 = 60;

/// How much tutorial scaffolding the UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorialDensity {
    Minimal,
    Standard,
    Rich,
}

/// Voice used for in-product messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagingTone {
    Welcoming,
    Encouraging,
    Celebratory,
    Supportive,
    Reassuring,
}

/// How often upsell prompts may be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsellFrequency {
    Never,
    Rare,
    Occasional,
    Frequent,
}

/// Per-state experience profile, refreshed on every classification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceSettings {
    pub tutorial_density: TutorialDensity,
    pub complexity_reduction: bool,
    pub messaging_tone: MessagingTone,
    pub upsell_frequency: UpsellFrequency,
    pub suppress_upsells: bool,
}

impl ExperienceSettings {
    /// Derives settings from the static per-state table, then applies the
    /// suppression rule: upsells are off whenever churn score reaches
    /// [`UPSELL_SUPPRESSION_SCORE`] or the state itself is risk-adjacent.
    pub fn for_state(state: LifecycleState, churn_score: u8) -> Self {
        let (tutorial_density, complexity_reduction, messaging_tone, upsell_frequency) =
            match state {
                LifecycleState::New => (
                    TutorialDensity::Rich,
                    true,
                    MessagingTone::Welcoming,
                    UpsellFrequency::Rare,
                ),
                LifecycleState::Activated => (
                    TutorialDensity::Standard,
                    true,
                    MessagingTone::Encouraging,
                    UpsellFrequency::Occasional,
                ),
                LifecycleState::Engaged => (
                    TutorialDensity::Standard,
                    false,
                    MessagingTone::Encouraging,
                    UpsellFrequency::Occasional,
                ),
                LifecycleState::PowerUser => (
                    TutorialDensity::Minimal,
                    false,
                    MessagingTone::Celebratory,
                    UpsellFrequency::Frequent,
                ),
                LifecycleState::AtRisk => (
                    TutorialDensity::Standard,
                    true,
                    MessagingTone::Supportive,
                    UpsellFrequency::Never,
                ),
                LifecycleState::Dormant => (
                    TutorialDensity::Rich,
                    true,
                    MessagingTone::Reassuring,
                    UpsellFrequency::Never,
                ),
                LifecycleState::Returning => (
                    TutorialDensity::Standard,
                    true,
                    MessagingTone::Welcoming,
                    UpsellFrequency::Rare,
                ),
            };

        Self {
            tutorial_density,
            complexity_reduction,
            messaging_tone,
            upsell_frequency,
            suppress_upsells: churn_score >= UPSELL_SUPPRESSION_SCORE
                || state.suppresses_upsells(),
        }
    }
}

impl Default for ExperienceSettings {
    fn default() -> Self {
        Self::for_state(LifecycleState::New, 0)
    }
}
