//! Engagement module - raw behavioral signals and churn risk scoring.

mod churn;
mod signals;

pub use churn::{ChurnComponents, ChurnRisk, ChurnTier};
pub use signals::{EngagementSignals, EngagementStage, HabitLoop};

use serde::{Deserialize, Serialize};

/// Engagement sub-structure embedded on the profile aggregate: the raw
/// counters supplied by the signal store plus the last computed risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementState {
    /// Behavioral counters, maintained externally.
    #[serde(default)]
    pub signals: EngagementSignals,

    /// Last computed churn risk; `None` until the first classification run.
    #[serde(default)]
    pub churn: Option<ChurnRisk>,
}
