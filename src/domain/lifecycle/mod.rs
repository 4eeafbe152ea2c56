//! Lifecycle module - state classification, audit history, and the
//! experience/intervention side effects derived from state.

mod classifier;
mod experience;
mod history;
mod intervention;
mod state;

pub use classifier::{
    classify, ClassificationInput, TransitionRule, AT_RISK_SCORE, DORMANCY_DAYS,
    ENGAGED_MIN_SESSIONS, ENGAGED_MIN_STREAK_WEEKS, RETURNING_WINDOW_DAYS, TRANSITION_TABLE,
};
pub use experience::{ExperienceSettings, MessagingTone, TutorialDensity, UpsellFrequency};
pub use history::{LifecycleRecord, StateHistoryEntry};
pub use intervention::{
    merge_interventions, Intervention, InterventionStatus, PlaybookKind, PlaybookSpec,
    PLAYBOOK_CATALOG,
};
pub use state::{LifecycleState, TriggerSignal};
