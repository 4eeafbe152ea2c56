//! Activation module - onboarding path, behavioral counters, milestones,
//! and the per-user nudge dismissal set.

mod path;
mod state;

pub use path::ActivationPath;
pub use state::{ActivationState, BehavioralSignals};
