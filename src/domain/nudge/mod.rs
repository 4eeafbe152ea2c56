//! Nudge module - dismissible suggestion records, the declarative rule
//! sets, and the shared evaluation engine.

mod engine;
mod record;
mod rules;

pub use engine::{build_nudge, evaluate};
pub use record::{
    ActivationTier, Nudge, NudgeCategory, NudgeKind, NudgePriority, NudgeStatus, NudgeSurface,
};
pub use rules::{NudgeRule, NudgeTemplate, RuleContext, RuleScope, ACTIVATION_RULES, GENERAL_RULES};
