//! Application handlers for the engagement intelligence operations.

mod classify_profiles;
mod engagement_overview;
mod generate_activation_nudges;
mod generate_nudges;

pub use classify_profiles::{
    ClassifyMode, ClassifyProfilesCommand, ClassifyProfilesHandler, ClassifyProfilesResult,
    ProfileOutcome,
};
pub use engagement_overview::{
    EngagementOverview, GetEngagementOverviewHandler, GetEngagementOverviewQuery,
};
pub use generate_activation_nudges::{
    GenerateActivationNudgesCommand, GenerateActivationNudgesHandler,
    GenerateActivationNudgesResult,
};
pub use generate_nudges::{GenerateNudgesCommand, GenerateNudgesHandler, GenerateNudgesResult};
