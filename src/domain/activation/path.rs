//! Activation paths chosen during onboarding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The behavioral track selected at onboarding, used to scope which
/// activation nudge rules apply to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPath {
    DealFirst,
    PortfolioFirst,
    CommunityFirst,
    #[default]
    Balanced,
}

impl ActivationPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationPath::DealFirst => "deal_first",
            ActivationPath::PortfolioFirst => "portfolio_first",
            ActivationPath::CommunityFirst => "community_first",
            ActivationPath::Balanced => "balanced",
        }
    }
}

impl fmt::Display for ActivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
