//! Intervention playbooks activated for risk-adjacent lifecycle states.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{InterventionId, Timestamp};

use super::LifecycleState;

/// Named remediation playbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybookKind {
    WinBack,
    Reactivation,
    ReOnboarding,
}

impl PlaybookKind {
    /// The playbook a lifecycle state activates, if any.
    pub fn for_state(state: LifecycleState) -> Option<Self> {
        match state {
            LifecycleState::AtRisk => Some(PlaybookKind::WinBack),
            LifecycleState::Dormant => Some(PlaybookKind::Reactivation),
            LifecycleState::Returning => Some(PlaybookKind::ReOnboarding),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybookKind::WinBack => "win_back",
            PlaybookKind::Reactivation => "reactivation",
            PlaybookKind::ReOnboarding => "re_onboarding",
        }
    }

    /// Catalog metadata for this playbook.
    pub fn spec(&self) -> &'static PlaybookSpec {
        &PLAYBOOK_CATALOG[self]
    }
}

impl std::fmt::Display for PlaybookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-readable playbook definition consumed by delivery surfaces.
#[derive(Debug, Clone)]
pub struct PlaybookSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<&'static str>,
}

/// Static playbook catalog.
pub static PLAYBOOK_CATALOG: Lazy<HashMap<PlaybookKind, PlaybookSpec>> = Lazy::new(|| {
    HashMap::from([
        (
            PlaybookKind::WinBack,
            PlaybookSpec {
                name: "Win-back outreach",
                description: "Re-engage a user whose churn risk crossed the alert threshold",
                steps: vec![
                    "surface saved deals matching recent activity",
                    "offer a concierge portfolio review",
                    "pause upsell messaging",
                ],
            },
        ),
        (
            PlaybookKind::Reactivation,
            PlaybookSpec {
                name: "Dormancy reactivation",
                description: "Bring back a user with three weeks of inactivity",
                steps: vec![
                    "send a what-you-missed digest",
                    "highlight watchlist price movements",
                    "reset onboarding checkpoints",
                ],
            },
        ),
        (
            PlaybookKind::ReOnboarding,
            PlaybookSpec {
                name: "Returning-user re-onboarding",
                description: "Ease a recently dormant user back into the product",
                steps: vec![
                    "replay the short feature tour",
                    "restore the pre-dormancy home layout",
                    "suggest one low-effort action",
                ],
            },
        ),
    ])
});

/// Lifecycle of an activated intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionStatus {
    Active,
    Resolved,
}

/// An activated playbook instance on a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    id: InterventionId,
    playbook: PlaybookKind,
    activated_at: Timestamp,
    status: InterventionStatus,
}

impl Intervention {
    /// Activates a playbook.
    pub fn activate(playbook: PlaybookKind, now: Timestamp) -> Self {
        Self {
            id: InterventionId::new(),
            playbook,
            activated_at: now,
            status: InterventionStatus::Active,
        }
    }

    pub fn id(&self) -> InterventionId {
        self.id
    }

    pub fn playbook(&self) -> PlaybookKind {
        self.playbook
    }

    pub fn activated_at(&self) -> Timestamp {
        self.activated_at
    }

    pub fn status(&self) -> InterventionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == InterventionStatus::Active
    }

    fn resolve(&mut self) {
        self.status = InterventionStatus::Resolved;
    }
}

/// Reconciles the intervention list against the (possibly new) state.
///
/// An active playbook still warranted by the state is kept as-is; active
/// playbooks no longer warranted are resolved; a warranted playbook with no
/// active instance is activated. Resolved entries stay as audit history.
pub fn merge_interventions(
    interventions: &mut Vec<Intervention>,
    state: LifecycleState,
    now: Timestamp,
) {
    let desired = PlaybookKind::for_state(state);

    let mut already_active = false;
    for intervention in interventions.iter_mut() {
        if !intervention.is_active() {
            continue;
        }
        if Some(intervention.playbook()) == desired {
            already_active = true;
        } else {
            intervention.resolve();
        }
    }

    if let Some(playbook) = desired {
        if !already_active {
            interventions.push(Intervention::activate(playbook, now));
        }
    }
}
