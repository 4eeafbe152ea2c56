//! Request/response DTOs for the engagement endpoints.

use serde::Serialize;

use crate::application::handlers::{
    ClassifyProfilesResult, EngagementOverview, GenerateActivationNudgesResult,
    GenerateNudgesResult, ProfileOutcome,
};
use crate::domain::activation::ActivationPath;
use crate::domain::engagement::{ChurnComponents, ChurnRisk, ChurnTier};
use crate::domain::foundation::Timestamp;
use crate::domain::lifecycle::{
    Intervention, InterventionStatus, LifecycleState, StateHistoryEntry, TriggerSignal,
};
use crate::domain::nudge::{Nudge, NudgeKind, NudgePriority, NudgeStatus, NudgeSurface};

/// Standard error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", entity, id))
    }
}

#[derive(Debug, Serialize)]
pub struct ClassifyOutcomeResponse {
    pub user_id: String,
    pub state: LifecycleState,
    pub churn_score: u8,
    pub transitioned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ProfileOutcome> for ClassifyOutcomeResponse {
    fn from(outcome: ProfileOutcome) -> Self {
        Self {
            user_id: outcome.user_id.to_string(),
            state: outcome.state,
            churn_score: outcome.churn_score,
            transitioned: outcome.transitioned,
            error: outcome.error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub updated_count: u32,
    pub results: Vec<ClassifyOutcomeResponse>,
}

impl From<ClassifyProfilesResult> for ClassifyResponse {
    fn from(result: ClassifyProfilesResult) -> Self {
        Self {
            updated_count: result.updated_count,
            results: result.outcomes.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NudgeResponse {
    pub nudge_id: String,
    pub kind: NudgeKind,
    pub title: String,
    pub body: String,
    pub cta: String,
    pub surface: NudgeSurface,
    pub priority: NudgePriority,
    pub status: NudgeStatus,
    pub shown_at: Timestamp,
    pub shown_count: u32,
}

impl From<Nudge> for NudgeResponse {
    fn from(nudge: Nudge) -> Self {
        Self {
            nudge_id: nudge.nudge_id.to_string(),
            kind: nudge.kind,
            title: nudge.title,
            body: nudge.body,
            cta: nudge.cta,
            surface: nudge.surface,
            priority: nudge.priority,
            status: nudge.status,
            shown_at: nudge.shown_at,
            shown_count: nudge.shown_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateNudgesResponse {
    pub nudges_generated: u32,
    pub nudges: Vec<NudgeResponse>,
}

impl From<GenerateNudgesResult> for GenerateNudgesResponse {
    fn from(result: GenerateNudgesResult) -> Self {
        Self {
            nudges_generated: result.nudges_generated,
            nudges: result.nudges.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivationNudgesResponse {
    pub path: ActivationPath,
    pub day: u32,
    pub nudges_generated: u32,
    pub nudges: Vec<NudgeResponse>,
}

impl From<GenerateActivationNudgesResult> for ActivationNudgesResponse {
    fn from(result: GenerateActivationNudgesResult) -> Self {
        Self {
            path: result.path,
            day: result.day,
            nudges_generated: result.nudges_generated,
            nudges: result.nudges.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChurnSummaryResponse {
    pub score: u8,
    pub tier: ChurnTier,
    pub components: ChurnComponents,
    pub computed_at: Timestamp,
}

impl From<ChurnRisk> for ChurnSummaryResponse {
    fn from(churn: ChurnRisk) -> Self {
        Self {
            score: churn.score(),
            tier: churn.tier(),
            components: *churn.components(),
            computed_at: churn.computed_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InterventionResponse {
    pub id: String,
    pub playbook: String,
    pub activated_at: Timestamp,
    pub status: InterventionStatus,
}

impl From<Intervention> for InterventionResponse {
    fn from(intervention: Intervention) -> Self {
        Self {
            id: intervention.id().to_string(),
            playbook: intervention.playbook().as_str().to_string(),
            activated_at: intervention.activated_at(),
            status: intervention.status(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub state: LifecycleState,
    pub entered_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exited_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    pub trigger: TriggerSignal,
}

impl From<StateHistoryEntry> for HistoryEntryResponse {
    fn from(entry: StateHistoryEntry) -> Self {
        Self {
            state: entry.state,
            entered_at: entry.entered_at,
            exited_at: entry.exited_at,
            duration_days: entry.duration_days,
            trigger: entry.trigger,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub state: LifecycleState,
    pub state_entered_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub churn: Option<ChurnSummaryResponse>,
    pub suppress_upsells: bool,
    pub interventions: Vec<InterventionResponse>,
    pub history: Vec<HistoryEntryResponse>,
    pub active_nudges: Vec<NudgeResponse>,
}

impl From<EngagementOverview> for OverviewResponse {
    fn from(overview: EngagementOverview) -> Self {
        Self {
            state: overview.state,
            state_entered_at: overview.state_entered_at,
            churn: overview.churn.map(Into::into),
            suppress_upsells: overview.suppress_upsells,
            interventions: overview.interventions.into_iter().map(Into::into).collect(),
            history: overview.history.into_iter().map(Into::into).collect(),
            active_nudges: overview.active_nudges.into_iter().map(Into::into).collect(),
        }
    }
}
