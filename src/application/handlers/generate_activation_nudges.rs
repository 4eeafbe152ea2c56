//! GenerateActivationNudges - evaluates the day-gated activation rule set
//! for one caller.

use std::sync::Arc;

use crate::domain::activation::ActivationPath;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::nudge::{build_nudge, evaluate, Nudge, RuleContext, ACTIVATION_RULES};
use crate::ports::{NudgeStore, ProfileStore};

/// Command to generate activation-path nudges for the caller.
#[derive(Debug, Clone)]
pub struct GenerateActivationNudgesCommand {
    pub user_id: UserId,
}

/// Result: the caller's path and onboarding day, plus the fired records.
#[derive(Debug, Clone)]
pub struct GenerateActivationNudgesResult {
    pub path: ActivationPath,
    pub day: u32,
    pub nudges_generated: u32,
    pub nudges: Vec<Nudge>,
}

/// Handler evaluating the activation rule set against a profile.
pub struct GenerateActivationNudgesHandler {
    profiles: Arc<dyn ProfileStore>,
    nudges: Arc<dyn NudgeStore>,
}

impl GenerateActivationNudgesHandler {
    pub fn new(profiles: Arc<dyn ProfileStore>, nudges: Arc<dyn NudgeStore>) -> Self {
        Self { profiles, nudges }
    }

    pub async fn handle(
        &self,
        cmd: GenerateActivationNudgesCommand,
        metadata: CommandMetadata,
    ) -> Result<GenerateActivationNudgesResult, DomainError> {
        if cmd.user_id != metadata.user_id {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Cannot generate nudges for another user",
            ));
        }

        let now = Timestamp::now();

        let Some(profile) = self.profiles.find_by_user(&cmd.user_id).await? else {
            return Ok(GenerateActivationNudgesResult {
                path: ActivationPath::default(),
                day: 0,
                nudges_generated: 0,
                nudges: Vec::new(),
            });
        };

        let ctx = RuleContext::for_profile(&profile, now);
        let path = ctx.path;
        let day = ctx.days_since_onboarding;
        let fired = evaluate(ACTIVATION_RULES, &ctx);

        let mut persisted = Vec::with_capacity(fired.len());
        for rule in fired {
            let nudge = build_nudge(rule, &cmd.user_id, now);
            match self.nudges.record_shown(&nudge).await {
                Ok(()) => persisted.push(nudge),
                Err(e) => {
                    tracing::warn!(
                        user_id = %cmd.user_id,
                        nudge_id = rule.id,
                        error = %e,
                        "failed to persist fired activation nudge"
                    );
                }
            }
        }

        tracing::debug!(
            correlation_id = %metadata.correlation_id(),
            user_id = %cmd.user_id,
            path = %path,
            day,
            count = persisted.len(),
            "activation nudge run finished"
        );

        Ok(GenerateActivationNudgesResult {
            path,
            day,
            nudges_generated: persisted.len() as u32,
            nudges: persisted,
        })
    }
}
