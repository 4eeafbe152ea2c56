//! GenerateNudges - evaluates the preference-based rule set for one caller.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::nudge::{build_nudge, evaluate, Nudge, RuleContext, GENERAL_RULES};
use crate::ports::{NudgeStore, ProfileStore};

/// Command to generate general nudges for the caller.
#[derive(Debug, Clone)]
pub struct GenerateNudgesCommand {
    pub user_id: UserId,
}

/// Result: the fired nudge records and how many were persisted.
#[derive(Debug, Clone)]
pub struct GenerateNudgesResult {
    pub nudges_generated: u32,
    pub nudges: Vec<Nudge>,
}

/// Handler evaluating the general rule set against a profile.
pub struct GenerateNudgesHandler {
    profiles: Arc<dyn ProfileStore>,
    nudges: Arc<dyn NudgeStore>,
}

impl GenerateNudgesHandler {
    pub fn new(profiles: Arc<dyn ProfileStore>, nudges: Arc<dyn NudgeStore>) -> Self {
        Self { profiles, nudges }
    }

    pub async fn handle(
        &self,
        cmd: GenerateNudgesCommand,
        metadata: CommandMetadata,
    ) -> Result<GenerateNudgesResult, DomainError> {
        if cmd.user_id != metadata.user_id {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Cannot generate nudges for another user",
            ));
        }

        let now = Timestamp::now();

        let Some(profile) = self.profiles.find_by_user(&cmd.user_id).await? else {
            // No profile yet: nothing to evaluate, not an error.
            return Ok(GenerateNudgesResult {
                nudges_generated: 0,
                nudges: Vec::new(),
            });
        };

        let ctx = RuleContext::for_profile(&profile, now);
        let fired = evaluate(GENERAL_RULES, &ctx);

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
                        "failed to persist fired nudge"
                    );
                }
            }
        }

        tracing::debug!(
            correlation_id = %metadata.correlation_id(),
            user_id = %cmd.user_id,
            count = persisted.len(),
            "general nudge run finished"
        );

        Ok(GenerateNudgesResult {
            nudges_generated: persisted.len() as u32,
            nudges: persisted,
        })
    }
}
