//! Shared rule evaluation engine.

use crate::domain::foundation::{NudgeId, Timestamp, UserId};

use super::{Nudge, NudgeRule, NudgeStatus, RuleContext};

/// Walks a rule set in order and returns every rule that fires: eligible
/// for this context, predicate true, and not in the user's dismissed set.
/// Zero to many rules may fire in one run.
pub fn evaluate<'a>(rules: &'a [NudgeRule], ctx: &RuleContext) -> Vec<&'a NudgeRule> {
    rules
        .iter()
        .filter(|rule| rule.eligible(ctx))
        .filter(|rule| !ctx.dismissed.contains(rule.id))
        .filter(|rule| (rule.predicate)(ctx))
        .collect()
}

/// Materializes a fired rule into a fresh nudge record.
pub fn build_nudge(rule: &NudgeRule, user_id: &UserId, now: Timestamp) -> Nudge {
    Nudge {
        user_id: user_id.clone(),
        nudge_id: NudgeId::new(rule.id).expect("rule ids are non-empty"),
        kind: rule.kind(),
        title: rule.template.title.to_string(),
        body: rule.template.body.to_string(),
        cta: rule.template.cta.to_string(),
        surface: rule.surface,
        priority: rule.priority,
        status: NudgeStatus::Active,
        shown_at: now,
        shown_count: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activation::ActivationPath;
    use crate::domain::nudge::rules::test_support::ContextFixture;
    use crate::domain::nudge::{NudgeKind, ACTIVATION_RULES, GENERAL_RULES};

    fn now() -> Timestamp {
        Timestamp::from_datetime(chrono::DateTime::from_timestamp(1704326400, 0).unwrap())
    }

    #[test]
    fn no_signals_fire_nothing_from_general_set() {
        let fixture = ContextFixture::default();
        assert!(evaluate(GENERAL_RULES, &fixture.ctx()).is_empty());
    }

    #[test]
    fn multiple_rules_fire_independently() {
        let mut fixture = ContextFixture::default();
        fixture.path = ActivationPath::DealFirst;
        fixture.days_since_onboarding = 6;
        fixture.behavioral.deals_viewed = 3;
        fixture.behavioral.deals_saved = 1;

        let fired = evaluate(ACTIVATION_RULES, &fixture.ctx());
        let ids: Vec<&str> = fired.iter().map(|r| r.id).collect();

        // Day-5 tier is open: the watchlist rule fires; the day-7 tier is not.
        assert_eq!(ids, vec!["create_watchlist"]);
    }

    #[test]
    fn day_zero_rules_fire_for_fresh_user() {
        let mut fixture = ContextFixture::default();
        fixture.path = ActivationPath::DealFirst;

        let fired = evaluate(ACTIVATION_RULES, &fixture.ctx());
        let ids: Vec<&str> = fired.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["browse_first_deal"]);
    }

    #[test]
    fn dismissed_rule_never_fires() {
        let mut fixture = ContextFixture::default();
        fixture.path = ActivationPath::DealFirst;
        fixture
            .dismissed
            .insert(NudgeId::new("browse_first_deal").unwrap());

        assert!(evaluate(ACTIVATION_RULES, &fixture.ctx()).is_empty());
    }

    #[test]
    fn dismissal_filters_general_set_too() {
        let mut fixture = ContextFixture::default();
        fixture.engagement.streak_weeks = 2;
        fixture.engagement.sessions_this_week = 0;

        assert_eq!(evaluate(GENERAL_RULES, &fixture.ctx()).len(), 1);

        fixture
            .dismissed
            .insert(NudgeId::new("streak_at_risk").unwrap());
        assert!(evaluate(GENERAL_RULES, &fixture.ctx()).is_empty());
    }

    #[test]
    fn firing_order_follows_rule_order() {
        let mut fixture = ContextFixture::default();
        fixture.path = ActivationPath::CommunityFirst;
        fixture.days_since_onboarding = 10;
        fixture.engagement.sessions_this_week = 1;

        let fired = evaluate(ACTIVATION_RULES, &fixture.ctx());
        let ids: Vec<&str> = fired.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                "introduce_yourself",
                "reply_to_thread",
                "write_first_post",
                "explore_deal_flow",
                "weekly_digest_optin",
            ]
        );
    }

    #[test]
    fn build_nudge_copies_rule_fields() {
        let user_id = UserId::new("user-1").unwrap();
        let rule = GENERAL_RULES.iter().find(|r| r.id == "win_back_checkin").unwrap();

        let nudge = build_nudge(rule, &user_id, now());

        assert_eq!(nudge.nudge_id.as_str(), "win_back_checkin");
        assert_eq!(nudge.title, rule.template.title);
        assert_eq!(nudge.surface, rule.surface);
        assert_eq!(nudge.priority, rule.priority);
        assert_eq!(nudge.status, NudgeStatus::Active);
        assert_eq!(nudge.shown_count, 1);
        assert_eq!(nudge.shown_at, now());
        assert!(matches!(nudge.kind, NudgeKind::General { .. }));
    }
}
