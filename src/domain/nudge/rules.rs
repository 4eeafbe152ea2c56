//! Declarative nudge rules.
//!
//! Both rule sets share one shape: an ordered list of `(predicate,
//! template)` pairs the engine walks per run. Keeping rules as data means
//! each predicate is unit-testable in isolation and the evaluation order is
//! explicit.

use std::collections::BTreeSet;

use crate::domain::activation::{ActivationPath, BehavioralSignals};
use crate::domain::engagement::{ChurnTier, EngagementSignals};
use crate::domain::foundation::{NudgeId, Timestamp};
use crate::domain::lifecycle::LifecycleState;
use crate::domain::profile::EngagementProfile;

use super::{ActivationTier, NudgeCategory, NudgeKind, NudgePriority, NudgeSurface};

/// Everything a predicate may look at for one run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub engagement: &'a EngagementSignals,
    pub behavioral: &'a BehavioralSignals,
    pub path: ActivationPath,
    pub days_since_onboarding: u32,
    pub churn_tier: ChurnTier,
    pub lifecycle: LifecycleState,
    pub suppress_upsells: bool,
    pub dismissed: &'a BTreeSet<NudgeId>,
}

impl<'a> RuleContext<'a> {
    /// Builds the context for a profile at a point in time.
    pub fn for_profile(profile: &'a EngagementProfile, now: Timestamp) -> Self {
        let engagement = profile.engagement();
        let activation = profile.activation();
        Self {
            engagement: &engagement.signals,
            behavioral: activation.signals(),
            path: activation.path(),
            days_since_onboarding: activation.days_since_onboarding(now),
            churn_tier: engagement
                .churn
                .as_ref()
                .map(|c| c.tier())
                .unwrap_or(ChurnTier::Low),
            lifecycle: profile.lifecycle().current(),
            suppress_upsells: profile.lifecycle().experience().suppress_upsells,
            dismissed: profile.activation().dismissed(),
        }
    }
}

/// Copy for the persisted record.
#[derive(Debug, Clone, Copy)]
pub struct NudgeTemplate {
    pub title: &'static str,
    pub body: &'static str,
    pub cta: &'static str,
}

/// Which rule set a rule belongs to, with its gating data.
#[derive(Debug, Clone, Copy)]
pub enum RuleScope {
    General {
        category: NudgeCategory,
    },
    Activation {
        tier: ActivationTier,
        /// `None` applies the rule to every path.
        path: Option<ActivationPath>,
    },
}

/// One `(predicate, template)` rule.
pub struct NudgeRule {
    pub id: &'static str,
    pub scope: RuleScope,
    pub surface: NudgeSurface,
    pub priority: NudgePriority,
    pub predicate: fn(&RuleContext) -> bool,
    pub template: NudgeTemplate,
}

impl NudgeRule {
    /// Eligibility gate, checked before the predicate. Activation rules are
    /// day-gated and optionally path-scoped; upsell-category general rules
    /// are ineligible while upsells are suppressed.
    pub fn eligible(&self, ctx: &RuleContext) -> bool {
        match self.scope {
            RuleScope::General { category } => {
                !(category == NudgeCategory::Upsell && ctx.suppress_upsells)
            }
            RuleScope::Activation { tier, path } => {
                ctx.days_since_onboarding >= tier.unlock_day()
                    && path.map_or(true, |p| p == ctx.path)
            }
        }
    }

    /// The record kind for a fired instance of this rule.
    pub fn kind(&self) -> NudgeKind {
        match self.scope {
            RuleScope::General { category } => NudgeKind::General { category },
            RuleScope::Activation { tier, .. } => NudgeKind::Activation { tier },
        }
    }
}

/// Preference-based rules, evaluated by `GenerateNudges`.
pub static GENERAL_RULES: &[NudgeRule] = &[
    NudgeRule {
        id: "streak_at_risk",
        scope: RuleScope::General { category: NudgeCategory::Habit },
        surface: NudgeSurface::Toast,
        priority: NudgePriority::High,
        predicate: |ctx| {
            ctx.engagement.streak_weeks >= 2 && ctx.engagement.sessions_this_week == 0
        },
        template: NudgeTemplate {
            title: "Your streak is on the line",
            body: "One quick visit this week keeps your streak going.",
            cta: "Open dashboard",
        },
    },
    NudgeRule {
        id: "habit_loop_lapsed",
        scope: RuleScope::General { category: NudgeCategory::Habit },
        surface: NudgeSurface::Banner,
        priority: NudgePriority::Medium,
        predicate: |ctx| {
            ctx.engagement.sessions_this_week > 0
                && ctx.engagement.habit_loops.iter().any(|l| !l.active)
        },
        template: NudgeTemplate {
            title: "Pick a routine back up",
            body: "One of your regular check-ins has gone quiet.",
            cta: "Resume routine",
        },
    },
    NudgeRule {
        id: "abandoned_flow_followup",
        scope: RuleScope::General { category: NudgeCategory::FeatureDiscovery },
        surface: NudgeSurface::Toast,
        priority: NudgePriority::Medium,
        predicate: |ctx| ctx.engagement.flows_abandoned_14d >= 2,
        template: NudgeTemplate {
            title: "Finish what you started",
            body: "You have unfinished setups waiting for you.",
            cta: "Pick up where you left off",
        },
    },
    NudgeRule {
        id: "win_back_checkin",
        scope: RuleScope::General { category: NudgeCategory::WinBack },
        surface: NudgeSurface::Email,
        priority: NudgePriority::High,
        predicate: |ctx| ctx.churn_tier == ChurnTier::High,
        template: NudgeTemplate {
            title: "We saved your spot",
            body: "Your watchlists and portfolio are right where you left them.",
            cta: "Come take a look",
        },
    },
    NudgeRule {
        id: "capability_tier_upsell",
        scope: RuleScope::General { category: NudgeCategory::Upsell },
        surface: NudgeSurface::Banner,
        priority: NudgePriority::Low,
        predicate: |ctx| {
            ctx.engagement.streak_weeks >= 4 && !ctx.engagement.has_unlocked_tier()
        },
        template: NudgeTemplate {
            title: "You're ready for more",
            body: "Four weeks of consistent activity unlocks advanced deal tools.",
            cta: "See what's included",
        },
    },
];

/// Activation-path rules, evaluated by `GenerateActivationNudges`.
/// Ordered by tier; tiers unlock at days 0, 2, 5, and 7.
pub static ACTIVATION_RULES: &[NudgeRule] = &[
    // Day 0
    NudgeRule {
        id: "browse_first_deal",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day0,
            path: Some(ActivationPath::DealFirst),
        },
        surface: NudgeSurface::Toast,
        priority: NudgePriority::High,
        predicate: |ctx| ctx.behavioral.deals_viewed == 0,
        template: NudgeTemplate {
            title: "Browse your first deal",
            body: "Live deals matching your interests are already on the board.",
            cta: "Browse deals",
        },
    },
    NudgeRule {
        id: "link_portfolio",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day0,
            path: Some(ActivationPath::PortfolioFirst),
        },
        surface: NudgeSurface::Toast,
        priority: NudgePriority::High,
        predicate: |ctx| ctx.behavioral.portfolio_assets_linked == 0,
        template: NudgeTemplate {
            title: "Link your portfolio",
            body: "Connect your holdings to see everything in one view.",
            cta: "Link holdings",
        },
    },
    NudgeRule {
        id: "introduce_yourself",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day0,
            path: Some(ActivationPath::CommunityFirst),
        },
        surface: NudgeSurface::Toast,
        priority: NudgePriority::High,
        predicate: |ctx| {
            ctx.behavioral.posts_created == 0 && ctx.behavioral.replies_created == 0
        },
        template: NudgeTemplate {
            title: "Say hello",
            body: "Members who introduce themselves get responses within hours.",
            cta: "Post an intro",
        },
    },
    NudgeRule {
        id: "run_first_search",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day0,
            path: Some(ActivationPath::Balanced),
        },
        surface: NudgeSurface::Toast,
        priority: NudgePriority::Medium,
        predicate: |ctx| ctx.behavioral.searches_run == 0,
        template: NudgeTemplate {
            title: "Search the platform",
            body: "Deals, portfolios, and discussions are one search away.",
            cta: "Try a search",
        },
    },
    // Day 2
    NudgeRule {
        id: "save_first_deal",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day2,
            path: Some(ActivationPath::DealFirst),
        },
        surface: NudgeSurface::Banner,
        priority: NudgePriority::Medium,
        predicate: |ctx| ctx.behavioral.deals_viewed > 0 && ctx.behavioral.deals_saved == 0,
        template: NudgeTemplate {
            title: "Save a deal you liked",
            body: "Saved deals stay pinned and alert you on updates.",
            cta: "Save a deal",
        },
    },
    NudgeRule {
        id: "sync_portfolio",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day2,
            path: Some(ActivationPath::PortfolioFirst),
        },
        surface: NudgeSurface::Banner,
        priority: NudgePriority::Medium,
        predicate: |ctx| {
            ctx.behavioral.portfolio_assets_linked > 0 && ctx.behavioral.portfolio_syncs == 0
        },
        template: NudgeTemplate {
            title: "Run your first sync",
            body: "Syncing keeps valuations current across your linked holdings.",
            cta: "Sync now",
        },
    },
    NudgeRule {
        id: "reply_to_thread",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day2,
            path: Some(ActivationPath::CommunityFirst),
        },
        surface: NudgeSurface::Banner,
        priority: NudgePriority::Medium,
        predicate: |ctx| ctx.behavioral.replies_created == 0,
        template: NudgeTemplate {
            title: "Join a discussion",
            body: "A reply in an active thread is the fastest way in.",
            cta: "Browse threads",
        },
    },
    // Day 5
    NudgeRule {
        id: "create_watchlist",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day5,
            path: Some(ActivationPath::DealFirst),
        },
        surface: NudgeSurface::Banner,
        priority: NudgePriority::Medium,
        predicate: |ctx| {
            ctx.behavioral.deals_saved >= 1 && ctx.behavioral.watchlists_created == 0
        },
        template: NudgeTemplate {
            title: "Turn saved deals into a watchlist",
            body: "Watchlists track pricing and milestone changes for you.",
            cta: "Create watchlist",
        },
    },
    NudgeRule {
        id: "write_first_post",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day5,
            path: Some(ActivationPath::CommunityFirst),
        },
        surface: NudgeSurface::Banner,
        priority: NudgePriority::Medium,
        predicate: |ctx| ctx.behavioral.posts_created == 0,
        template: NudgeTemplate {
            title: "Start your own thread",
            body: "Ask the community about a deal you're weighing.",
            cta: "Write a post",
        },
    },
    NudgeRule {
        id: "explore_deal_flow",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day5,
            path: None,
        },
        surface: NudgeSurface::Email,
        priority: NudgePriority::Low,
        predicate: |ctx| ctx.behavioral.deals_viewed == 0,
        template: NudgeTemplate {
            title: "There's deal flow waiting",
            body: "You haven't opened the deal board yet; here's what's live.",
            cta: "See live deals",
        },
    },
    // Day 7
    NudgeRule {
        id: "weekly_digest_optin",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day7,
            path: None,
        },
        surface: NudgeSurface::Email,
        priority: NudgePriority::Low,
        predicate: |ctx| ctx.engagement.sessions_this_week >= 1,
        template: NudgeTemplate {
            title: "Get the weekly digest",
            body: "A Monday summary of your watchlists and followed threads.",
            cta: "Turn on digest",
        },
    },
    NudgeRule {
        id: "momentum_checkin",
        scope: RuleScope::Activation {
            tier: ActivationTier::Day7,
            path: None,
        },
        surface: NudgeSurface::Email,
        priority: NudgePriority::High,
        predicate: |ctx| ctx.engagement.sessions_this_week == 0,
        template: NudgeTemplate {
            title: "A week in, still with us?",
            body: "Your first week is done; one visit keeps the momentum.",
            cta: "Come back",
        },
    },
];
