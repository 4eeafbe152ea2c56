//! Churn risk scoring - a pure weighted combination of four signal groups.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::EngagementSignals;

const VELOCITY_WEIGHT: f64 = 0.4;
const HABIT_WEIGHT: f64 = 0.3;
const DISMISSAL_WEIGHT: f64 = 0.2;
const ABANDONMENT_WEIGHT: f64 = 0.1;

/// Risk tier derived from the score via fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnTier {
    Low,
    Medium,
    High,
}

impl ChurnTier {
    /// Tier boundaries: scores below 31 are low, below 61 medium, else high.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => ChurnTier::Low,
            31..=60 => ChurnTier::Medium,
            _ => ChurnTier::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnTier::Low => "low",
            ChurnTier::Medium => "medium",
            ChurnTier::High => "high",
        }
    }
}

impl std::fmt::Display for ChurnTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weighted contribution of each signal group, kept for dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChurnComponents {
    pub velocity: f64,
    pub habit_health: f64,
    pub dismissal: f64,
    pub abandonment: f64,
}

impl ChurnComponents {
    /// Unclamped sum of all contributions.
    pub fn total(&self) -> f64 {
        self.velocity + self.habit_health + self.dismissal + self.abandonment
    }
}

/// Composite churn risk for one user at one point in time.
///
/// Recomputed wholesale on every classification run; never updated
/// incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnRisk {
    score: u8,
    tier: ChurnTier,
    components: ChurnComponents,
    computed_at: Timestamp,
}

impl ChurnRisk {
    /// Scores the given signals. Pure and total: any combination of
    /// counters, including all-zero, produces a score in [0, 100].
    pub fn compute(signals: &EngagementSignals, now: Timestamp) -> Self {
        let components = ChurnComponents {
            velocity: velocity_component(signals),
            habit_health: habit_component(signals),
            dismissal: dismissal_component(signals),
            abandonment: abandonment_component(signals),
        };

        let score = components.total().clamp(0.0, 100.0).round() as u8;

        Self {
            score,
            tier: ChurnTier::from_score(score),
            components,
            computed_at: now,
        }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn tier(&self) -> ChurnTier {
        self.tier
    }

    pub fn components(&self) -> &ChurnComponents {
        &self.components
    }

    pub fn computed_at(&self) -> Timestamp {
        self.computed_at
    }
}

/// Week-over-week session decline, 40% weight.
///
/// Risk is one-directional: growth contributes nothing rather than
/// offsetting the other components. A prior week with no sessions has no
/// defined velocity and contributes nothing.
fn velocity_component(signals: &EngagementSignals) -> f64 {
    if signals.sessions_prior_week == 0 {
        return 0.0;
    }
    let this_week = signals.sessions_this_week as f64;
    let prior_week = signals.sessions_prior_week as f64;
    let percent_change = (this_week - prior_week) / prior_week * 100.0;
    let decline = (-percent_change).clamp(0.0, 100.0);
    decline * VELOCITY_WEIGHT
}

/// Lapsed habit loops, 30% weight. A user with no tracked loops is treated
/// as perfectly healthy; see DESIGN.md for why that default is kept.
fn habit_component(signals: &EngagementSignals) -> f64 {
    match signals.active_loop_fraction() {
        Some(active_fraction) => (1.0 - active_fraction) * 100.0 * HABIT_WEIGHT,
        None => 0.0,
    }
}

/// Trailing 14-day nudge dismissal rate, 20% weight.
fn dismissal_component(signals: &EngagementSignals) -> f64 {
    if signals.nudges_shown_14d == 0 {
        return 0.0;
    }
    let rate = signals.nudges_dismissed_14d as f64 / signals.nudges_shown_14d as f64;
    rate.clamp(0.0, 1.0) * 100.0 * DISMISSAL_WEIGHT
}

/// Trailing 14-day feature flow abandonment, 10% weight.
fn abandonment_component(signals: &EngagementSignals) -> f64 {
    if signals.flows_started_14d == 0 {
        return 0.0;
    }
    let rate = signals.flows_abandoned_14d as f64 / signals.flows_started_14d as f64;
    rate.clamp(0.0, 1.0) * 100.0 * ABANDONMENT_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engagement::HabitLoop;
    use proptest::prelude::*;

    fn now() -> Timestamp {
        Timestamp::from_datetime(chrono::DateTime::from_timestamp(1704326400, 0).unwrap())
    }

    #[test]
    fn all_zero_signals_score_zero() {
        let risk = ChurnRisk::compute(&EngagementSignals::default(), now());

        assert_eq!(risk.score(), 0);
        assert_eq!(risk.tier(), ChurnTier::Low);
        assert_eq!(risk.components().total(), 0.0);
    }

    #[test]
    fn full_decline_everywhere_scores_one_hundred() {
        let signals = EngagementSignals {
            sessions_this_week: 0,
            sessions_prior_week: 10,
            habit_loops: vec![HabitLoop { loop_id: "l".into(), active: false }],
            nudges_shown_14d: 5,
            nudges_dismissed_14d: 5,
            flows_started_14d: 4,
            flows_abandoned_14d: 4,
            ..Default::default()
        };

        let risk = ChurnRisk::compute(&signals, now());
        assert_eq!(risk.score(), 100);
        assert_eq!(risk.tier(), ChurnTier::High);
    }

    #[test]
    fn session_growth_contributes_nothing() {
        let declining = EngagementSignals {
            sessions_this_week: 5,
            sessions_prior_week: 10,
            ..Default::default()
        };
        let growing = EngagementSignals {
            sessions_this_week: 20,
            sessions_prior_week: 10,
            ..Default::default()
        };

        assert_eq!(ChurnRisk::compute(&declining, now()).score(), 20);
        assert_eq!(ChurnRisk::compute(&growing, now()).score(), 0);
    }

    #[test]
    fn zero_prior_week_has_no_velocity() {
        let signals = EngagementSignals {
            sessions_this_week: 7,
            sessions_prior_week: 0,
            ..Default::default()
        };
        assert_eq!(ChurnRisk::compute(&signals, now()).components().velocity, 0.0);
    }

    #[test]
    fn no_habit_loops_count_as_healthy() {
        let signals = EngagementSignals::default();
        assert_eq!(ChurnRisk::compute(&signals, now()).components().habit_health, 0.0);
    }

    #[test]
    fn half_lapsed_loops_contribute_fifteen_points() {
        let signals = EngagementSignals {
            habit_loops: vec![
                HabitLoop { loop_id: "a".into(), active: true },
                HabitLoop { loop_id: "b".into(), active: false },
            ],
            ..Default::default()
        };

        let risk = ChurnRisk::compute(&signals, now());
        assert!((risk.components().habit_health - 15.0).abs() < 1e-9);
        assert_eq!(risk.score(), 15);
    }

    #[test]
    fn dismissal_rate_is_weighted_at_twenty_percent() {
        let signals = EngagementSignals {
            nudges_shown_14d: 10,
            nudges_dismissed_14d: 5,
            ..Default::default()
        };
        assert_eq!(ChurnRisk::compute(&signals, now()).score(), 10);
    }

    #[test]
    fn abandonment_rate_is_weighted_at_ten_percent() {
        let signals = EngagementSignals {
            flows_started_14d: 10,
            flows_abandoned_14d: 10,
            ..Default::default()
        };
        assert_eq!(ChurnRisk::compute(&signals, now()).score(), 10);
    }

    #[test]
    fn tier_boundaries_are_exact() {
        assert_eq!(ChurnTier::from_score(30), ChurnTier::Low);
        assert_eq!(ChurnTier::from_score(31), ChurnTier::Medium);
        assert_eq!(ChurnTier::from_score(60), ChurnTier::Medium);
        assert_eq!(ChurnTier::from_score(61), ChurnTier::High);
    }

    #[test]
    fn scoring_is_deterministic() {
        let signals = EngagementSignals {
            sessions_this_week: 3,
            sessions_prior_week: 9,
            nudges_shown_14d: 4,
            nudges_dismissed_14d: 1,
            ..Default::default()
        };

        let first = ChurnRisk::compute(&signals, now());
        let second = ChurnRisk::compute(&signals, now());
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn score_is_always_in_range(
            sessions_this_week in 0u32..1_000,
            sessions_prior_week in 0u32..1_000,
            loop_count in 0usize..20,
            active_count in 0usize..20,
            nudges_shown_14d in 0u32..500,
            nudges_dismissed_14d in 0u32..500,
            flows_started_14d in 0u32..500,
            flows_abandoned_14d in 0u32..500,
        ) {
            let habit_loops = (0..loop_count)
                .map(|i| HabitLoop {
                    loop_id: format!("loop-{}", i),
                    active: i < active_count,
                })
                .collect();

            let signals = EngagementSignals {
                sessions_this_week,
                sessions_prior_week,
                habit_loops,
                nudges_shown_14d,
                nudges_dismissed_14d,
                flows_started_14d,
                flows_abandoned_14d,
                ..Default::default()
            };

            let risk = ChurnRisk::compute(&signals, now());
            prop_assert!(risk.score() <= 100);

            let expected_tier = ChurnTier::from_score(risk.score());
            prop_assert_eq!(risk.tier(), expected_tier);
        }
    }
}
