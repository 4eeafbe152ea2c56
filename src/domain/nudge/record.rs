//! Durable nudge records, keyed by `(user_id, nudge_id)`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NudgeId, Timestamp, UserId};

/// Where a nudge is delivered. Rendering is the delivery layer's problem;
/// this only records the intended surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeSurface {
    Toast,
    Banner,
    Email,
}

impl NudgeSurface {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeSurface::Toast => "toast",
            NudgeSurface::Banner => "banner",
            NudgeSurface::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgePriority {
    Low,
    Medium,
    High,
}

impl NudgePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgePriority::Low => "low",
            NudgePriority::Medium => "medium",
            NudgePriority::High => "high",
        }
    }
}

/// Status is mutated externally when the user dismisses the nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeStatus {
    Active,
    Dismissed,
}

impl NudgeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeStatus::Active => "active",
            NudgeStatus::Dismissed => "dismissed",
        }
    }
}

/// Category of a general (preference-based) nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeCategory {
    Habit,
    FeatureDiscovery,
    WinBack,
    Upsell,
}

/// Day-gated tier of an activation-path nudge. A tier's rules become
/// eligible once its day threshold is crossed and stay eligible after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationTier {
    Day0,
    Day2,
    Day5,
    Day7,
}

impl ActivationTier {
    /// Days since onboarding at which this tier unlocks.
    pub fn unlock_day(&self) -> u32 {
        match self {
            ActivationTier::Day0 => 0,
            ActivationTier::Day2 => 2,
            ActivationTier::Day5 => 5,
            ActivationTier::Day7 => 7,
        }
    }
}

/// The two record kinds: general preference-based and activation-path-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NudgeKind {
    General { category: NudgeCategory },
    Activation { tier: ActivationTier },
}

/// A proactive, dismissible suggestion tied to a fired rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nudge {
    pub user_id: UserId,
    pub nudge_id: NudgeId,
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

impl Nudge {
    /// Marks the nudge dismissed.
    pub fn dismiss(&mut self) {
        self.status = NudgeStatus::Dismissed;
    }

    /// Records another presentation of an existing nudge.
    pub fn record_shown(&mut self, now: Timestamp) {
        self.shown_count += 1;
        self.shown_at = now;
    }

    pub fn is_active(&self) -> bool {
        self.status == NudgeStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_datetime(chrono::DateTime::from_timestamp(1704326400, 0).unwrap())
    }

    fn sample() -> Nudge {
        Nudge {
            user_id: UserId::new("user-1").unwrap(),
            nudge_id: NudgeId::new("save_first_deal").unwrap(),
            kind: NudgeKind::Activation { tier: ActivationTier::Day2 },
            title: "Save a deal".into(),
            body: "Keep the deals you like in one place.".into(),
            cta: "Save deal".into(),
            surface: NudgeSurface::Banner,
            priority: NudgePriority::Medium,
            status: NudgeStatus::Active,
            shown_at: now(),
            shown_count: 1,
        }
    }

    #[test]
    fn tier_unlock_days_are_fixed() {
        assert_eq!(ActivationTier::Day0.unlock_day(), 0);
        assert_eq!(ActivationTier::Day2.unlock_day(), 2);
        assert_eq!(ActivationTier::Day5.unlock_day(), 5);
        assert_eq!(ActivationTier::Day7.unlock_day(), 7);
    }

    #[test]
    fn record_shown_bumps_count_and_timestamp() {
        let mut nudge = sample();
        let later = now().plus_days(1);

        nudge.record_shown(later);

        assert_eq!(nudge.shown_count, 2);
        assert_eq!(nudge.shown_at, later);
    }

    #[test]
    fn dismiss_deactivates() {
        let mut nudge = sample();
        assert!(nudge.is_active());

        nudge.dismiss();

        assert!(!nudge.is_active());
        assert_eq!(nudge.status, NudgeStatus::Dismissed);
    }

    #[test]
    fn kind_serializes_tagged() {
        let json = serde_json::to_value(NudgeKind::General {
            category: NudgeCategory::WinBack,
        })
        .unwrap();
        assert_eq!(json["type"], "general");
        assert_eq!(json["category"], "win_back");

        let json = serde_json::to_value(NudgeKind::Activation {
            tier: ActivationTier::Day5,
        })
        .unwrap();
        assert_eq!(json["type"], "activation");
        assert_eq!(json["tier"], "day5");
    }
}
