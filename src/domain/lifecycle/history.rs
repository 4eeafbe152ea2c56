//! Lifecycle record: current state, append-only audit history, and the
//! derived experience/intervention side effects.
//!
//! History invariant: there is always exactly one open entry (no
//! `exited_at`), and it matches the current state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{
    merge_interventions, ExperienceSettings, Intervention, LifecycleState, TriggerSignal,
};

/// One stay in a lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateHistoryEntry {
    pub state: LifecycleState,
    pub entered_at: Timestamp,
    pub exited_at: Option<Timestamp>,
    pub duration_days: Option<u32>,
    pub trigger: TriggerSignal,
}

impl StateHistoryEntry {
    fn open(state: LifecycleState, entered_at: Timestamp) -> Self {
        Self {
            state,
            entered_at,
            exited_at: None,
            duration_days: None,
            trigger: state.trigger(),
        }
    }

    fn close(&mut self, now: Timestamp) {
        self.duration_days = Some(now.days_since(&self.entered_at).max(0) as u32);
        self.exited_at = Some(now);
    }

    pub fn is_open(&self) -> bool {
        self.exited_at.is_none()
    }
}

/// Lifecycle sub-structure embedded on the profile aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleRecord {
    current: LifecycleState,
    history: Vec<StateHistoryEntry>,
    experience: ExperienceSettings,
    interventions: Vec<Intervention>,
}

impl LifecycleRecord {
    /// A fresh record: state `new` with one open history entry.
    pub fn new(now: Timestamp) -> Self {
        Self {
            current: LifecycleState::New,
            history: vec![StateHistoryEntry::open(LifecycleState::New, now)],
            experience: ExperienceSettings::default(),
            interventions: Vec::new(),
        }
    }

    pub fn current(&self) -> LifecycleState {
        self.current
    }

    pub fn history(&self) -> &[StateHistoryEntry] {
        &self.history
    }

    pub fn experience(&self) -> &ExperienceSettings {
        &self.experience
    }

    pub fn interventions(&self) -> &[Intervention] {
        &self.interventions
    }

    /// The single open history entry.
    pub fn open_entry(&self) -> &StateHistoryEntry {
        self.history
            .iter()
            .rev()
            .find(|e| e.is_open())
            .expect("lifecycle history always has an open entry")
    }

    /// The state exited most recently, if any transition has happened.
    pub fn previous_state(&self) -> Option<LifecycleState> {
        self.history
            .iter()
            .rev()
            .find(|e| !e.is_open())
            .map(|e| e.state)
    }

    /// Applies one classification run: transition if the state changed,
    /// then refresh experience settings and reconcile interventions.
    ///
    /// Returns true when a transition occurred.
    pub fn apply(&mut self, next: LifecycleState, churn_score: u8, now: Timestamp) -> bool {
        let transitioned = next != self.current;
        if transitioned {
            if let Some(open) = self.history.iter_mut().rev().find(|e| e.is_open()) {
                open.close(now);
            }
            self.history.push(StateHistoryEntry::open(next, now));
            self.current = next;
        }

        self.experience = ExperienceSettings::for_state(self.current, churn_score);
        merge_interventions(&mut self.interventions, self.current, now);

        transitioned
    }
}
