//! Task completion use-cases.
//!
//! # Responsibility
//! - Complete/reset catalog tasks through the store.
//! - Report funding progress and newly reached milestones.
//!
//! # Invariants
//! - Completing an already-completed id is a no-op (`Transition::Unchanged`).
//! - Unknown ids are accepted and never affect derived values.

use crate::model::task::TaskId;
use crate::progress::milestone::{FundingMilestone, FundingReport, MilestoneLadder, UnlockRule};
use crate::progress::roadmap::{roadmap, Persona, PhaseBucket};
use crate::store::{Store, Transition};
use log::info;

/// Result of one completion toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub transition: Transition,
    /// Milestones reached by this change and not before it.
    pub newly_reached: Vec<FundingMilestone>,
}

/// Task operations over a caller-owned store and funding policy.
pub struct TaskService<'s> {
    store: &'s mut Store,
    ladder: &'s MilestoneLadder,
    rule: UnlockRule,
}

impl<'s> TaskService<'s> {
    pub fn new(store: &'s mut Store, ladder: &'s MilestoneLadder, rule: UnlockRule) -> Self {
        Self {
            store,
            ladder,
            rule,
        }
    }

    pub fn complete_task(&mut self, id: TaskId) -> CompletionOutcome {
        let before = self.funding_report().reached.len();
        let known = self.store.task(&id).is_some();
        let transition = self.store.complete_task(id.clone());
        let report = self.funding_report();
        let newly_reached = report.reached[before.min(report.reached.len())..].to_vec();

        info!(
            "event=task_complete module=service status=ok task_id={} known={} changed={} unlocked={} newly_reached={}",
            id,
            known,
            transition == Transition::Changed,
            report.unlocked,
            newly_reached.len()
        );
        CompletionOutcome {
            transition,
            newly_reached,
        }
    }

    pub fn reset_task(&mut self, id: TaskId) -> Transition {
        let transition = self.store.reset_task(&id);
        info!(
            "event=task_reset module=service status=ok task_id={} changed={}",
            id,
            transition == Transition::Changed
        );
        transition
    }

    pub fn funding_report(&self) -> FundingReport {
        self.ladder.evaluate(self.rule, &self.store.progress())
    }

    pub fn roadmap(&self, persona: Persona) -> Vec<PhaseBucket<'_>> {
        roadmap(persona, &self.store.progress())
    }
}
