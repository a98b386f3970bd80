//! Funding milestone ladder.
//!
//! # Responsibility
//! - Hold the configured ladder of funding milestones.
//! - Evaluate which milestones are reached under the active unlock rule.
//!
//! # Invariants
//! - Ladder entries are strictly ascending in both `amount` and `required_tasks`.
//! - Reached milestones always form a prefix of the ladder.
//! - Report `unlocked <= potential` under either rule.

use super::tasks::TaskProgress;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One rung: `amount` dollars unlocked once `required_tasks` are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingMilestone {
    pub amount: u64,
    pub required_tasks: u32,
}

impl FundingMilestone {
    pub const fn new(amount: u64, required_tasks: u32) -> Self {
        Self {
            amount,
            required_tasks,
        }
    }
}

/// How unlocked funding is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockRule {
    /// Unlocked = sum of completed task funding; a milestone is reached when
    /// that sum covers its amount.
    #[default]
    TaskFunding,
    /// A milestone is reached when enough tasks are completed; unlocked is the
    /// highest reached milestone amount.
    MilestoneLadder,
}

impl UnlockRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskFunding => "task_funding",
            Self::MilestoneLadder => "milestone_ladder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    /// Entry at `index` does not strictly exceed its predecessor.
    NotAscending { index: usize },
}

impl Display for LadderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAscending { index } => write!(
                f,
                "milestone #{index} must exceed the previous one in amount and required tasks"
            ),
        }
    }
}

impl Error for LadderError {}

/// Validated, ascending list of funding milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FundingMilestone>", into = "Vec<FundingMilestone>")]
pub struct MilestoneLadder {
    milestones: Vec<FundingMilestone>,
}

impl MilestoneLadder {
    pub fn new(milestones: Vec<FundingMilestone>) -> Result<Self, LadderError> {
        for (index, pair) in milestones.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            if next.amount <= prev.amount || next.required_tasks <= prev.required_tasks {
                return Err(LadderError::NotAscending { index: index + 1 });
            }
        }
        Ok(Self { milestones })
    }

    pub fn milestones(&self) -> &[FundingMilestone] {
        &self.milestones
    }

    /// Top rung amount, or 0 for an empty ladder.
    pub fn top_amount(&self) -> u64 {
        self.milestones.last().map_or(0, |m| m.amount)
    }

    /// Builds the funding report for the given progress view.
    pub fn evaluate(&self, rule: UnlockRule, progress: &TaskProgress<'_>) -> FundingReport {
        let completed_count = progress.completed_count();
        let task_funding = progress.unlocked_funding();

        let is_reached = |milestone: &FundingMilestone| match rule {
            UnlockRule::TaskFunding => task_funding >= milestone.amount,
            UnlockRule::MilestoneLadder => completed_count >= milestone.required_tasks as usize,
        };

        let reached: Vec<FundingMilestone> = self
            .milestones
            .iter()
            .copied()
            .take_while(|m| is_reached(m))
            .collect();

        let (unlocked, potential) = match rule {
            UnlockRule::TaskFunding => (task_funding, progress.total_potential_funding()),
            UnlockRule::MilestoneLadder => (
                reached.last().map_or(0, |m| m.amount),
                self.top_amount(),
            ),
        };

        let next = match self.milestones.get(reached.len()) {
            Some(milestone) => NextMilestone::Pending(*milestone),
            None => NextMilestone::AllReached { total: potential },
        };

        FundingReport {
            rule,
            completed_count,
            total_count: progress.total_count(),
            percent_complete: progress.completion_percent(),
            unlocked,
            potential,
            reached,
            next,
        }
    }
}

impl Default for MilestoneLadder {
    fn default() -> Self {
        Self {
            milestones: vec![
                FundingMilestone::new(250, 3),
                FundingMilestone::new(500, 6),
                FundingMilestone::new(1000, 10),
            ],
        }
    }
}

impl TryFrom<Vec<FundingMilestone>> for MilestoneLadder {
    type Error = LadderError;

    fn try_from(value: Vec<FundingMilestone>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MilestoneLadder> for Vec<FundingMilestone> {
    fn from(value: MilestoneLadder) -> Self {
        value.milestones
    }
}

/// The goal shown after the reached milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextMilestone {
    Pending(FundingMilestone),
    /// Every rung is met; `total` is the report's potential funding.
    AllReached { total: u64 },
}

/// Snapshot of funding progress under one unlock rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingReport {
    pub rule: UnlockRule,
    pub completed_count: usize,
    pub total_count: usize,
    pub percent_complete: u32,
    pub unlocked: u64,
    pub potential: u64,
    pub reached: Vec<FundingMilestone>,
    pub next: NextMilestone,
}
