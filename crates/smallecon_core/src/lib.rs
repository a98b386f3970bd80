//! Core domain logic for the Small Economy Works dashboard.
//! This crate is the single source of truth for progress and funding invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod progress;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use model::event::{Event, EventFunding, EventId, EventImpact, EventMilestone, FundingCategory};
pub use model::expense::{Expense, ExpenseCategory, ExpenseId, ExpenseStatus};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use model::task::{Task, TaskCategory, TaskId};
pub use model::ModelValidationError;
pub use progress::milestone::{
    FundingMilestone, FundingReport, LadderError, MilestoneLadder, NextMilestone, UnlockRule,
};
pub use progress::percent;
pub use progress::roadmap::{current_phase, phase_for, roadmap, Persona, Phase, PhaseBucket};
pub use progress::tasks::TaskProgress;
pub use repo::{RepoError, RepoResult};
pub use service::event_service::{CreateEventRequest, EventService, EventServiceError};
pub use service::expense_service::{
    ConfirmPrompt, CreateExpenseRequest, DeleteOutcome, ExpenseService, ExpenseServiceError,
    ExpenseSummary,
};
pub use service::persistence_service::{PersistError, PersistenceService};
pub use service::project_service::{CreateProjectRequest, ProjectService};
pub use service::task_service::{CompletionOutcome, TaskService};
pub use store::{Action, EntityKind, SaveState, Store, StoreError, StoreSnapshot, Transition};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
