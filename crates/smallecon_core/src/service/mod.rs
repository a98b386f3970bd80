//! Core use-case services.
//!
//! # Responsibility
//! - Turn caller intents into store actions and derived reports.
//! - Keep callers decoupled from reducer and storage details.
//!
//! # Invariants
//! - Services borrow the store explicitly; none keeps global state.

pub mod event_service;
pub mod expense_service;
pub mod persistence_service;
pub mod project_service;
pub mod task_service;
