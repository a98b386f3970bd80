//! Community event / initiative model.
//!
//! # Responsibility
//! - Define the event record with optional funding and impact blocks.
//! - Normalize attendee lists and validate required text.
//!
//! # Invariants
//! - `id` is never nil.
//! - `attendees` holds trimmed, non-empty, unique names in first-seen order.

use super::{require_text, ModelValidationError};
use crate::progress::percent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of one event.
pub type EventId = Uuid;

/// Where an event's money comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingCategory {
    Grant,
    Sponsorship,
    Donation,
    Crowdfunding,
    Internal,
}

impl FundingCategory {
    pub const ALL: [FundingCategory; 5] = [
        Self::Grant,
        Self::Sponsorship,
        Self::Donation,
        Self::Crowdfunding,
        Self::Internal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grant => "grant",
            Self::Sponsorship => "sponsorship",
            Self::Donation => "donation",
            Self::Crowdfunding => "crowdfunding",
            Self::Internal => "internal",
        }
    }
}

impl Display for FundingCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundingCategory {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or(ModelValidationError::UnknownVariant {
                kind: "funding category",
                value: normalized,
            })
    }
}

/// Funding block attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFunding {
    /// Dollars raised so far.
    pub total_funded: u64,
    /// Dollars targeted.
    pub funding_goal: u64,
    pub funding_source: String,
    pub funding_category: FundingCategory,
}

impl EventFunding {
    /// Funded share of the goal, capped at 100. Zero goal reports 0.
    pub fn percent_funded(&self) -> u32 {
        percent(self.total_funded, self.funding_goal).min(100)
    }
}

/// Reported outcome of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImpact {
    pub participants_reached: u32,
    pub summary: String,
}

/// Checkpoint tracked inside one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMilestone {
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

/// Community event or initiative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub organizer: String,
    pub attendees: Vec<String>,
    pub funding: Option<EventFunding>,
    pub impact: Option<EventImpact>,
    pub milestones: Vec<EventMilestone>,
}

impl Event {
    /// Creates an event with a generated id and no optional blocks.
    pub fn new(title: impl Into<String>, date: NaiveDate, organizer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            date,
            location: String::new(),
            organizer: organizer.into(),
            attendees: Vec::new(),
            funding: None,
            impact: None,
            milestones: Vec::new(),
        }
    }

    /// Checks identity and required text fields.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId { entity: "event" });
        }
        require_text("event", "title", &self.title)?;
        require_text("event", "organizer", &self.organizer)?;
        for milestone in &self.milestones {
            require_text("event milestone", "title", &milestone.title)?;
        }
        Ok(())
    }

    /// Trims and deduplicates attendees, keeping first occurrence.
    pub fn normalize_attendees(&mut self) {
        let mut seen = HashSet::new();
        let attendees = std::mem::take(&mut self.attendees);
        self.attendees = attendees
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();
    }

    /// Completed share of milestones; 0 when there are none.
    pub fn milestone_percent(&self) -> u32 {
        let done = self.milestones.iter().filter(|m| m.completed).count();
        percent(done as u64, self.milestones.len() as u64)
    }
}
