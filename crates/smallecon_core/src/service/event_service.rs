//! Event use-case service.
//!
//! # Responsibility
//! - Turn event form input into validated store actions.
//! - Answer lookup/listing questions for event screens.
//!
//! # Invariants
//! - Every mutation goes through `Store::dispatch`.
//! - Lookups of unknown ids return `None` (callers render a not-found view).

use crate::model::event::{Event, EventFunding, EventId, EventImpact, EventMilestone};
use crate::store::{Action, EntityKind, Store, StoreError, Transition};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug)]
pub enum EventServiceError {
    /// Input failed validation or collided with an existing record.
    Rejected(StoreError),
    EventNotFound(EventId),
    MilestoneOutOfRange { index: usize, len: usize },
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::MilestoneOutOfRange { index, len } => {
                write!(f, "milestone index {index} out of range for {len} milestones")
            }
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for EventServiceError {
    fn from(value: StoreError) -> Self {
        if let StoreError::NotFound {
            kind: EntityKind::Event,
            id,
        } = &value
        {
            if let Ok(uuid) = Uuid::parse_str(id) {
                return Self::EventNotFound(uuid);
            }
        }
        Self::Rejected(value)
    }
}

/// Input collected by the event creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
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

impl CreateEventRequest {
    /// Minimal request; remaining fields start empty.
    pub fn new(title: impl Into<String>, date: NaiveDate, organizer: impl Into<String>) -> Self {
        Self {
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
}

/// Event operations over a caller-owned store.
pub struct EventService<'s> {
    store: &'s mut Store,
}

impl<'s> EventService<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Appends a new event built from form input.
    ///
    /// Text fields are trimmed; attendees are normalized by the store.
    pub fn create_event(&mut self, request: CreateEventRequest) -> Result<EventId, EventServiceError> {
        let mut event = Event::new(
            request.title.trim(),
            request.date,
            request.organizer.trim(),
        );
        event.description = request.description.trim().to_string();
        event.location = request.location.trim().to_string();
        event.attendees = request.attendees;
        event.funding = request.funding;
        event.impact = request.impact;
        event.milestones = request.milestones;

        let id = event.id;
        self.store.dispatch(Action::AddEvent(event))?;
        info!("event=event_create module=service status=ok event_id={id}");
        Ok(id)
    }

    /// Replaces an existing event in place.
    pub fn update_event(&mut self, event: Event) -> Result<Transition, EventServiceError> {
        Ok(self.store.dispatch(Action::UpdateEvent(event))?)
    }

    pub fn remove_event(&mut self, id: EventId) -> Result<(), EventServiceError> {
        self.store.dispatch(Action::RemoveEvent(id))?;
        info!("event=event_remove module=service status=ok event_id={id}");
        Ok(())
    }

    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.store.event(id)
    }

    /// Events dated on or after `from`, earliest first; ties keep creation order.
    pub fn upcoming_events(&self, from: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .store
            .events()
            .iter()
            .filter(|event| event.date >= from)
            .collect();
        events.sort_by_key(|event| event.date);
        events
    }

    /// Funded share for one event; `None` when the event or its funding is missing.
    pub fn funding_percent(&self, id: EventId) -> Option<u32> {
        self.store
            .event(id)
            .and_then(|event| event.funding.as_ref())
            .map(EventFunding::percent_funded)
    }

    /// Flips one milestone's completion flag.
    pub fn toggle_milestone(&mut self, id: EventId, index: usize) -> Result<bool, EventServiceError> {
        let mut event = self
            .store
            .event(id)
            .cloned()
            .ok_or(EventServiceError::EventNotFound(id))?;
        let len = event.milestones.len();
        let milestone = event
            .milestones
            .get_mut(index)
            .ok_or(EventServiceError::MilestoneOutOfRange { index, len })?;
        milestone.completed = !milestone.completed;
        let completed = milestone.completed;
        self.store.dispatch(Action::UpdateEvent(event))?;
        Ok(completed)
    }
}
