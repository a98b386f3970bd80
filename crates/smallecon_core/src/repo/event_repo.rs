//! Event repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Attendees, funding, impact and milestones are stored as JSON columns.
//! - `position` reflects creation order and survives updates.

use super::{from_json, parse_date, parse_uuid, to_json, RepoError, RepoResult};
use crate::model::event::{Event, EventFunding, EventId, EventImpact, EventMilestone};
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    event_date,
    location,
    organizer,
    attendees_json,
    funding_json,
    impact_json,
    milestones_json
FROM events";

pub trait EventRepository {
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    fn update_event(&self, event: &Event) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
    /// Replaces all rows, keeping the slice order as `position`.
    fn replace_events(&self, events: &[Event]) -> RepoResult<()>;
}

pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

struct EncodedEvent {
    attendees: String,
    funding: Option<String>,
    impact: Option<String>,
    milestones: String,
}

fn encode(event: &Event) -> RepoResult<EncodedEvent> {
    Ok(EncodedEvent {
        attendees: to_json(&event.attendees, "events.attendees_json")?,
        funding: event
            .funding
            .as_ref()
            .map(|funding| to_json(funding, "events.funding_json"))
            .transpose()?,
        impact: event
            .impact
            .as_ref()
            .map(|impact| to_json(impact, "events.impact_json"))
            .transpose()?,
        milestones: to_json(&event.milestones, "events.milestones_json")?,
    })
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        event.validate()?;
        let encoded = encode(event)?;

        self.conn.execute(
            "INSERT INTO events (
                uuid,
                position,
                title,
                description,
                event_date,
                location,
                organizer,
                attendees_json,
                funding_json,
                impact_json,
                milestones_json
            ) VALUES (
                ?1,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM events),
                ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10
            );",
            params![
                event.id.to_string(),
                event.title.as_str(),
                event.description.as_str(),
                event.date.to_string(),
                event.location.as_str(),
                event.organizer.as_str(),
                encoded.attendees,
                encoded.funding,
                encoded.impact,
                encoded.milestones,
            ],
        )?;

        Ok(event.id)
    }

    fn update_event(&self, event: &Event) -> RepoResult<()> {
        event.validate()?;
        let encoded = encode(event)?;

        let changed = self.conn.execute(
            "UPDATE events
             SET
                title = ?1,
                description = ?2,
                event_date = ?3,
                location = ?4,
                organizer = ?5,
                attendees_json = ?6,
                funding_json = ?7,
                impact_json = ?8,
                milestones_json = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?10;",
            params![
                event.title.as_str(),
                event.description.as_str(),
                event.date.to_string(),
                event.location.as_str(),
                event.organizer.as_str(),
                encoded.attendees,
                encoded.funding,
                encoded.impact,
                encoded.milestones,
                event.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(event.id.to_string()));
        }
        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY position ASC, uuid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn replace_events(&self, events: &[Event]) -> RepoResult<()> {
        self.conn.execute("DELETE FROM events;", [])?;
        for event in events {
            self.create_event(event)?;
        }
        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let uuid_text: String = row.get("uuid")?;
    let date_text: String = row.get("event_date")?;
    let attendees_text: String = row.get("attendees_json")?;
    let milestones_text: String = row.get("milestones_json")?;

    let funding = match row.get::<_, Option<String>>("funding_json")? {
        Some(text) => Some(from_json::<EventFunding>(&text, "events.funding_json")?),
        None => None,
    };
    let impact = match row.get::<_, Option<String>>("impact_json")? {
        Some(text) => Some(from_json::<EventImpact>(&text, "events.impact_json")?),
        None => None,
    };

    let event = Event {
        id: parse_uuid(&uuid_text, "events.uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        date: parse_date(&date_text, "events.event_date")?,
        location: row.get("location")?,
        organizer: row.get("organizer")?,
        attendees: from_json(&attendees_text, "events.attendees_json")?,
        funding,
        impact,
        milestones: from_json::<Vec<EventMilestone>>(&milestones_text, "events.milestones_json")?,
    };
    event.validate()?;
    Ok(event)
}
