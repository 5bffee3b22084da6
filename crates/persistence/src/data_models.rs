// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and the text timestamp codec.
//!
//! Instants are stored as UTC RFC 3339 text with a fixed layout
//! (`2024-01-01T09:00:00Z`), so lexicographic comparison in SQL matches
//! chronological order and range filters can run directly on the column.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use shift_board_domain::{Event, HexColor, Resource, TimeRange};

use crate::error::PersistenceError;

/// Encodes an instant into its stored text form.
#[must_use]
pub(crate) fn encode_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decodes a stored text timestamp.
pub(crate) fn decode_instant(
    value: &str,
    table: &'static str,
    id: i64,
) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PersistenceError::CorruptRow {
            table,
            id,
            reason: format!("bad timestamp '{value}': {e}"),
        })
}

/// Decodes an optional stored color.
fn decode_color(
    value: Option<String>,
    table: &'static str,
    id: i64,
) -> Result<Option<HexColor>, PersistenceError> {
    value
        .map(|raw| {
            HexColor::parse(&raw).map_err(|e| PersistenceError::CorruptRow {
                table,
                id,
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// A row from the `resources` table.
#[derive(Debug, Queryable)]
pub struct ResourceRow {
    /// The canonical resource id.
    pub resource_id: i64,
    /// The opaque owner token the row is scoped to.
    pub owner: String,
    /// The display name.
    pub name: String,
    /// The optional role label.
    pub role: Option<String>,
    /// The optional display color.
    pub color: Option<String>,
    /// Row creation timestamp (storage bookkeeping only).
    pub created_at: String,
}

impl ResourceRow {
    /// Converts the row into its domain value.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRow` if a stored field no longer
    /// decodes.
    pub fn into_domain(self) -> Result<Resource, PersistenceError> {
        let color = decode_color(self.color, "resources", self.resource_id)?;
        Ok(Resource::with_id(
            self.resource_id,
            self.name,
            self.role,
            color,
        ))
    }
}

/// A row from the `events` table.
#[derive(Debug, Queryable)]
pub struct EventRow {
    /// The canonical event id.
    pub event_id: i64,
    /// The resource the event is assigned to.
    pub resource_id: i64,
    /// The opaque owner token the row is scoped to.
    pub owner: String,
    /// The event title.
    pub title: String,
    /// The optional description.
    pub description: Option<String>,
    /// The stored start instant.
    pub start_at: String,
    /// The stored end instant.
    pub end_at: String,
    /// The optional display color.
    pub color: Option<String>,
    /// Row creation timestamp (storage bookkeeping only).
    pub created_at: String,
}

impl EventRow {
    /// Converts the row into its domain value.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRow` if a stored timestamp,
    /// window, or color no longer decodes. The schema's range check makes
    /// an inverted stored window unreachable short of manual tampering.
    pub fn into_domain(self) -> Result<Event, PersistenceError> {
        let start = decode_instant(&self.start_at, "events", self.event_id)?;
        let end = decode_instant(&self.end_at, "events", self.event_id)?;
        let window = TimeRange::new(start, end).map_err(|e| PersistenceError::CorruptRow {
            table: "events",
            id: self.event_id,
            reason: e.to_string(),
        })?;
        let color = decode_color(self.color, "events", self.event_id)?;

        Ok(Event::with_id(
            self.event_id,
            self.title,
            self.description,
            window,
            self.resource_id,
            color,
        ))
    }
}
