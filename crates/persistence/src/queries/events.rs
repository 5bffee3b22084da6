// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use shift_board_domain::Event;

use crate::data_models::EventRow;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Retrieves one event by id, scoped to an owner.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `event_id` - The event to retrieve
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no row matched.
pub fn get_event(
    conn: &mut SqliteConnection,
    owner: &str,
    event_id: i64,
) -> Result<Event, PersistenceError> {
    let row: Option<EventRow> = events::table
        .filter(events::owner.eq(owner))
        .filter(events::event_id.eq(event_id))
        .first::<EventRow>(conn)
        .optional()?;

    row.ok_or(PersistenceError::EventNotFound(event_id))?
        .into_domain()
}

/// Lists events overlapping a range, ordered by start then id.
///
/// Overlap is the calendar-view contract: an event belongs to the range
/// if it starts before the range ends and ends after the range starts.
/// The comparison runs on the encoded text timestamps, whose fixed layout
/// orders lexicographically.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `range_start` - The encoded range start
/// * `range_end` - The encoded range end
/// * `resource_filter` - Optional narrowing to one resource
///
/// # Errors
///
/// Returns an error if the query fails or a row no longer decodes.
pub fn list_events(
    conn: &mut SqliteConnection,
    owner: &str,
    range_start: &str,
    range_end: &str,
    resource_filter: Option<i64>,
) -> Result<Vec<Event>, PersistenceError> {
    let mut query = events::table
        .filter(events::owner.eq(owner))
        .filter(events::start_at.lt(range_end))
        .filter(events::end_at.gt(range_start))
        .into_boxed();

    if let Some(resource_id) = resource_filter {
        query = query.filter(events::resource_id.eq(resource_id));
    }

    let rows: Vec<EventRow> = query
        .order((events::start_at.asc(), events::event_id.asc()))
        .load::<EventRow>(conn)?;

    rows.into_iter().map(EventRow::into_domain).collect()
}
