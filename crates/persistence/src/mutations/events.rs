// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event mutations.
//!
//! These operations trust their inputs: the boundary layer validates
//! drafts and merged patches before any write reaches this module, and
//! the schema's range/foreign-key checks stand behind that as the second
//! line of defense.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::events;
use crate::error::PersistenceError;
use crate::sqlite::last_insert_rowid;

/// Sparse changeset for event updates; `None` fields are untouched.
#[derive(AsChangeset)]
#[diesel(table_name = events)]
struct EventChangeset<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    start_at: Option<&'a str>,
    end_at: Option<&'a str>,
    resource_id: Option<i64>,
    color: Option<&'a str>,
}

/// Creates a new event scoped to an owner.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `resource_id` - The resource the event is assigned to
/// * `title` - The event title
/// * `description` - An optional description
/// * `start_at` - The encoded start instant
/// * `end_at` - The encoded end instant
/// * `color` - An optional display color (normalized hex)
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the database
/// rejects the write (unknown resource, inverted range).
#[allow(clippy::too_many_arguments)]
pub fn create_event(
    conn: &mut SqliteConnection,
    owner: &str,
    resource_id: i64,
    title: &str,
    description: Option<&str>,
    start_at: &str,
    end_at: &str,
    color: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!(resource_id, title, "Creating event");

    diesel::insert_into(events::table)
        .values((
            events::resource_id.eq(resource_id),
            events::owner.eq(owner),
            events::title.eq(title),
            events::description.eq(description),
            events::start_at.eq(start_at),
            events::end_at.eq(end_at),
            events::color.eq(color),
        ))
        .execute(conn)?;

    let event_id: i64 = last_insert_rowid(conn)?;

    debug!(event_id, "Event created");
    Ok(event_id)
}

/// Applies a sparse update to an event.
///
/// Only fields present in the patch are written; absent fields keep
/// their stored values.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `event_id` - The event to update
/// * `title` - Replacement title, if present
/// * `description` - Replacement description, if present
/// * `start_at` - Replacement encoded start instant, if present
/// * `end_at` - Replacement encoded end instant, if present
/// * `resource_id` - Replacement resource assignment, if present
/// * `color` - Replacement color, if present
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no row matched the owner
/// and id.
#[allow(clippy::too_many_arguments)]
pub fn update_event(
    conn: &mut SqliteConnection,
    owner: &str,
    event_id: i64,
    title: Option<&str>,
    description: Option<&str>,
    start_at: Option<&str>,
    end_at: Option<&str>,
    resource_id: Option<i64>,
    color: Option<&str>,
) -> Result<(), PersistenceError> {
    debug!(event_id, "Updating event");

    let rows_affected: usize = diesel::update(events::table)
        .filter(events::owner.eq(owner))
        .filter(events::event_id.eq(event_id))
        .set(EventChangeset {
            title,
            description,
            start_at,
            end_at,
            resource_id,
            color,
        })
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }
    Ok(())
}

/// Deletes an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `event_id` - The event to delete
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no row matched the owner
/// and id.
pub fn delete_event(
    conn: &mut SqliteConnection,
    owner: &str,
    event_id: i64,
) -> Result<(), PersistenceError> {
    info!(event_id, "Deleting event");

    let rows_affected: usize = diesel::delete(events::table)
        .filter(events::owner.eq(owner))
        .filter(events::event_id.eq(event_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }
    Ok(())
}
