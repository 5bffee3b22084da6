// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Shift Board.
//!
//! This crate is the boundary to the relational store: a Diesel/SQLite
//! adapter exposing scoped CRUD and range queries over resources and
//! events. Every operation takes the caller's opaque owner token and
//! filters on it, so no query ever crosses callers.
//!
//! The adapter performs no retries and holds no idempotency keys; each
//! operation succeeds once or fails synchronously. A client that retries
//! a create after a timeout may therefore produce a duplicate event,
//! an acknowledged gap inherited from the system this store models.
//!
//! ## Testing
//!
//! Unit and integration tests run against unique shared in-memory
//! databases, keyed by an atomic counter for deterministic isolation.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use shift_board_domain::{Event, EventDraft, EventPatch, Resource, TimeRange};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{EventRow, ResourceRow};
pub use error::PersistenceError;

use data_models::encode_instant;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for resources and their schedule events.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::open(&shared_memory_url)?;
        sqlite::assert_foreign_keys(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::open(path_str)?;
        sqlite::enable_wal(&mut conn)?;
        sqlite::assert_foreign_keys(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Creates a resource and returns its persisted form.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `name` - The display name
    /// * `role` - An optional role label
    /// * `color` - An optional display color (normalized hex)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or read-back fails.
    pub fn create_resource(
        &mut self,
        owner: &str,
        name: &str,
        role: Option<&str>,
        color: Option<&str>,
    ) -> Result<Resource, PersistenceError> {
        let resource_id: i64 =
            mutations::resources::create_resource(&mut self.conn, owner, name, role, color)?;
        queries::resources::get_resource(&mut self.conn, owner, resource_id)
    }

    /// Retrieves one resource by id.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `resource_id` - The resource to retrieve
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ResourceNotFound` if absent for this
    /// owner.
    pub fn get_resource(
        &mut self,
        owner: &str,
        resource_id: i64,
    ) -> Result<Resource, PersistenceError> {
        queries::resources::get_resource(&mut self.conn, owner, resource_id)
    }

    /// Lists an owner's resources, ordered by name then id.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_resources(&mut self, owner: &str) -> Result<Vec<Resource>, PersistenceError> {
        queries::resources::list_resources(&mut self.conn, owner)
    }

    /// Applies a sparse update to a resource and returns its new form.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `resource_id` - The resource to update
    /// * `name` - Replacement name, if present
    /// * `role` - Replacement role, if present
    /// * `color` - Replacement color, if present
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ResourceNotFound` if absent for this
    /// owner.
    pub fn update_resource(
        &mut self,
        owner: &str,
        resource_id: i64,
        name: Option<&str>,
        role: Option<&str>,
        color: Option<&str>,
    ) -> Result<Resource, PersistenceError> {
        mutations::resources::update_resource(
            &mut self.conn,
            owner,
            resource_id,
            name,
            role,
            color,
        )?;
        queries::resources::get_resource(&mut self.conn, owner, resource_id)
    }

    /// Deletes a resource and returns its final snapshot.
    ///
    /// The resource's events are removed in the same statement via the
    /// schema's cascade.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `resource_id` - The resource to delete
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ResourceNotFound` if absent for this
    /// owner.
    pub fn delete_resource(
        &mut self,
        owner: &str,
        resource_id: i64,
    ) -> Result<Resource, PersistenceError> {
        let snapshot: Resource =
            queries::resources::get_resource(&mut self.conn, owner, resource_id)?;
        mutations::resources::delete_resource(&mut self.conn, owner, resource_id)?;
        Ok(snapshot)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Creates an event from a validated draft and returns its persisted
    /// form.
    ///
    /// The caller validates the draft before it reaches this adapter; the
    /// schema's range and foreign-key checks are the second line of
    /// defense.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `draft` - The validated draft
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the database
    /// rejects the write.
    pub fn create_event(
        &mut self,
        owner: &str,
        draft: &EventDraft,
    ) -> Result<Event, PersistenceError> {
        let event_id: i64 = mutations::events::create_event(
            &mut self.conn,
            owner,
            draft.resource_id,
            &draft.title,
            draft.description.as_deref(),
            &encode_instant(draft.start),
            &encode_instant(draft.end),
            draft.color.as_ref().map(shift_board_domain::HexColor::as_str),
        )?;
        queries::events::get_event(&mut self.conn, owner, event_id)
    }

    /// Retrieves one event by id.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `event_id` - The event to retrieve
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if absent for this owner.
    pub fn get_event(&mut self, owner: &str, event_id: i64) -> Result<Event, PersistenceError> {
        queries::events::get_event(&mut self.conn, owner, event_id)
    }

    /// Lists events overlapping a range, ordered by start then id.
    ///
    /// The sequence is finite and restartable; callers re-invoke for a
    /// new range at any time.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `range` - The range to query
    /// * `resource_filter` - Optional narrowing to one resource
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events(
        &mut self,
        owner: &str,
        range: &TimeRange,
        resource_filter: Option<i64>,
    ) -> Result<Vec<Event>, PersistenceError> {
        queries::events::list_events(
            &mut self.conn,
            owner,
            &encode_instant(range.start()),
            &encode_instant(range.end()),
            resource_filter,
        )
    }

    /// Applies a sparse patch to an event and returns its new form.
    ///
    /// Only fields present in the patch are written. The caller validates
    /// the merged result before calling; the schema's range check backs
    /// that up.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `event_id` - The event to update
    /// * `patch` - The sparse patch
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if absent for this owner.
    pub fn update_event(
        &mut self,
        owner: &str,
        event_id: i64,
        patch: &EventPatch,
    ) -> Result<Event, PersistenceError> {
        let start_at: Option<String> = patch.start.map(encode_instant);
        let end_at: Option<String> = patch.end.map(encode_instant);

        mutations::events::update_event(
            &mut self.conn,
            owner,
            event_id,
            patch.title.as_deref(),
            patch.description.as_deref(),
            start_at.as_deref(),
            end_at.as_deref(),
            patch.resource_id,
            patch.color.as_ref().map(shift_board_domain::HexColor::as_str),
        )?;
        queries::events::get_event(&mut self.conn, owner, event_id)
    }

    /// Deletes an event and returns its final snapshot.
    ///
    /// The snapshot lets callers reconcile optimistic view state against
    /// exactly what was removed.
    ///
    /// # Arguments
    ///
    /// * `owner` - The opaque owner token
    /// * `event_id` - The event to delete
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if absent for this owner.
    pub fn delete_event(&mut self, owner: &str, event_id: i64) -> Result<Event, PersistenceError> {
        let snapshot: Event = queries::events::get_event(&mut self.conn, owner, event_id)?;
        mutations::events::delete_event(&mut self.conn, owner, event_id)?;
        Ok(snapshot)
    }
}
