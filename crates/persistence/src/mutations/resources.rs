// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::resources;
use crate::error::PersistenceError;
use crate::sqlite::last_insert_rowid;

/// Sparse changeset for resource updates; `None` fields are untouched.
#[derive(AsChangeset)]
#[diesel(table_name = resources)]
struct ResourceChangeset<'a> {
    name: Option<&'a str>,
    role: Option<&'a str>,
    color: Option<&'a str>,
}

/// Creates a new resource scoped to an owner.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `name` - The display name
/// * `role` - An optional role label
/// * `color` - An optional display color (normalized hex)
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_resource(
    conn: &mut SqliteConnection,
    owner: &str,
    name: &str,
    role: Option<&str>,
    color: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!(name, "Creating resource");

    diesel::insert_into(resources::table)
        .values((
            resources::owner.eq(owner),
            resources::name.eq(name),
            resources::role.eq(role),
            resources::color.eq(color),
        ))
        .execute(conn)?;

    let resource_id: i64 = last_insert_rowid(conn)?;

    debug!(resource_id, "Resource created");
    Ok(resource_id)
}

/// Applies a sparse update to a resource.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `resource_id` - The resource to update
/// * `name` - Replacement name, if present
/// * `role` - Replacement role, if present
/// * `color` - Replacement color, if present
///
/// # Errors
///
/// Returns `PersistenceError::ResourceNotFound` if no row matched the
/// owner and id.
pub fn update_resource(
    conn: &mut SqliteConnection,
    owner: &str,
    resource_id: i64,
    name: Option<&str>,
    role: Option<&str>,
    color: Option<&str>,
) -> Result<(), PersistenceError> {
    debug!(resource_id, "Updating resource");

    let rows_affected: usize = diesel::update(resources::table)
        .filter(resources::owner.eq(owner))
        .filter(resources::resource_id.eq(resource_id))
        .set(ResourceChangeset { name, role, color })
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ResourceNotFound(resource_id));
    }
    Ok(())
}

/// Deletes a resource.
///
/// The schema's `ON DELETE CASCADE` removes the resource's events in the
/// same statement.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `resource_id` - The resource to delete
///
/// # Errors
///
/// Returns `PersistenceError::ResourceNotFound` if no row matched the
/// owner and id.
pub fn delete_resource(
    conn: &mut SqliteConnection,
    owner: &str,
    resource_id: i64,
) -> Result<(), PersistenceError> {
    info!(resource_id, "Deleting resource (cascades to its events)");

    let rows_affected: usize = diesel::delete(resources::table)
        .filter(resources::owner.eq(owner))
        .filter(resources::resource_id.eq(resource_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ResourceNotFound(resource_id));
    }
    Ok(())
}
