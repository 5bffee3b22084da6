// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use shift_board_domain::Resource;

use crate::data_models::ResourceRow;
use crate::diesel_schema::resources;
use crate::error::PersistenceError;

/// Retrieves one resource by id, scoped to an owner.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
/// * `resource_id` - The resource to retrieve
///
/// # Errors
///
/// Returns `PersistenceError::ResourceNotFound` if no row matched.
pub fn get_resource(
    conn: &mut SqliteConnection,
    owner: &str,
    resource_id: i64,
) -> Result<Resource, PersistenceError> {
    let row: Option<ResourceRow> = resources::table
        .filter(resources::owner.eq(owner))
        .filter(resources::resource_id.eq(resource_id))
        .first::<ResourceRow>(conn)
        .optional()?;

    row.ok_or(PersistenceError::ResourceNotFound(resource_id))?
        .into_domain()
}

/// Lists an owner's resources, ordered by name then id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner` - The opaque owner token
///
/// # Errors
///
/// Returns an error if the query fails or a row no longer decodes.
pub fn list_resources(
    conn: &mut SqliteConnection,
    owner: &str,
) -> Result<Vec<Resource>, PersistenceError> {
    let rows: Vec<ResourceRow> = resources::table
        .filter(resources::owner.eq(owner))
        .order((resources::name.asc(), resources::resource_id.asc()))
        .load::<ResourceRow>(conn)?;

    rows.into_iter().map(ResourceRow::into_domain).collect()
}
