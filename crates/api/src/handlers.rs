// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! One function per operation, each taking the persistence adapter, the
//! authenticated caller, and a request type. Validation happens here,
//! before any write reaches the store; every store row the operation
//! touches is scoped by the caller's token.
//!
//! No operation retries: each either succeeds once or fails
//! synchronously, and a failure leaves local state unchanged.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use shift_board::plan_move;
use shift_board_domain::{
    EventDraft, EventPatch, HexColor, TimeRange, build_heatmap, parse_instant,
    summarize_workload, validate_event_draft, validate_resource_name,
};
use shift_board_persistence::{Persistence, PersistenceError};

use crate::auth::Caller;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    CreateEventRequest, CreateResourceRequest, EventResponse, HeatmapDayResponse,
    HeatmapReportRequest, HeatmapReportResponse, ListEventsRequest, ListEventsResponse,
    ListResourcesResponse, MoveEventRequest, ResourceResponse, UpdateEventRequest,
    UpdateResourceRequest, WorkloadReportRequest, WorkloadReportResponse, WorkloadRowResponse,
};

/// Default merged-interval display cap for heatmap days.
const DEFAULT_INTERVAL_CAP: usize = 3;

/// Parses an optional IANA zone name, defaulting to UTC.
fn parse_zone(zone: Option<&str>) -> Result<Tz, ApiError> {
    zone.map_or(Ok(chrono_tz::UTC), |name| {
        name.parse().map_err(|_| ApiError::InvalidInput {
            field: String::from("zone"),
            message: format!("Unknown time zone '{name}'"),
        })
    })
}

/// Parses a required IANA zone name.
fn parse_required_zone(name: &str) -> Result<Tz, ApiError> {
    name.parse().map_err(|_| ApiError::InvalidInput {
        field: String::from("zone"),
        message: format!("Unknown time zone '{name}'"),
    })
}

/// Resolves a time value in either accepted form.
///
/// With a reference day, wall-clock labels resolve against it in `zone`.
/// Without one, only the absolute RFC 3339 form is accepted.
fn resolve_instant(
    value: &str,
    reference_day: Option<NaiveDate>,
    zone: Tz,
    field: &'static str,
) -> Result<DateTime<Utc>, ApiError> {
    match reference_day {
        Some(day) => parse_instant(value, day, zone).map_err(|e| ApiError::InvalidInput {
            field: field.to_string(),
            message: e.to_string(),
        }),
        None => DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ApiError::InvalidInput {
                field: field.to_string(),
                message: format!(
                    "'{value}' is not an RFC 3339 timestamp; wall-clock times need reference_day"
                ),
            }),
    }
}

/// Parses an optional color string.
fn parse_color(color: Option<&str>) -> Result<Option<HexColor>, ApiError> {
    color
        .map(|c| HexColor::parse(c).map_err(translate_domain_error))
        .transpose()
}

/// Resolves a start/end pair into a validated range.
fn parse_range(
    start: &str,
    end: &str,
    reference_day: Option<NaiveDate>,
    zone: Tz,
) -> Result<TimeRange, ApiError> {
    let start_instant: DateTime<Utc> = resolve_instant(start, reference_day, zone, "start")?;
    let end_instant: DateTime<Utc> = resolve_instant(end, reference_day, zone, "end")?;
    TimeRange::new(start_instant, end_instant).map_err(translate_domain_error)
}

/// Checks that a resource exists for this caller before an event write
/// references it.
///
/// The store's foreign key is the second line of defense; catching it
/// here turns the failure into a validation error before any write is
/// attempted.
fn require_resource(
    persistence: &mut Persistence,
    caller: &Caller,
    resource_id: i64,
) -> Result<(), ApiError> {
    match persistence.get_resource(caller.token(), resource_id) {
        Ok(_) => Ok(()),
        Err(PersistenceError::ResourceNotFound(id)) => Err(ApiError::InvalidInput {
            field: String::from("resource_id"),
            message: format!("Resource {id} does not exist"),
        }),
        Err(other) => Err(translate_persistence_error(other)),
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Creates a resource.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on validation failure, or a
/// translated store error.
pub fn create_resource(
    persistence: &mut Persistence,
    caller: &Caller,
    request: CreateResourceRequest,
) -> Result<ResourceResponse, ApiError> {
    validate_resource_name(&request.name).map_err(translate_domain_error)?;
    let color: Option<HexColor> = parse_color(request.color.as_deref())?;

    let resource = persistence
        .create_resource(
            caller.token(),
            &request.name,
            request.role.as_deref(),
            color.as_ref().map(HexColor::as_str),
        )
        .map_err(translate_persistence_error)?;

    info!(name = %resource.name, "Created resource");
    Ok(ResourceResponse::from_resource(&resource))
}

/// Lists the caller's resources.
///
/// # Errors
///
/// Returns a translated store error if the query fails.
pub fn list_resources(
    persistence: &mut Persistence,
    caller: &Caller,
) -> Result<ListResourcesResponse, ApiError> {
    let resources = persistence
        .list_resources(caller.token())
        .map_err(translate_persistence_error)?;

    Ok(ListResourcesResponse {
        resources: resources
            .iter()
            .map(ResourceResponse::from_resource)
            .collect(),
    })
}

/// Applies a sparse update to a resource.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on an empty patch or validation
/// failure, `ApiError::ResourceNotFound` if the id does not exist, or a
/// translated store error.
pub fn update_resource(
    persistence: &mut Persistence,
    caller: &Caller,
    resource_id: i64,
    request: UpdateResourceRequest,
) -> Result<ResourceResponse, ApiError> {
    if request.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("patch"),
            message: String::from("Empty patch: at least one field must be present"),
        });
    }
    if let Some(name) = &request.name {
        validate_resource_name(name).map_err(translate_domain_error)?;
    }
    let color: Option<HexColor> = parse_color(request.color.as_deref())?;

    let resource = persistence
        .update_resource(
            caller.token(),
            resource_id,
            request.name.as_deref(),
            request.role.as_deref(),
            color.as_ref().map(HexColor::as_str),
        )
        .map_err(translate_persistence_error)?;

    debug!(resource_id, "Updated resource");
    Ok(ResourceResponse::from_resource(&resource))
}

/// Deletes a resource, cascading to its events, and returns the final
/// snapshot.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the id does not exist, or a
/// translated store error.
pub fn delete_resource(
    persistence: &mut Persistence,
    caller: &Caller,
    resource_id: i64,
) -> Result<ResourceResponse, ApiError> {
    let snapshot = persistence
        .delete_resource(caller.token(), resource_id)
        .map_err(translate_persistence_error)?;

    info!(resource_id, "Deleted resource and its events");
    Ok(ResourceResponse::from_resource(&snapshot))
}

// ============================================================================
// Events
// ============================================================================

/// Creates an event from a draft.
///
/// Validation (title, range order, resource existence) runs before any
/// write leaves this process.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` listing the offending field(s), or a
/// translated store error.
pub fn create_event(
    persistence: &mut Persistence,
    caller: &Caller,
    request: CreateEventRequest,
) -> Result<EventResponse, ApiError> {
    let resource_id: i64 = request.resource_id.ok_or_else(|| ApiError::InvalidInput {
        field: String::from("resource_id"),
        message: String::from("resource_id is required"),
    })?;
    let zone: Tz = parse_zone(request.zone.as_deref())?;
    let start: DateTime<Utc> = resolve_instant(&request.start, request.reference_day, zone, "start")?;
    let end: DateTime<Utc> = resolve_instant(&request.end, request.reference_day, zone, "end")?;
    let color: Option<HexColor> = parse_color(request.color.as_deref())?;

    let draft = EventDraft {
        title: request.title,
        description: request.description,
        start,
        end,
        resource_id,
        color,
    };
    validate_event_draft(&draft).map_err(translate_domain_error)?;
    require_resource(persistence, caller, resource_id)?;

    let event = persistence
        .create_event(caller.token(), &draft)
        .map_err(translate_persistence_error)?;

    info!(event_id = ?event.event_id, resource_id, "Created event");
    Ok(EventResponse::from_event(&event))
}

/// Lists events overlapping a range, ordered by start ascending.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on an unparseable or inverted range,
/// or a translated store error.
pub fn list_events(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &ListEventsRequest,
) -> Result<ListEventsResponse, ApiError> {
    let zone: Tz = parse_zone(request.zone.as_deref())?;
    let range: TimeRange = parse_range(&request.start, &request.end, request.reference_day, zone)?;

    let events = persistence
        .list_events(caller.token(), &range, request.resource_id)
        .map_err(translate_persistence_error)?;

    Ok(ListEventsResponse {
        events: events.iter().map(EventResponse::from_event).collect(),
    })
}

/// Applies a sparse patch to an event.
///
/// Only fields present in the patch change. The merged result is
/// re-validated before the write: a patch that changes only `start` can
/// still invert the range against the stored `end`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on an empty patch or validation
/// failure, `ApiError::ResourceNotFound` if the event does not exist, or
/// a translated store error.
pub fn update_event(
    persistence: &mut Persistence,
    caller: &Caller,
    event_id: i64,
    request: UpdateEventRequest,
) -> Result<EventResponse, ApiError> {
    if request.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("patch"),
            message: String::from("Empty patch: at least one field must be present"),
        });
    }
    let zone: Tz = parse_zone(request.zone.as_deref())?;
    let start: Option<DateTime<Utc>> = request
        .start
        .as_deref()
        .map(|v| resolve_instant(v, request.reference_day, zone, "start"))
        .transpose()?;
    let end: Option<DateTime<Utc>> = request
        .end
        .as_deref()
        .map(|v| resolve_instant(v, request.reference_day, zone, "end"))
        .transpose()?;
    let color: Option<HexColor> = parse_color(request.color.as_deref())?;

    let patch = EventPatch {
        title: request.title,
        description: request.description,
        start,
        end,
        resource_id: request.resource_id,
        color,
    };

    let existing = persistence
        .get_event(caller.token(), event_id)
        .map_err(translate_persistence_error)?;
    if let Some(new_resource) = patch.resource_id {
        require_resource(persistence, caller, new_resource)?;
    }
    validate_event_draft(&patch.apply_to(&existing)).map_err(translate_domain_error)?;

    let updated = persistence
        .update_event(caller.token(), event_id, &patch)
        .map_err(translate_persistence_error)?;

    debug!(event_id, "Updated event");
    Ok(EventResponse::from_event(&updated))
}

/// Deletes an event and returns its final snapshot for caller-side
/// reconciliation.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event does not exist, or
/// a translated store error.
pub fn delete_event(
    persistence: &mut Persistence,
    caller: &Caller,
    event_id: i64,
) -> Result<EventResponse, ApiError> {
    let snapshot = persistence
        .delete_event(caller.token(), event_id)
        .map_err(translate_persistence_error)?;

    info!(event_id, "Deleted event");
    Ok(EventResponse::from_event(&snapshot))
}

/// Moves an event to a new slot and/or resource, preserving its duration
/// exactly.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event does not exist,
/// `ApiError::InvalidInput` on an unparseable start or unknown resource,
/// or a translated store error.
pub fn move_event(
    persistence: &mut Persistence,
    caller: &Caller,
    event_id: i64,
    request: MoveEventRequest,
) -> Result<EventResponse, ApiError> {
    let existing = persistence
        .get_event(caller.token(), event_id)
        .map_err(translate_persistence_error)?;

    let zone: Tz = parse_zone(request.zone.as_deref())?;
    let new_start: DateTime<Utc> =
        resolve_instant(&request.start, request.reference_day, zone, "start")?;

    let plan = plan_move(event_id, &existing, new_start, request.resource_id);
    if let Some(new_resource) = request.resource_id {
        require_resource(persistence, caller, new_resource)?;
    }

    let patch = EventPatch {
        start: Some(plan.window.start()),
        end: Some(plan.window.end()),
        resource_id: Some(plan.resource_id),
        ..EventPatch::default()
    };
    let moved = persistence
        .update_event(caller.token(), event_id, &patch)
        .map_err(translate_persistence_error)?;

    info!(
        event_id,
        resource_id = plan.resource_id,
        "Moved event preserving duration"
    );
    Ok(EventResponse::from_event(&moved))
}

// ============================================================================
// Reports
// ============================================================================

/// Builds the per-resource workload report for a range, busiest first.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on an unparseable or inverted range,
/// or a translated store error.
pub fn workload_report(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &WorkloadReportRequest,
) -> Result<WorkloadReportResponse, ApiError> {
    let range: TimeRange = parse_range(&request.start, &request.end, None, chrono_tz::UTC)?;

    let events = persistence
        .list_events(caller.token(), &range, None)
        .map_err(translate_persistence_error)?;
    let summaries = summarize_workload(&events);

    let names: HashMap<i64, String> = persistence
        .list_resources(caller.token())
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter_map(|r| r.resource_id.map(|id| (id, r.name)))
        .collect();

    Ok(WorkloadReportResponse {
        rows: summaries
            .iter()
            .map(|s| WorkloadRowResponse::from_summary(s, names.get(&s.resource_id).cloned()))
            .collect(),
    })
}

/// Builds the per-day heatmap report for a range.
///
/// The zone is an explicit, required parameter: it decides which
/// calendar day each event belongs to.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on an unparseable range or unknown
/// zone, or a translated store error.
pub fn heatmap_report(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &HeatmapReportRequest,
) -> Result<HeatmapReportResponse, ApiError> {
    let zone: Tz = parse_required_zone(&request.zone)?;
    let range: TimeRange = parse_range(&request.start, &request.end, None, chrono_tz::UTC)?;

    let events = persistence
        .list_events(caller.token(), &range, None)
        .map_err(translate_persistence_error)?;
    let buckets = build_heatmap(&events, zone, request.cap.unwrap_or(DEFAULT_INTERVAL_CAP));

    Ok(HeatmapReportResponse {
        zone: request.zone.clone(),
        days: buckets.iter().map(HeatmapDayResponse::from_bucket).collect(),
    })
}
