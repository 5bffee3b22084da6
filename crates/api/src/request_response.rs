// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Requests accept both the canonical snake_case spelling and the
//! camelCase spelling of each aliased field. The aliasing is resolved
//! here, at deserialization, and never leaks past this boundary: the
//! domain model has exactly one name for each field.
//!
//! Time fields are strings in either accepted form (RFC 3339, or a
//! wall-clock label resolved against `reference_day` in `zone`).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shift_board_domain::{
    Event, HEAT_PALETTE, HeatmapBucket, Resource, TimeRange, WorkloadSummary,
    readable_text_color,
};

/// Encodes an instant the way every response renders it.
#[must_use]
pub(crate) fn encode_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ============================================================================
// Resource requests/responses
// ============================================================================

/// Request to create a resource.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateResourceRequest {
    /// The display name.
    pub name: String,
    /// An optional role label.
    pub role: Option<String>,
    /// An optional display color (`#rrggbb`).
    pub color: Option<String>,
}

/// Sparse request to update a resource.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateResourceRequest {
    /// Replacement name, if present.
    pub name: Option<String>,
    /// Replacement role, if present.
    pub role: Option<String>,
    /// Replacement color, if present.
    pub color: Option<String>,
}

impl UpdateResourceRequest {
    /// Checks whether the patch modifies nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.color.is_none()
    }
}

/// A resource as responses render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse {
    /// The canonical resource id.
    pub resource_id: i64,
    /// The display name.
    pub name: String,
    /// The optional role label.
    pub role: Option<String>,
    /// The optional display color.
    pub color: Option<String>,
}

impl ResourceResponse {
    /// Builds the response form of a stored resource.
    #[must_use]
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            resource_id: resource.resource_id.unwrap_or_default(),
            name: resource.name.clone(),
            role: resource.role.clone(),
            color: resource.color.as_ref().map(|c| c.as_str().to_string()),
        }
    }
}

/// Response listing an owner's resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResourcesResponse {
    /// The resources, ordered by name then id.
    pub resources: Vec<ResourceResponse>,
}

// ============================================================================
// Event requests/responses
// ============================================================================

/// Request to create an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateEventRequest {
    /// The event title.
    pub title: String,
    /// An optional description.
    pub description: Option<String>,
    /// The start time, in either accepted form.
    #[serde(alias = "startAt", alias = "start_at")]
    pub start: String,
    /// The end time, in either accepted form.
    #[serde(alias = "endAt", alias = "end_at")]
    pub end: String,
    /// The resource the event is assigned to.
    #[serde(alias = "resourceId")]
    pub resource_id: Option<i64>,
    /// An optional display color (`#rrggbb`).
    pub color: Option<String>,
    /// The day wall-clock time labels resolve against.
    #[serde(alias = "referenceDay")]
    pub reference_day: Option<NaiveDate>,
    /// The zone wall-clock time labels are interpreted in (IANA name).
    pub zone: Option<String>,
}

/// Sparse request to update an event.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateEventRequest {
    /// Replacement title, if present.
    pub title: Option<String>,
    /// Replacement description, if present.
    pub description: Option<String>,
    /// Replacement start time, if present.
    #[serde(alias = "startAt", alias = "start_at")]
    pub start: Option<String>,
    /// Replacement end time, if present.
    #[serde(alias = "endAt", alias = "end_at")]
    pub end: Option<String>,
    /// Replacement resource assignment, if present.
    #[serde(alias = "resourceId")]
    pub resource_id: Option<i64>,
    /// Replacement color, if present.
    pub color: Option<String>,
    /// The day wall-clock time labels resolve against.
    #[serde(alias = "referenceDay")]
    pub reference_day: Option<NaiveDate>,
    /// The zone wall-clock time labels are interpreted in (IANA name).
    pub zone: Option<String>,
}

impl UpdateEventRequest {
    /// Checks whether the patch modifies nothing.
    ///
    /// `reference_day` and `zone` only parameterize time parsing; they do
    /// not count as modifications.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.resource_id.is_none()
            && self.color.is_none()
    }
}

/// Request to move an event to a new slot and/or resource.
///
/// The event's duration is preserved exactly; only the anchor and,
/// optionally, the assignment change.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveEventRequest {
    /// The new start time, in either accepted form.
    #[serde(alias = "startAt", alias = "start_at")]
    pub start: String,
    /// A new resource assignment, or absent to keep the current one.
    #[serde(alias = "resourceId")]
    pub resource_id: Option<i64>,
    /// The day wall-clock time labels resolve against.
    #[serde(alias = "referenceDay")]
    pub reference_day: Option<NaiveDate>,
    /// The zone wall-clock time labels are interpreted in (IANA name).
    pub zone: Option<String>,
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListEventsRequest {
    /// The range start, in either accepted form.
    pub start: String,
    /// The range end, in either accepted form.
    pub end: String,
    /// Optional narrowing to one resource.
    #[serde(alias = "resourceId")]
    pub resource_id: Option<i64>,
    /// The day wall-clock time labels resolve against.
    #[serde(alias = "referenceDay")]
    pub reference_day: Option<NaiveDate>,
    /// The zone wall-clock time labels are interpreted in (IANA name).
    pub zone: Option<String>,
}

/// An event as responses render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    /// The canonical event id.
    pub event_id: i64,
    /// The event title.
    pub title: String,
    /// The optional description.
    pub description: Option<String>,
    /// The start instant (RFC 3339 UTC).
    pub start: String,
    /// The end instant (RFC 3339 UTC).
    pub end: String,
    /// The event's duration in whole minutes.
    pub duration_minutes: i64,
    /// The resource the event is assigned to.
    pub resource_id: i64,
    /// The optional display color.
    pub color: Option<String>,
    /// The readable text color for the display color, when one is set.
    pub text_color: Option<String>,
}

impl EventResponse {
    /// Builds the response form of a stored event.
    #[must_use]
    pub fn from_event(event: &Event) -> Self {
        Self {
            event_id: event.event_id.unwrap_or_default(),
            title: event.title.clone(),
            description: event.description.clone(),
            start: encode_instant(event.window.start()),
            end: encode_instant(event.window.end()),
            duration_minutes: event.duration_minutes(),
            resource_id: event.resource_id,
            color: event.color.as_ref().map(|c| c.as_str().to_string()),
            text_color: event
                .color
                .as_ref()
                .map(|c| readable_text_color(c).as_hex().to_string()),
        }
    }
}

/// Response listing events in a range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsResponse {
    /// The events, ordered by start ascending then id.
    pub events: Vec<EventResponse>,
}

// ============================================================================
// Report requests/responses
// ============================================================================

/// Query parameters for the workload report.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkloadReportRequest {
    /// The range start (RFC 3339).
    pub start: String,
    /// The range end (RFC 3339).
    pub end: String,
}

/// One row of the workload report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadRowResponse {
    /// The resource the row describes.
    pub resource_id: i64,
    /// The resource's display name, when it still exists.
    pub resource_name: Option<String>,
    /// Number of events in the range.
    pub event_count: usize,
    /// Sum of event durations in whole minutes.
    pub total_minutes: i64,
    /// `total_minutes` expressed in hours.
    pub total_hours: f64,
    /// Average event length in hours; zero when there are no events.
    pub avg_hours_per_event: f64,
}

impl WorkloadRowResponse {
    /// Builds a report row from a summary and an optional display name.
    #[must_use]
    pub fn from_summary(summary: &WorkloadSummary, resource_name: Option<String>) -> Self {
        Self {
            resource_id: summary.resource_id,
            resource_name,
            event_count: summary.event_count,
            total_minutes: summary.total_minutes,
            total_hours: summary.total_hours,
            avg_hours_per_event: summary.avg_hours_per_event,
        }
    }
}

/// Response for the workload report, busiest resource first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadReportResponse {
    /// The report rows.
    pub rows: Vec<WorkloadRowResponse>,
}

/// Query parameters for the heatmap report.
///
/// The zone is required: "calendar day" is meaningless without one, and
/// defaulting it silently is how server and client aggregation drift
/// apart near midnight.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeatmapReportRequest {
    /// The range start (RFC 3339).
    pub start: String,
    /// The range end (RFC 3339).
    pub end: String,
    /// The zone days are computed in (IANA name).
    pub zone: String,
    /// Maximum merged busy intervals to keep per day (default 3).
    pub cap: Option<usize>,
}

/// A busy interval as responses render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalResponse {
    /// The interval start (RFC 3339 UTC).
    pub start: String,
    /// The interval end (RFC 3339 UTC).
    pub end: String,
}

impl IntervalResponse {
    /// Builds the response form of a merged interval.
    #[must_use]
    pub fn from_range(range: &TimeRange) -> Self {
        Self {
            start: encode_instant(range.start()),
            end: encode_instant(range.end()),
        }
    }
}

/// One day of the heatmap report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapDayResponse {
    /// The calendar day, in the requested zone.
    pub day: NaiveDate,
    /// Number of events starting on this day.
    pub event_count: usize,
    /// Sum of event durations in whole minutes.
    pub total_minutes: i64,
    /// The earliest event start on this day (RFC 3339 UTC).
    pub earliest_start: String,
    /// The latest event end on this day (RFC 3339 UTC).
    pub latest_end: String,
    /// The merged busy intervals, capped for display.
    pub busy_intervals: Vec<IntervalResponse>,
    /// How many merged intervals the cap hid.
    pub hidden_interval_count: usize,
    /// The "+N" label for hidden intervals, when any were hidden.
    pub overflow_label: Option<String>,
    /// Index into the severity palette.
    pub heat_level: usize,
    /// The concrete palette color for `heat_level`.
    pub heat_color: String,
}

impl HeatmapDayResponse {
    /// Builds the response form of a heatmap bucket.
    #[must_use]
    pub fn from_bucket(bucket: &HeatmapBucket) -> Self {
        Self {
            day: bucket.day,
            event_count: bucket.event_count,
            total_minutes: bucket.total_minutes,
            earliest_start: encode_instant(bucket.earliest_start),
            latest_end: encode_instant(bucket.latest_end),
            busy_intervals: bucket
                .busy_intervals
                .iter()
                .map(IntervalResponse::from_range)
                .collect(),
            hidden_interval_count: bucket.hidden_interval_count,
            overflow_label: (bucket.hidden_interval_count > 0)
                .then(|| format!("+{}", bucket.hidden_interval_count)),
            heat_level: bucket.heat_level,
            heat_color: HEAT_PALETTE
                .get(bucket.heat_level)
                .copied()
                .unwrap_or(HEAT_PALETTE[0])
                .to_string(),
        }
    }
}

/// Response for the heatmap report, days ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapReportResponse {
    /// The zone the days were computed in.
    pub zone: String,
    /// The per-day buckets.
    pub days: Vec<HeatmapDayResponse>,
}
