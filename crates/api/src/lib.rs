// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod auth;
mod error;
mod handlers;
mod notify;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, Caller, authenticate_bearer};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_event, create_resource, delete_event, delete_resource, heatmap_report, list_events,
    list_resources, move_event, update_event, update_resource, workload_report,
};
pub use notify::{Notifier, NullNotifier, Severity, TracingNotifier};
pub use request_response::{
    CreateEventRequest, CreateResourceRequest, EventResponse, HeatmapDayResponse,
    HeatmapReportRequest, HeatmapReportResponse, IntervalResponse, ListEventsRequest,
    ListEventsResponse, ListResourcesResponse, MoveEventRequest, ResourceResponse,
    UpdateEventRequest, UpdateResourceRequest, WorkloadReportRequest, WorkloadReportResponse,
    WorkloadRowResponse,
};
