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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use shift_board_api::{
    ApiError, CreateEventRequest, CreateResourceRequest, EventResponse, HeatmapReportRequest,
    HeatmapReportResponse, ListEventsRequest, ListEventsResponse, ListResourcesResponse,
    MoveEventRequest, Notifier, ResourceResponse, Severity, TracingNotifier, UpdateEventRequest,
    UpdateResourceRequest, WorkloadReportRequest, WorkloadReportResponse, create_event,
    create_resource, delete_event, delete_resource, heatmap_report, list_events, list_resources,
    move_event, update_event, update_resource, workload_report,
};
use shift_board_persistence::Persistence;

mod session;
use session::CallerToken;

/// Shift Board Server - HTTP server for the Shift Board scheduling system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence adapter sits behind an async `Mutex`: one mutation at
/// a time, matching the store's single-writer posture. The notifier is
/// the injected out-of-band error surface.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for resources and events.
    persistence: Arc<Mutex<Persistence>>,
    /// The out-of-band notification capability.
    notifier: Arc<dyn Notifier>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StoreFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Surfaces a failed operation through the notifier, then wraps it.
///
/// Store failures are errors the user must see; everything else is a
/// warning they caused themselves.
fn notify_failure(state: &AppState, err: ApiError) -> HttpError {
    let severity: Severity = match err {
        ApiError::StoreFailure { .. } => Severity::Error,
        _ => Severity::Warning,
    };
    state.notifier.notify(severity, &err.to_string());
    HttpError::from(err)
}

// ============================================================================
// Event handlers
// ============================================================================

/// Handler for GET `/events` endpoint.
async fn handle_list_events(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Query(query): Query<ListEventsRequest>,
) -> Result<Json<ListEventsResponse>, HttpError> {
    info!(start = %query.start, end = %query.end, "Handling list_events request");

    let mut persistence = state.persistence.lock().await;
    let response: ListEventsResponse = list_events(&mut persistence, &caller, &query)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events` endpoint.
async fn handle_create_event(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), HttpError> {
    info!(title = %req.title, "Handling create_event request");

    let mut persistence = state.persistence.lock().await;
    let response: EventResponse =
        create_event(&mut persistence, &caller, req).map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PATCH `/events/{event_id}` endpoint.
///
/// Sparse patch: only fields present in the body change.
async fn handle_update_event(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Path(event_id): Path<i64>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, HttpError> {
    info!(event_id, "Handling update_event request");

    let mut persistence = state.persistence.lock().await;
    let response: EventResponse = update_event(&mut persistence, &caller, event_id, req)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/events/{event_id}` endpoint.
///
/// Returns the deleted snapshot for caller-side reconciliation.
async fn handle_delete_event(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Path(event_id): Path<i64>,
) -> Result<Json<EventResponse>, HttpError> {
    info!(event_id, "Handling delete_event request");

    let mut persistence = state.persistence.lock().await;
    let response: EventResponse = delete_event(&mut persistence, &caller, event_id)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/move` endpoint.
///
/// Moves the event to a new slot and/or resource, preserving duration.
async fn handle_move_event(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Path(event_id): Path<i64>,
    Json(req): Json<MoveEventRequest>,
) -> Result<Json<EventResponse>, HttpError> {
    info!(event_id, start = %req.start, "Handling move_event request");

    let mut persistence = state.persistence.lock().await;
    let response: EventResponse = move_event(&mut persistence, &caller, event_id, req)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Resource handlers
// ============================================================================

/// Handler for GET `/resources` endpoint.
async fn handle_list_resources(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
) -> Result<Json<ListResourcesResponse>, HttpError> {
    info!("Handling list_resources request");

    let mut persistence = state.persistence.lock().await;
    let response: ListResourcesResponse =
        list_resources(&mut persistence, &caller).map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/resources` endpoint.
async fn handle_create_resource(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Json(req): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), HttpError> {
    info!(name = %req.name, "Handling create_resource request");

    let mut persistence = state.persistence.lock().await;
    let response: ResourceResponse =
        create_resource(&mut persistence, &caller, req).map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PATCH `/resources/{resource_id}` endpoint.
async fn handle_update_resource(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Path(resource_id): Path<i64>,
    Json(req): Json<UpdateResourceRequest>,
) -> Result<Json<ResourceResponse>, HttpError> {
    info!(resource_id, "Handling update_resource request");

    let mut persistence = state.persistence.lock().await;
    let response: ResourceResponse = update_resource(&mut persistence, &caller, resource_id, req)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/resources/{resource_id}` endpoint.
///
/// Deleting a resource cascades to its events.
async fn handle_delete_resource(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Path(resource_id): Path<i64>,
) -> Result<Json<ResourceResponse>, HttpError> {
    info!(resource_id, "Handling delete_resource request");

    let mut persistence = state.persistence.lock().await;
    let response: ResourceResponse = delete_resource(&mut persistence, &caller, resource_id)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Report handlers
// ============================================================================

/// Handler for GET `/reports/workload` endpoint.
async fn handle_workload_report(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Query(query): Query<WorkloadReportRequest>,
) -> Result<Json<WorkloadReportResponse>, HttpError> {
    info!(start = %query.start, end = %query.end, "Handling workload_report request");

    let mut persistence = state.persistence.lock().await;
    let response: WorkloadReportResponse = workload_report(&mut persistence, &caller, &query)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/reports/heatmap` endpoint.
///
/// The `zone` query parameter is required; it decides which calendar day
/// each event belongs to.
async fn handle_heatmap_report(
    AxumState(state): AxumState<AppState>,
    CallerToken(caller): CallerToken,
    Query(query): Query<HeatmapReportRequest>,
) -> Result<Json<HeatmapReportResponse>, HttpError> {
    info!(start = %query.start, end = %query.end, zone = %query.zone, "Handling heatmap_report request");

    let mut persistence = state.persistence.lock().await;
    let response: HeatmapReportResponse = heatmap_report(&mut persistence, &caller, &query)
        .map_err(|e| notify_failure(&state, e))?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", get(handle_list_events).post(handle_create_event))
        .route(
            "/events/{event_id}",
            axum::routing::patch(handle_update_event).delete(handle_delete_event),
        )
        .route("/events/{event_id}/move", post(handle_move_event))
        .route(
            "/resources",
            get(handle_list_resources).post(handle_create_resource),
        )
        .route(
            "/resources/{resource_id}",
            axum::routing::patch(handle_update_resource).delete(handle_delete_resource),
        )
        .route("/reports/workload", get(handle_workload_report))
        .route("/reports/heatmap", get(handle_heatmap_report))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shift Board Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier: Arc::new(TracingNotifier),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
