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

mod sweep;

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
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

use holdfast_api::{
    ApiError, CanBookRequest, CanBookResponse, CancelTimeSlotRequest, CancelTimeSlotResponse,
    ConfirmBookingRequest, ConfirmBookingResponse, CreateEventRequest, CreateEventResponse,
    CreateHoldRequest, CreateHoldResponse, CreateTimeSlotRequest, CreateTimeSlotResponse,
    ListAvailabilityRequest, ListAvailabilityResponse, ReleaseHoldResponse, VerifyHoldResponse,
};
use holdfast_persistence::SqlitePersistence;

/// Deadline for read operations.
const READ_DEADLINE: Duration = Duration::from_secs(5);

/// Deadline for the transactional writes.
const WRITE_DEADLINE: Duration = Duration::from_secs(10);

/// Holdfast Server - HTTP server for the slot reservation core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Default hold duration in minutes when a request does not specify one
    #[arg(long, default_value_t = 10)]
    hold_duration_min: i64,

    /// Cadence of the background expiry sweep in seconds
    #[arg(long, default_value_t = 30)]
    sweep_interval_secs: u64,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the configured default hold duration.
#[derive(Clone)]
struct AppState {
    /// The persistence layer running the reservation protocols.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Default hold duration (minutes) applied when a request omits one.
    default_hold_minutes: i64,
}

/// Query parameters for the availability listing.
#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    /// The caller's opaque session, if any.
    session_id: Option<String>,
}

/// Query parameters for the booking pre-flight.
#[derive(Debug, Deserialize)]
struct CanBookQuery {
    /// Seats the caller wants. Defaults to 1.
    quantity: Option<i32>,
}

/// Request body for hold verification and release.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct HoldSessionBody {
    /// The caller's opaque session (required, non-empty).
    session_id: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// The stable error kind callers branch on.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The stable error kind.
    kind: String,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidArgument { .. }
            | ApiError::InvalidQuantity { .. }
            | ApiError::InvalidAttendee { .. } => StatusCode::BAD_REQUEST,
            ApiError::EventNotFound { .. } | ApiError::SlotNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::SlotUnavailable { .. }
            | ApiError::HoldInvalid { .. }
            | ApiError::CapacityExceeded { .. } => StatusCode::CONFLICT,
            ApiError::TransientStorage { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Runs an operation against the persistence layer under a deadline.
///
/// The deadline covers waiting for the state lock plus the operation
/// itself. A deadline that fires after the commit point cannot undo the
/// committed effect; the caller may observe success on a follow-up read.
async fn with_deadline<T>(
    deadline: Duration,
    state: &AppState,
    op: impl FnOnce(&mut SqlitePersistence) -> Result<T, ApiError> + Send,
) -> Result<T, HttpError> {
    let outcome = tokio::time::timeout(deadline, async {
        let mut persistence = state.persistence.lock().await;
        op(&mut persistence)
    })
    .await;

    match outcome {
        Ok(result) => result.map_err(HttpError::from),
        Err(_) => Err(HttpError::from(ApiError::TransientStorage {
            message: format!("operation exceeded the {}s deadline", deadline.as_secs()),
        })),
    }
}

/// Handler for GET `/api/events/{event_id}/availability`.
async fn handle_list_availability(
    AxumState(state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ListAvailabilityResponse>, HttpError> {
    let request: ListAvailabilityRequest = ListAvailabilityRequest {
        event_id,
        session_id: query.session_id,
    };
    let response: ListAvailabilityResponse = with_deadline(READ_DEADLINE, &state, |p| {
        holdfast_api::list_availability(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for GET `/api/events/{event_id}/can_book`.
async fn handle_can_book(
    AxumState(state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<CanBookQuery>,
) -> Result<Json<CanBookResponse>, HttpError> {
    let request: CanBookRequest = CanBookRequest {
        event_id,
        quantity: query.quantity,
    };
    let response: CanBookResponse =
        with_deadline(READ_DEADLINE, &state, |p| holdfast_api::can_book(p, &request)).await?;
    Ok(Json(response))
}

/// Handler for POST `/api/holds`.
async fn handle_create_hold(
    AxumState(state): AxumState<AppState>,
    Json(mut request): Json<CreateHoldRequest>,
) -> Result<Json<CreateHoldResponse>, HttpError> {
    // Absent durations take the server's configured default; the clamp to
    // the permitted range happens in the domain layer either way.
    if request.duration_min.is_none() {
        request.duration_min = Some(state.default_hold_minutes);
    }

    let response: CreateHoldResponse = with_deadline(WRITE_DEADLINE, &state, |p| {
        holdfast_api::create_hold(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/api/holds/{hold_id}/verify`.
async fn handle_verify_hold(
    AxumState(state): AxumState<AppState>,
    Path(hold_id): Path<i64>,
    Json(body): Json<HoldSessionBody>,
) -> Result<Json<VerifyHoldResponse>, HttpError> {
    let request = holdfast_api::VerifyHoldRequest {
        hold_id,
        session_id: body.session_id,
    };
    let response: VerifyHoldResponse = with_deadline(READ_DEADLINE, &state, |p| {
        holdfast_api::verify_hold(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/api/holds/{hold_id}/release`.
async fn handle_release_hold(
    AxumState(state): AxumState<AppState>,
    Path(hold_id): Path<i64>,
    Json(body): Json<HoldSessionBody>,
) -> Result<Json<ReleaseHoldResponse>, HttpError> {
    let request = holdfast_api::ReleaseHoldRequest {
        hold_id,
        session_id: body.session_id,
    };
    let response: ReleaseHoldResponse = with_deadline(READ_DEADLINE, &state, |p| {
        holdfast_api::release_hold(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/api/bookings`.
async fn handle_confirm_booking(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<ConfirmBookingRequest>,
) -> Result<Json<ConfirmBookingResponse>, HttpError> {
    let response: ConfirmBookingResponse = with_deadline(WRITE_DEADLINE, &state, |p| {
        holdfast_api::confirm_booking(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/api/events`.
async fn handle_create_event(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    let response: CreateEventResponse = with_deadline(WRITE_DEADLINE, &state, |p| {
        holdfast_api::create_event(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/api/time_slots`.
async fn handle_create_time_slot(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateTimeSlotRequest>,
) -> Result<Json<CreateTimeSlotResponse>, HttpError> {
    let response: CreateTimeSlotResponse = with_deadline(WRITE_DEADLINE, &state, |p| {
        holdfast_api::create_time_slot(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/api/time_slots/{slot_id}/cancel`.
async fn handle_cancel_time_slot(
    AxumState(state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
) -> Result<Json<CancelTimeSlotResponse>, HttpError> {
    let request: CancelTimeSlotRequest = CancelTimeSlotRequest { slot_id };
    let response: CancelTimeSlotResponse = with_deadline(WRITE_DEADLINE, &state, |p| {
        holdfast_api::cancel_time_slot(p, &request)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for GET `/health`.
async fn handle_health() -> &'static str {
    "ok"
}

/// Builds the application router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/api/events/{event_id}/availability",
            get(handle_list_availability),
        )
        .route("/api/events/{event_id}/can_book", get(handle_can_book))
        .route("/api/holds", post(handle_create_hold))
        .route("/api/holds/{hold_id}/verify", post(handle_verify_hold))
        .route("/api/holds/{hold_id}/release", post(handle_release_hold))
        .route("/api/bookings", post(handle_confirm_booking))
        .route("/api/events", post(handle_create_event))
        .route("/api/time_slots", post(handle_create_time_slot))
        .route(
            "/api/time_slots/{slot_id}/cancel",
            post(handle_cancel_time_slot),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let persistence: SqlitePersistence = match &args.database {
        Some(path) => {
            info!("Opening database file: {}", path);
            SqlitePersistence::new_with_file(path)?
        }
        None => {
            info!("No database file provided; using in-memory database");
            SqlitePersistence::new_in_memory()?
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        default_hold_minutes: args.hold_duration_min,
    };

    sweep::spawn_expiry_sweep(
        Arc::clone(&app_state.persistence),
        Duration::from_secs(args.sweep_interval_secs),
    );

    let app: Router = build_router(app_state);

    let addr: String = format!("0.0.0.0:{}", args.port);
    info!("Holdfast server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await.map_err(|e| {
        error!(error = %e, "Server terminated");
        e
    })?;

    Ok(())
}
