// Copyright (C) 2026 Campus Transit Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the Campus Transit dispatch system.
//!
//! Thin axum shell over the API boundary crate: every route locks the
//! shared persistence adapter, calls one handler, and maps the
//! `ApiError` taxonomy onto HTTP status codes. The dispatch notifier is
//! a logging gateway; a production deployment would swap in a push
//! service behind the same trait.

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
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use campus_transit::{DispatchNotifier, NotifyError};
use campus_transit_api::{
    ApiError, AssignDriverRequest, BookingListResponse, BookingResponse, BookingView,
    CampusListResponse, CampusResponse, CreateBookingRequest, CreateCampusRequest,
    CreateVehicleRequest, EmergencyStopRequest, UpdateLocationRequest, UpdateStatusRequest,
    VehicleListResponse, VehicleResponse, VerifyOtpRequest,
};
use campus_transit_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::info;

/// Campus Transit Server - HTTP server for the campus dispatch system
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

/// Dispatch notifier gateway that logs instead of delivering.
///
/// Delivery mechanics live outside this service; the log line carries
/// everything a real gateway would need.
struct LoggingNotifier;

impl DispatchNotifier for LoggingNotifier {
    fn notify_immediate(&self, booking_id: i64) -> Result<(), NotifyError> {
        info!(booking_id, "notifier gateway: alerting available drivers now");
        Ok(())
    }

    fn notify_scheduled(
        &self,
        booking_id: i64,
        requester_id: i64,
        pickup_at: OffsetDateTime,
    ) -> Result<(), NotifyError> {
        info!(
            booking_id,
            requester_id,
            %pickup_at,
            "notifier gateway: scheduling driver alert at pickup"
        );
        Ok(())
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The record store behind a Mutex for safe concurrent access.
    store: Arc<Mutex<Persistence>>,
}

/// Error response body.
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
            ApiError::InvalidInput { .. } | ApiError::InvalidPasscode { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NoVehicleAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Root health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// The service name.
    service: String,
    /// Liveness indicator.
    status: String,
    /// Current server time (RFC 3339).
    timestamp: String,
}

/// Handler for GET `/`.
async fn handle_health() -> Json<HealthResponse> {
    let timestamp: String = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(HealthResponse {
        service: String::from("Campus Transit API"),
        status: String::from("OK"),
        timestamp,
    })
}

/// Handler for POST `/booking`.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = campus_transit_api::create_booking(
        &mut store,
        &LoggingNotifier,
        req,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/booking/assign-vehicle/{booking_id}`.
async fn handle_assign_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = campus_transit_api::assign_vehicle(&mut store, booking_id)?;
    Ok(Json(response))
}

/// Handler for GET `/booking/{booking_id}`.
async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingView>, HttpError> {
    let mut store = app_state.store.lock().await;
    let view: BookingView = campus_transit_api::booking_by_id(&mut store, booking_id)?;
    Ok(Json(view))
}

/// Handler for GET `/booking/all-bookings/{requester_id}`.
async fn handle_all_bookings(
    AxumState(app_state): AxumState<AppState>,
    Path(requester_id): Path<i64>,
) -> Result<Json<BookingListResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingListResponse =
        campus_transit_api::bookings_for_requester(&mut store, requester_id)?;
    Ok(Json(response))
}

/// Handler for GET `/booking/past/{requester_id}`.
async fn handle_past_bookings(
    AxumState(app_state): AxumState<AppState>,
    Path(requester_id): Path<i64>,
) -> Result<Json<BookingListResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingListResponse =
        campus_transit_api::past_bookings(&mut store, requester_id)?;
    Ok(Json(response))
}

/// Handler for GET `/booking/upcoming/{requester_id}`.
async fn handle_upcoming_bookings(
    AxumState(app_state): AxumState<AppState>,
    Path(requester_id): Path<i64>,
) -> Result<Json<BookingListResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingListResponse =
        campus_transit_api::upcoming_bookings(&mut store, requester_id, OffsetDateTime::now_utc())?;
    Ok(Json(response))
}

/// Handler for POST `/booking/verify-otp/{booking_id}`.
async fn handle_verify_otp(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = campus_transit_api::verify_otp(&mut store, booking_id, req)?;
    Ok(Json(response))
}

/// Handler for POST `/booking/update-status/{booking_id}`.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = campus_transit_api::update_status(&mut store, booking_id, req)?;
    Ok(Json(response))
}

/// Handler for POST `/booking/cancel/{booking_id}`.
async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = campus_transit_api::cancel_booking(&mut store, booking_id)?;
    Ok(Json(response))
}

/// Handler for POST `/booking/emergency-stop/{booking_id}`.
async fn handle_emergency_stop(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(req): Json<EmergencyStopRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse =
        campus_transit_api::emergency_stop(&mut store, booking_id, req)?;
    Ok(Json(response))
}

/// Handler for POST `/booking/complete/{booking_id}`.
async fn handle_complete_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = campus_transit_api::complete_booking(&mut store, booking_id)?;
    Ok(Json(response))
}

/// Handler for POST `/vehicle/create-vehicle`.
async fn handle_create_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateVehicleRequest>,
) -> Result<Json<VehicleResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: VehicleResponse = campus_transit_api::create_vehicle(&mut store, req)?;
    Ok(Json(response))
}

/// Handler for POST `/vehicle/assign-driver`.
async fn handle_assign_driver(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignDriverRequest>,
) -> Result<Json<VehicleResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: VehicleResponse = campus_transit_api::assign_driver(&mut store, req)?;
    Ok(Json(response))
}

/// Handler for GET `/vehicle`.
async fn handle_list_vehicles(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<VehicleListResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: VehicleListResponse = campus_transit_api::vehicles(&mut store)?;
    Ok(Json(response))
}

/// Handler for GET `/vehicle/{vehicle_id}`.
async fn handle_get_vehicle(
    AxumState(app_state): AxumState<AppState>,
    Path(vehicle_id): Path<i64>,
) -> Result<Json<VehicleResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: VehicleResponse = campus_transit_api::vehicle_by_id(&mut store, vehicle_id)?;
    Ok(Json(response))
}

/// Handler for GET `/vehicle/driver/{driver_id}`.
async fn handle_vehicle_for_driver(
    AxumState(app_state): AxumState<AppState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<VehicleResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: VehicleResponse =
        campus_transit_api::vehicle_for_driver(&mut store, driver_id)?;
    Ok(Json(response))
}

/// Handler for POST `/vehicle/location/update`.
async fn handle_update_location(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpdateLocationRequest>,
) -> Result<Json<VehicleResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: VehicleResponse =
        campus_transit_api::update_vehicle_location(&mut store, req)?;
    Ok(Json(response))
}

/// Handler for POST `/campus`.
async fn handle_create_campus(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCampusRequest>,
) -> Result<Json<CampusResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: CampusResponse = campus_transit_api::create_campus(&mut store, req)?;
    Ok(Json(response))
}

/// Handler for GET `/campus`.
async fn handle_list_campuses(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CampusListResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: CampusListResponse = campus_transit_api::campuses(&mut store)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_health))
        .route("/booking", post(handle_create_booking))
        .route("/booking/assign-vehicle/{booking_id}", post(handle_assign_vehicle))
        .route("/booking/all-bookings/{requester_id}", get(handle_all_bookings))
        .route("/booking/past/{requester_id}", get(handle_past_bookings))
        .route("/booking/upcoming/{requester_id}", get(handle_upcoming_bookings))
        .route("/booking/verify-otp/{booking_id}", post(handle_verify_otp))
        .route("/booking/update-status/{booking_id}", post(handle_update_status))
        .route("/booking/cancel/{booking_id}", post(handle_cancel_booking))
        .route("/booking/emergency-stop/{booking_id}", post(handle_emergency_stop))
        .route("/booking/complete/{booking_id}", post(handle_complete_booking))
        .route("/booking/{booking_id}", get(handle_get_booking))
        .route("/vehicle/create-vehicle", post(handle_create_vehicle))
        .route("/vehicle/assign-driver", post(handle_assign_driver))
        .route("/vehicle/location/update", post(handle_update_location))
        .route("/vehicle/driver/{driver_id}", get(handle_vehicle_for_driver))
        .route("/vehicle", get(handle_list_vehicles))
        .route("/vehicle/{vehicle_id}", get(handle_get_vehicle))
        .route("/campus", get(handle_list_campuses).post(handle_create_campus))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Campus Transit Server");

    let store: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode as HttpStatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let store: Persistence =
            Persistence::new_in_memory().expect("in-memory database initialized");
        build_router(AppState {
            store: Arc::new(Mutex::new(store)),
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let request = match body {
            Some(value) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .expect("request built"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request built"),
        };
        let response = app.clone().oneshot(request).await.expect("request sent");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body read");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    async fn seed_campus(app: &Router) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/campus",
            Some(json!({
                "name": "North Campus",
                "latitude": 12.85,
                "longitude": 77.66,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["campus"]["campus_id"].as_i64().expect("campus id")
    }

    async fn seed_vehicle(app: &Router) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/vehicle/create-vehicle",
            Some(json!({
                "vehicle_class": "Buggy",
                "identifier": "BUG-01",
                "capacity": { "passengers": 3, "weight": 3 },
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["vehicle"]["vehicle_id"].as_i64().expect("vehicle id")
    }

    fn booking_body(campus_id: i64) -> Value {
        json!({
            "requester_id": 7,
            "campus_id": campus_id,
            "origin": { "lat": 12.8501, "lng": 77.6631 },
            "origin_address": "Main Gate",
            "destination": { "lat": 12.8523, "lng": 77.6650 },
            "destination_address": "Library",
            "vehicle_class": "Buggy",
            "schedule": "2030-01-01T09:00:00Z",
            "manifest": {
                "kind": "passengers",
                "passengers": [
                    {
                        "name": "rider-0",
                        "phone": "555-0100",
                        "email": "rider-0@campus.example",
                        "organization": "Facilities"
                    }
                ]
            },
        })
    }

    async fn seed_booking(app: &Router, campus_id: i64) -> (i64, String) {
        let (status, body) = send(app, "POST", "/booking", Some(booking_body(campus_id))).await;
        assert_eq!(status, HttpStatusCode::OK);
        let booking_id = body["booking"]["booking_id"].as_i64().expect("booking id");
        let otp = body["booking"]["otp"].as_str().expect("otp").to_string();
        (booking_id, otp)
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "Campus Transit API");
    }

    #[tokio::test]
    async fn booking_lifecycle_over_http() {
        let app = test_app();
        let campus_id = seed_campus(&app).await;
        let vehicle_id = seed_vehicle(&app).await;
        let (booking_id, otp) = seed_booking(&app, campus_id).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/booking/assign-vehicle/{booking_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["booking"]["vehicle_id"].as_i64(), Some(vehicle_id));

        let (status, body) = send(
            &app,
            "POST",
            &format!("/booking/verify-otp/{booking_id}"),
            Some(json!({ "otp": otp })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["booking"]["status"], "verified");

        let (status, body) = send(
            &app,
            "POST",
            &format!("/booking/complete/{booking_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["booking"]["status"], "completed");

        // The completed trip shows up in history.
        let (status, body) = send(&app, "GET", "/booking/past/7", None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["bookings"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn missing_fields_map_to_bad_request() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/booking", Some(json!({}))).await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn unknown_booking_maps_to_not_found() {
        let app = test_app();

        let (status, _body) = send(&app, "GET", "/booking/999", None).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cancel_twice_maps_to_conflict() {
        let app = test_app();
        let campus_id = seed_campus(&app).await;
        let (booking_id, _otp) = seed_booking(&app, campus_id).await;

        let (status, _body) = send(
            &app,
            "POST",
            &format!("/booking/cancel/{booking_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/booking/cancel/{booking_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn empty_fleet_maps_to_service_unavailable() {
        let app = test_app();
        let campus_id = seed_campus(&app).await;
        let (booking_id, _otp) = seed_booking(&app, campus_id).await;

        let (status, _body) = send(
            &app,
            "POST",
            &format!("/booking/assign-vehicle/{booking_id}"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn vehicle_location_update_round_trips() {
        let app = test_app();
        seed_vehicle(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/vehicle/location/update",
            Some(json!({
                "identifier": "BUG-01",
                "lat": 12.8519,
                "lng": 77.6644,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["vehicle"]["location"]["lat"].as_f64(), Some(12.8519));

        let (status, _body) = send(
            &app,
            "POST",
            "/vehicle/location/update",
            Some(json!({
                "identifier": "BUG-99",
                "lat": 12.8519,
                "lng": 77.6644,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }
}
