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

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use steel_track_api::{
    ApiError, AuthenticatedActor, CreateDriverRequest, CreateOrderRequest, CycleWindowResponse,
    DailyHistoryResponse, DeleteDriverResponse, DeleteOrderResponse, DeliveredOrderResponse,
    DriverMetricsResponse, DriverResponse, ListDeliveredOrdersResponse, ListDriverMetricsResponse,
    ListDriversResponse, ListOrdersResponse, OrderResponse, StatsResponse, UpdateDriverRequest,
    UpdateOrderRequest, all_driver_metrics, create_driver, create_order, current_cycle,
    daily_delivered_history, delete_driver, delete_order, driver_metrics, list_active_orders,
    list_delivered_orders, list_drivers, mark_order_delivered, parse_role, reactivate_order,
    stats, update_driver, update_order,
};
use steel_track_domain::Role;
use steel_track_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Steel Track Server - HTTP server for the steel delivery tracker
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
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The `SQLite`-backed store for orders and drivers.
    persistence: Arc<Mutex<Persistence>>,
}

/// A request body with optional actor attribution alongside the
/// operation payload.
///
/// The actor role normally arrives as the `x-actor-role` header;
/// mutation bodies may carry it instead. The header wins when both are
/// present.
#[derive(Debug, Clone, Deserialize)]
struct ActorEnvelope<T> {
    /// The actor ID performing this action.
    #[serde(default)]
    actor_id: Option<String>,
    /// The role of the actor.
    #[serde(default)]
    actor_role: Option<String>,
    /// The operation payload.
    #[serde(flatten)]
    request: T,
}

/// Error response body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true for error responses.
    error: bool,
    /// The error message.
    message: String,
}

/// An HTTP error with a status code and message.
#[derive(Debug)]
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
        match err {
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::StorageFailure { .. } => {
                error!(error = %err, "Storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Resolves the acting identity from the request.
///
/// The `x-actor-role` header takes precedence over a body-carried
/// role. An absent role yields an actor that is denied every action;
/// an unparseable role is a bad request.
fn resolve_actor(
    headers: HeaderMap,
    body_id: Option<String>,
    body_role: Option<String>,
) -> Result<AuthenticatedActor, HttpError> {
    let header_role: Option<String> = headers
        .get("x-actor-role")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let role: Option<Role> = match header_role.or(body_role) {
        Some(value) => Some(parse_role(&value).map_err(|err| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        })?),
        None => None,
    };
    let id: String = headers
        .get("x-actor-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or(body_id)
        .unwrap_or_else(|| String::from("anonymous"));
    Ok(AuthenticatedActor::new(id, role))
}

fn header_actor(headers: HeaderMap) -> Result<AuthenticatedActor, HttpError> {
    resolve_actor(headers, None, None)
}

/// Handler for GET `/orders`.
async fn handle_list_orders(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListOrdersResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListOrdersResponse = list_active_orders(&mut *persistence, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/orders`.
async fn handle_create_order(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(envelope): Json<ActorEnvelope<CreateOrderRequest>>,
) -> Result<Json<OrderResponse>, HttpError> {
    let actor: AuthenticatedActor =
        resolve_actor(headers, envelope.actor_id, envelope.actor_role)?;
    info!(
        delivery_number = %envelope.request.delivery_number,
        actor = %actor.id,
        "Handling create_order request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = create_order(
        &mut *persistence,
        envelope.request,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for PATCH `/orders/{id}`.
async fn handle_update_order(
    AxumState(app_state): AxumState<AppState>,
    Path(delivery_number): Path<String>,
    headers: HeaderMap,
    Json(envelope): Json<ActorEnvelope<UpdateOrderRequest>>,
) -> Result<Json<OrderResponse>, HttpError> {
    let actor: AuthenticatedActor =
        resolve_actor(headers, envelope.actor_id, envelope.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = update_order(
        &mut *persistence,
        &delivery_number,
        envelope.request,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for DELETE `/orders/{id}`.
async fn handle_delete_order(
    AxumState(app_state): AxumState<AppState>,
    Path(delivery_number): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteOrderResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteOrderResponse = delete_order(&mut *persistence, &delivery_number, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/orders/{id}/deliver`.
async fn handle_deliver_order(
    AxumState(app_state): AxumState<AppState>,
    Path(delivery_number): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeliveredOrderResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: DeliveredOrderResponse = mark_order_delivered(
        &mut *persistence,
        &delivery_number,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/orders/{id}/reactivate`.
async fn handle_reactivate_order(
    AxumState(app_state): AxumState<AppState>,
    Path(delivery_number): Path<String>,
    headers: HeaderMap,
) -> Result<Json<OrderResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = reactivate_order(
        &mut *persistence,
        &delivery_number,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/history`.
async fn handle_list_history(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListDeliveredOrdersResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListDeliveredOrdersResponse =
        list_delivered_orders(&mut *persistence, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/history/daily`.
async fn handle_daily_history(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<DailyHistoryResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: DailyHistoryResponse = daily_delivered_history(
        &mut *persistence,
        &actor,
        OffsetDateTime::now_utc().date(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/drivers`.
async fn handle_list_drivers(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListDriversResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListDriversResponse = list_drivers(&mut *persistence, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/drivers`.
async fn handle_create_driver(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(envelope): Json<ActorEnvelope<CreateDriverRequest>>,
) -> Result<Json<DriverResponse>, HttpError> {
    let actor: AuthenticatedActor =
        resolve_actor(headers, envelope.actor_id, envelope.actor_role)?;
    info!(name = %envelope.request.name, actor = %actor.id, "Handling create_driver request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DriverResponse = create_driver(
        &mut *persistence,
        envelope.request,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for PATCH `/drivers/{id}`.
async fn handle_update_driver(
    AxumState(app_state): AxumState<AppState>,
    Path(driver_id): Path<String>,
    headers: HeaderMap,
    Json(envelope): Json<ActorEnvelope<UpdateDriverRequest>>,
) -> Result<Json<DriverResponse>, HttpError> {
    let actor: AuthenticatedActor =
        resolve_actor(headers, envelope.actor_id, envelope.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DriverResponse = update_driver(
        &mut *persistence,
        &driver_id,
        envelope.request,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for DELETE `/drivers/{id}`.
async fn handle_delete_driver(
    AxumState(app_state): AxumState<AppState>,
    Path(driver_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteDriverResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteDriverResponse = delete_driver(&mut *persistence, &driver_id, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/drivers/{id}/metrics`.
async fn handle_driver_metrics(
    AxumState(app_state): AxumState<AppState>,
    Path(driver_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DriverMetricsResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: DriverMetricsResponse = driver_metrics(
        &mut *persistence,
        &driver_id,
        &actor,
        OffsetDateTime::now_utc().date(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/metrics`.
async fn handle_all_driver_metrics(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListDriverMetricsResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListDriverMetricsResponse = all_driver_metrics(
        &mut *persistence,
        &actor,
        OffsetDateTime::now_utc().date(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/cycle`.
#[allow(clippy::unused_async)] // Router handlers must be async
async fn handle_current_cycle(
    headers: HeaderMap,
) -> Result<Json<CycleWindowResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let response: CycleWindowResponse =
        current_cycle(&actor, OffsetDateTime::now_utc().date())?;
    Ok(Json(response))
}

/// Handler for GET `/stats`.
async fn handle_stats(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, HttpError> {
    let actor: AuthenticatedActor = header_actor(headers)?;
    let mut persistence = app_state.persistence.lock().await;
    let response: StatsResponse = stats(&mut *persistence, &actor)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/orders", get(handle_list_orders))
        .route("/orders", post(handle_create_order))
        .route("/orders/{id}", patch(handle_update_order))
        .route("/orders/{id}", delete(handle_delete_order))
        .route("/orders/{id}/deliver", post(handle_deliver_order))
        .route("/orders/{id}/reactivate", post(handle_reactivate_order))
        .route("/history", get(handle_list_history))
        .route("/history/daily", get(handle_daily_history))
        .route("/drivers", get(handle_list_drivers))
        .route("/drivers", post(handle_create_driver))
        .route("/drivers/{id}", patch(handle_update_driver))
        .route("/drivers/{id}", delete(handle_delete_driver))
        .route("/drivers/{id}/metrics", get(handle_driver_metrics))
        .route("/metrics", get(handle_all_driver_metrics))
        .route("/cycle", get(handle_current_cycle))
        .route("/stats", get(handle_stats))
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

    info!("Initializing Steel Track Server");

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
