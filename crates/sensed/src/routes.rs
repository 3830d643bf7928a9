//! API routes for sensed
//!
//! Ticket routes go through the lifecycle against the configured store.
//! AI routes are stateless apart from the keyword rules.

use crate::server::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sense_shared::api::{
    CreateTicketRequest, ErrorResponse, HealthResponse, MessageResponse, SuggestionResponse,
    TextRequest, UpdateTicketResponse, BANNER, PATH_ANALYZE, PATH_HEALTH, PATH_ROOT, PATH_SUGGEST,
    PATH_TICKETS, UPDATE_MESSAGE,
};
use sense_shared::{
    lifecycle, CreatedTicket, PriorityEstimate, PriorityHeuristic, ResponseSuggester, SenseError,
    Ticket, TicketClassifier, TicketPatch, TicketStore,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Errors
// ============================================================================

/// Error returned by handlers, rendered as `{"error": ...}`
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub SenseError);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(SenseError::BadRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(SenseError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("  Request failed: {}", self.0);
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Run a store operation off the async runtime
async fn with_store<T, F>(state: &AppStateArc, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn TicketStore) -> sense_shared::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| ApiError(SenseError::Internal(format!("store task failed: {}", e))))?
        .map_err(ApiError::from)
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new()
        .route(PATH_ROOT, get(home))
        .route(PATH_HEALTH, get(health_check))
}

async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: BANNER.to_string(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

// ============================================================================
// Ticket Routes
// ============================================================================

pub fn ticket_routes() -> Router<AppStateArc> {
    Router::new()
        .route(PATH_TICKETS, get(list_tickets).post(create_ticket))
        .route("/api/tickets/:id", patch(update_ticket))
}

async fn list_tickets(State(state): State<AppStateArc>) -> Result<Json<Vec<Ticket>>, ApiError> {
    let tickets = with_store(&state, |store| lifecycle::list_ranked(store)).await?;
    Ok(Json(tickets))
}

async fn create_ticket(
    State(state): State<AppStateArc>,
    body: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> Result<Json<CreatedTicket>, ApiError> {
    let Json(req) = body?;
    let rules = state.rules;
    let text = req.text.unwrap_or_default();

    let created = with_store(&state, move |store| {
        lifecycle::ingest(
            store,
            &TicketClassifier::new(&rules),
            &text,
            req.source.as_deref(),
        )
    })
    .await?;

    Ok(Json(created))
}

async fn update_ticket(
    State(state): State<AppStateArc>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TicketPatch>, JsonRejection>,
) -> Result<Json<UpdateTicketResponse>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = body?;
    info!("  Updating ticket {} with {:?}", id, patch);

    let ticket = with_store(&state, move |store| lifecycle::update(store, id, &patch)).await?;

    Ok(Json(UpdateTicketResponse {
        message: UPDATE_MESSAGE.to_string(),
        ticket,
    }))
}

// ============================================================================
// AI Routes
// ============================================================================

pub fn ai_routes() -> Router<AppStateArc> {
    Router::new()
        .route(PATH_SUGGEST, post(suggest_response))
        .route(PATH_ANALYZE, post(analyze_priority))
}

async fn suggest_response(
    State(state): State<AppStateArc>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let Json(req) = body?;
    // Fresh source per request, never shared between calls.
    let mut rng = StdRng::from_entropy();
    let suggestion = ResponseSuggester::new(&state.rules).suggest(req.text(), &mut rng);

    Ok(Json(SuggestionResponse {
        suggestion: suggestion.to_string(),
    }))
}

async fn analyze_priority(
    State(state): State<AppStateArc>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<PriorityEstimate>, ApiError> {
    let Json(req) = body?;
    Ok(Json(PriorityHeuristic::new(&state.rules).estimate(req.text())))
}
