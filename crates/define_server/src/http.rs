//! REST API over the game service.
//!
//! The JSON shapes here are the server's own; the engine prescribes no wire
//! format. The target word never appears in a response until the session
//! is complete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use define_engine::GuessError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::service::{GameService, GuessView, ServiceError, SessionView};

/// Request body for creating a game.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGameRequest {
    /// Target a specific word instead of the source's pick.
    pub word_id: Option<String>,
    /// Player name to attach to the session.
    pub username: Option<String>,
}

/// Request body for submitting a guess.
#[derive(Debug, Clone, Deserialize)]
pub struct GuessRequest {
    /// The guessed word.
    pub guess: String,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Service errors mapped onto HTTP statuses.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::SessionNotFound { .. } | ServiceError::UnknownWord { .. } => {
                StatusCode::NOT_FOUND
            }
            ServiceError::Game(GuessError::SessionAlreadyComplete) => StatusCode::CONFLICT,
            ServiceError::Game(GuessError::EmptyGuess) => StatusCode::BAD_REQUEST,
            ServiceError::Game(GuessError::InvalidWordData(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Store(_) | ServiceError::Words(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!(error = %self.0, "Request failed");
        } else {
            debug!(error = %self.0, status = %status, "Request rejected");
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router.
pub fn router(service: Arc<GameService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", post(create_game))
        .route("/api/games/{id}", get(get_game))
        .route("/api/games/{id}/guess", post(submit_guess))
        .with_state(service)
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Creates a new game session.
#[instrument(skip(service, req))]
async fn create_game(
    State(service): State<Arc<GameService>>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let view = service.create_session(req.word_id.as_deref(), req.username)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Returns the current state of a session.
#[instrument(skip(service))]
async fn get_game(
    State(service): State<Arc<GameService>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(service.session(&id)?))
}

/// Submits a guess against a session.
#[instrument(skip(service, req))]
async fn submit_guess(
    State(service): State<Arc<GameService>>,
    Path(id): Path<String>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<GuessView>, ApiError> {
    Ok(Json(service.process_guess(&id, &req.guess)?))
}
