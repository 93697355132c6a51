//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::{Planner, SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search for itineraries between two airports.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let class = query.class.as_deref().unwrap_or("coach");

    // Anything wrong with the request itself, including its date, is the
    // caller's fault.
    let request = SearchRequest::parse(&query.from, &query.to, &query.date, class)
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    let planner = Planner::new(state.source.as_ref(), &state.config);
    let result = planner.search(&request).await?;

    let options = result
        .options
        .iter()
        .map(|o| OptionResult::from_option(o, request.seat_class))
        .collect();

    Ok(Json(SearchResponse {
        options,
        fetches: result.fetches,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
    BadGateway { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(message) => AppError::BadRequest { message },
            SearchError::Time(_) => AppError::Internal {
                message: e.to_string(),
            },
            SearchError::Fetch { .. } => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "bad request");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
