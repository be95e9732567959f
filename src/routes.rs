use std::time::Duration;

use axum::extract::{OriginalUri, Request, State};
use axum::http::{Method, Uri};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::errors::AppError;

/// Build the main application router
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let api_v1 = Router::new()
        .merge(crate::api::routes::ingress_routes::ingress_routes())
        .nest("/eks", crate::api::routes::eks_routes::eks_routes())
        .merge(crate::api::routes::workload_routes::workload_routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1)
        .method_not_allowed_fallback(handler_405)
        .fallback(handler_404)
        .with_state(state)
        .layer(middleware::from_fn_with_state(request_timeout, enforce_deadline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

// Handler for root
async fn root() -> &'static str {
    "Server is running!"
}

// Handler for health check
async fn health_check() -> &'static str {
    "OK"
}

async fn handler_404(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

async fn handler_405(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Abandon the request once `deadline` elapses; dropping the handler future cancels
/// any in-flight cluster or AWS call.
async fn enforce_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    tokio::time::timeout(deadline, next.run(request))
        .await
        .map_err(|_| AppError::Timeout(deadline))
}
