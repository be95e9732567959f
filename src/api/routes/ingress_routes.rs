//! Live ingress routes (proxied directly to Kubernetes)

use axum::{routing::get, Router};

use crate::api::controller::ingress::IngressController;
use crate::app_state::AppState;

pub fn ingress_routes() -> Router<AppState> {
    Router::new().route("/ingresses", get(IngressController::list_ingresses))
}
