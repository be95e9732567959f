//! Workload restart routes

use axum::{routing::post, Router};

use crate::api::controller::workload::WorkloadController;
use crate::app_state::AppState;

pub fn workload_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restartDeployment",
            post(WorkloadController::restart_deployment),
        )
        .route("/restartPod", post(WorkloadController::restart_pod))
}
