//! EKS node group and login routes

use axum::{routing::post, Router};

use crate::api::controller::eks::EksController;
use crate::app_state::AppState;

pub fn eks_routes() -> Router<AppState> {
    Router::new()
        .route("/nodegroups", post(EksController::list_node_groups))
        .route(
            "/multiacc-nodegroups",
            post(EksController::list_multi_account_node_groups),
        )
        .route("/login", post(EksController::login))
}
