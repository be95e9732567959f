use axum::extract::State;
use axum::Json;

use crate::api::dto::workload_dto::{
    RestartDeploymentReq, RestartDeploymentResponse, RestartPodReq, RestartPodResponse,
};
use crate::api::util::json::ValidatedJson;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct WorkloadController;

impl WorkloadController {
    pub async fn restart_deployment(
        State(state): State<AppState>,
        ValidatedJson(req): ValidatedJson<RestartDeploymentReq>,
    ) -> Result<Json<RestartDeploymentResponse>, AppError> {
        let restarted_at = state
            .workload_service
            .restart_deployment(&req.namespace, &req.deployment_name)
            .await?;

        Ok(Json(RestartDeploymentResponse {
            namespace: req.namespace,
            deployment_name: req.deployment_name,
            restarted_at,
        }))
    }

    pub async fn restart_pod(
        State(state): State<AppState>,
        ValidatedJson(req): ValidatedJson<RestartPodReq>,
    ) -> Result<Json<RestartPodResponse>, AppError> {
        let managed = state
            .workload_service
            .restart_pod(&req.namespace, &req.pod_name)
            .await?;

        Ok(Json(RestartPodResponse {
            namespace: req.namespace,
            pod_name: req.pod_name,
            managed,
        }))
    }
}
