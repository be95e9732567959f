use axum::extract::State;
use axum::Json;

use crate::api::dto::eks_dto::{LoginResponse, NodeGroupRequest, NodeGroupResponse};
use crate::api::util::json::ValidatedJson;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct EksController;

impl EksController {
    pub async fn list_node_groups(
        State(state): State<AppState>,
        ValidatedJson(req): ValidatedJson<NodeGroupRequest>,
    ) -> Result<Json<NodeGroupResponse>, AppError> {
        let node_groups = state
            .nodegroup_service
            .list_node_groups(&req.cluster_name, &req.region, None)
            .await?;

        Ok(Json(NodeGroupResponse {
            cluster_name: req.cluster_name,
            region: req.region,
            node_groups,
        }))
    }

    /// Same as `list_node_groups`, but through a named profile of the shared credentials file.
    pub async fn list_multi_account_node_groups(
        State(state): State<AppState>,
        ValidatedJson(req): ValidatedJson<NodeGroupRequest>,
    ) -> Result<Json<NodeGroupResponse>, AppError> {
        let profile = req
            .profile
            .as_deref()
            .unwrap_or(&state.default_aws_profile);
        let node_groups = state
            .nodegroup_service
            .list_node_groups(&req.cluster_name, &req.region, Some(profile))
            .await?;

        Ok(Json(NodeGroupResponse {
            cluster_name: req.cluster_name,
            region: req.region,
            node_groups,
        }))
    }

    pub async fn login(
        State(state): State<AppState>,
        ValidatedJson(req): ValidatedJson<NodeGroupRequest>,
    ) -> Result<Json<LoginResponse>, AppError> {
        let path = state
            .login_service
            .login_to_cluster(&req.cluster_name, &req.region)
            .await?;

        Ok(Json(LoginResponse {
            cluster_name: req.cluster_name,
            region: req.region,
            kubeconfig_path: path.display().to_string(),
        }))
    }
}
