//! Workload restart DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestartDeploymentReq {
    #[validate(length(min = 1, message = "namespace is required"))]
    pub namespace: String,

    #[validate(length(min = 1, message = "deploymentName is required"))]
    pub deployment_name: String,
}

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RestartPodReq {
    #[validate(length(min = 1, message = "namespace is required"))]
    pub namespace: String,

    #[validate(length(min = 1, message = "podName is required"))]
    pub pod_name: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RestartDeploymentResponse {
    pub namespace: String,
    pub deployment_name: String,
    pub restarted_at: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RestartPodResponse {
    pub namespace: String,
    pub pod_name: String,
    /// False when no controller owns the pod, so it was deleted without replacement.
    pub managed: bool,
}
