//! EKS API DTOs

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::eks::dto::nodegroup_summary::NodeGroupSummary;

#[derive(Deserialize, Debug, Validate)]
pub struct NodeGroupRequest {
    #[validate(
        length(min = 1, message = "cluster_name is required"),
        custom(function = "validate_resource_name")
    )]
    pub cluster_name: String,

    #[validate(
        length(min = 1, message = "region is required"),
        custom(function = "validate_resource_name")
    )]
    pub region: String,

    /// Credential profile for multi-account lookups; ignored elsewhere.
    #[validate(length(min = 1))]
    pub profile: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct NodeGroupResponse {
    pub cluster_name: String,
    pub region: String,
    pub node_groups: Vec<NodeGroupSummary>,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub cluster_name: String,
    pub region: String,
    pub kubeconfig_path: String,
}

/// Cluster names and regions end up in kubeconfig file names, so only
/// ASCII letters, digits, `-` and `_` are accepted.
fn validate_resource_name(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("resource_name").with_message(Cow::Owned(format!(
            "'{value}' may only contain letters, digits, '-' and '_'"
        ))))
    }
}
