use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("failed to list ingresses: {0}")]
    ClusterQuery(String),

    #[error("failed to list nodegroups for cluster [{cluster}]: {message}")]
    NodeGroupList { cluster: String, message: String },

    #[error("failed to describe nodegroup [{nodegroup}]: {message}")]
    NodeGroupDescribe { nodegroup: String, message: String },

    #[error("failed to describe EKS cluster [{cluster}]: {message}")]
    ClusterLookup { cluster: String, message: String },

    #[error("failed to load AWS config: {0}")]
    Configuration(String),

    #[error("failed to write kubeconfig to {path}: {message}")]
    Persistence { path: String, message: String },

    #[error("failed to {action} {target}: {message}")]
    WorkloadAction {
        action: &'static str,
        target: String,
        message: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::ClusterQuery(_)
            | AppError::NodeGroupList { .. }
            | AppError::NodeGroupDescribe { .. }
            | AppError::ClusterLookup { .. }
            | AppError::Configuration(_)
            | AppError::Persistence { .. }
            | AppError::WorkloadAction { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// Conditions that stop the process before it starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read kubeconfig {path}: {source}")]
    Kubeconfig {
        path: String,
        #[source]
        source: kube::config::KubeconfigError,
    },

    #[error("failed to create kubernetes client: {0}")]
    Client(#[from] kube::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
