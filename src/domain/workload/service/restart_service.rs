use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::core::client::workloads::WorkloadOps;
use crate::errors::AppError;

pub struct WorkloadRestartService {
    ops: Arc<dyn WorkloadOps>,
}

impl WorkloadRestartService {
    pub fn new(ops: Arc<dyn WorkloadOps>) -> Self {
        Self { ops }
    }

    /// Start a rolling restart of the deployment; returns the `restartedAt` value applied.
    pub async fn restart_deployment(
        &self,
        namespace: &str,
        deployment_name: &str,
    ) -> Result<String, AppError> {
        let restarted_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        self.ops
            .restart_deployment(namespace, deployment_name, &restarted_at)
            .await
            .map_err(|e| AppError::WorkloadAction {
                action: "restart deployment",
                target: format!("{namespace}/{deployment_name}"),
                message: format!("{e:#}"),
            })?;

        info!("Restarted deployment {namespace}/{deployment_name} at {restarted_at}");
        Ok(restarted_at)
    }

    /// Delete the pod so its controller recreates it.
    ///
    /// Returns whether a controller owns the pod. Deleting an unmanaged pod still succeeds,
    /// it just will not come back.
    pub async fn restart_pod(&self, namespace: &str, pod_name: &str) -> Result<bool, AppError> {
        let action_error = |e: anyhow::Error| AppError::WorkloadAction {
            action: "restart pod",
            target: format!("{namespace}/{pod_name}"),
            message: format!("{e:#}"),
        };

        let managed = self
            .ops
            .pod_is_managed(namespace, pod_name)
            .await
            .map_err(action_error)?;
        self.ops
            .delete_pod(namespace, pod_name)
            .await
            .map_err(action_error)?;

        if managed {
            info!("Deleted pod {namespace}/{pod_name}; its controller will recreate it");
        } else {
            warn!("Deleted unmanaged pod {namespace}/{pod_name}; it will not be recreated");
        }
        Ok(managed)
    }
}
