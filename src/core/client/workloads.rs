use anyhow::Result;
use async_trait::async_trait;
use kube::Client;

use crate::core::client::deployments::patch_deployment_restarted_at;
use crate::core::client::pods::{delete_pod, fetch_pod_by_name_and_namespace, has_controller_owner};

/// Mutating operations on workloads used by the restart endpoints.
#[async_trait]
pub trait WorkloadOps: Send + Sync {
    async fn restart_deployment(
        &self,
        namespace: &str,
        deployment_name: &str,
        restarted_at: &str,
    ) -> Result<()>;

    /// Whether the pod is owned by a controller that will recreate it.
    async fn pod_is_managed(&self, namespace: &str, pod_name: &str) -> Result<bool>;

    async fn delete_pod(&self, namespace: &str, pod_name: &str) -> Result<()>;
}

#[async_trait]
impl WorkloadOps for Client {
    async fn restart_deployment(
        &self,
        namespace: &str,
        deployment_name: &str,
        restarted_at: &str,
    ) -> Result<()> {
        patch_deployment_restarted_at(self, namespace, deployment_name, restarted_at).await
    }

    async fn pod_is_managed(&self, namespace: &str, pod_name: &str) -> Result<bool> {
        let pod = fetch_pod_by_name_and_namespace(self, namespace, pod_name).await?;
        Ok(has_controller_owner(&pod))
    }

    async fn delete_pod(&self, namespace: &str, pod_name: &str) -> Result<()> {
        delete_pod(self, namespace, pod_name).await
    }
}
