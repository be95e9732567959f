use anyhow::Result;
use k8s_openapi::api::core::v1::Pod;
use kube::api::DeleteParams;
use kube::{Api, Client};
use tracing::debug;

/// Fetch a single pod by name and namespace
pub async fn fetch_pod_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    pod_name: &str,
) -> Result<Pod> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let pod = pods.get(pod_name).await?;

    debug!("Fetched pod: {}/{}", namespace, pod_name);
    Ok(pod)
}

/// Delete a pod with the default grace period
pub async fn delete_pod(client: &Client, namespace: &str, pod_name: &str) -> Result<()> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    pods.delete(pod_name, &DeleteParams::default()).await?;

    debug!("Deleted pod: {}/{}", namespace, pod_name);
    Ok(())
}

/// True when some owner reference is marked as the pod's controller.
pub fn has_controller_owner(pod: &Pod) -> bool {
    pod.metadata
        .owner_references
        .as_ref()
        .is_some_and(|owners| owners.iter().any(|o| o.controller == Some(true)))
}
