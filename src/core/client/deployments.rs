use anyhow::Result;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client};
use serde_json::json;
use tracing::debug;

/// Annotation `kubectl rollout restart` stamps on the pod template.
pub const RESTARTED_AT_ANNOTATION: &str = "kubectl.kubernetes.io/restartedAt";

/// Trigger a rolling restart by stamping the pod template with `restarted_at`.
///
/// Returns as soon as the API server accepts the patch; the rollout itself is not awaited.
pub async fn patch_deployment_restarted_at(
    client: &Client,
    namespace: &str,
    deployment_name: &str,
    restarted_at: &str,
) -> Result<()> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let patch = json!({
        "spec": {
            "template": {
                "metadata": {
                    "annotations": { RESTARTED_AT_ANNOTATION: restarted_at }
                }
            }
        }
    });

    deployments
        .patch(deployment_name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;

    debug!("Patched {RESTARTED_AT_ANNOTATION} on deployment {namespace}/{deployment_name}");
    Ok(())
}
