use anyhow::Result;
use async_trait::async_trait;
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

/// Read access to Ingress objects.
#[async_trait]
pub trait IngressReader: Send + Sync {
    /// List ingresses in `namespace`, or across all namespaces when `None`.
    async fn list_ingresses(&self, namespace: Option<&str>) -> Result<Vec<Ingress>>;
}

#[async_trait]
impl IngressReader for Client {
    async fn list_ingresses(&self, namespace: Option<&str>) -> Result<Vec<Ingress>> {
        match namespace {
            Some(ns) => fetch_ingresses_by_namespace(self, ns).await,
            None => fetch_ingresses(self).await,
        }
    }
}

/// Fetch all ingresses in the cluster
pub async fn fetch_ingresses(client: &Client) -> Result<Vec<Ingress>> {
    let ingresses: Api<Ingress> = Api::all(client.clone());
    let ingress_list = ingresses.list(&ListParams::default()).await?;

    debug!("Discovered {} ingress(es)", ingress_list.items.len());
    Ok(ingress_list.items)
}

/// Fetch ingresses in a specific namespace
pub async fn fetch_ingresses_by_namespace(
    client: &Client,
    namespace: &str,
) -> Result<Vec<Ingress>> {
    let ingresses: Api<Ingress> = Api::namespaced(client.clone(), namespace);
    let ingress_list = ingresses.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} ingress(es) in namespace '{}'",
        ingress_list.items.len(),
        namespace
    );
    Ok(ingress_list.items)
}
