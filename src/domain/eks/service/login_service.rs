use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::core::client::eks_client::EksClientResolver;
use crate::core::persistence::kubeconfig_fs_adapter::KubeconfigStore;
use crate::domain::eks::dto::kubeconfig_document::KubeconfigDocument;
use crate::errors::AppError;

pub struct ClusterLoginService {
    resolver: Arc<dyn EksClientResolver>,
    store: Arc<dyn KubeconfigStore>,
    token_command: String,
}

impl ClusterLoginService {
    pub fn new(
        resolver: Arc<dyn EksClientResolver>,
        store: Arc<dyn KubeconfigStore>,
        token_command: String,
    ) -> Self {
        Self {
            resolver,
            store,
            token_command,
        }
    }

    /// Describe the cluster and write a kubeconfig using exec-based token auth.
    ///
    /// Returns the path that was written.
    pub async fn login_to_cluster(
        &self,
        cluster_name: &str,
        region: &str,
    ) -> Result<PathBuf, AppError> {
        let api = self
            .resolver
            .resolve(region, None)
            .await
            .map_err(|e| AppError::Configuration(format!("{e:#}")))?;

        let endpoint = api
            .describe_cluster(cluster_name)
            .await
            .map_err(|e| AppError::ClusterLookup {
                cluster: cluster_name.to_owned(),
                message: format!("{e:#}"),
            })?;

        let persistence_error = |message: String| AppError::Persistence {
            path: self.store.path_for(cluster_name, region).display().to_string(),
            message,
        };

        let document = KubeconfigDocument::for_eks_cluster(
            cluster_name,
            region,
            &endpoint.endpoint,
            &endpoint.certificate_authority_data,
            &self.token_command,
        )
        .to_yaml()
        .map_err(|e| persistence_error(format!("{e:#}")))?;

        let path = self
            .store
            .write(cluster_name, region, &document)
            .map_err(|e| persistence_error(format!("{e:#}")))?;

        info!("Successfully updated kubeconfig for cluster: {cluster_name}");
        Ok(path)
    }
}
