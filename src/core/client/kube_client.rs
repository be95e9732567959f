use std::path::Path;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::errors::StartupError;

/// Creates a Kubernetes client from the kubeconfig file at `kubeconfig_path`.
///
/// Uses the file's current context. Called once at startup; any failure is fatal.
pub async fn build_kube_client(kubeconfig_path: &Path) -> Result<Client, StartupError> {
    let kubeconfig =
        Kubeconfig::read_from(kubeconfig_path).map_err(|source| StartupError::Kubeconfig {
            path: kubeconfig_path.display().to_string(),
            source,
        })?;

    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|source| StartupError::Kubeconfig {
            path: kubeconfig_path.display().to_string(),
            source,
        })?;

    debug!(cluster_url = %config.cluster_url, "Using kubeconfig {}", kubeconfig_path.display());
    let client = Client::try_from(config)?;

    debug!("Kubernetes client initialized successfully");
    Ok(client)
}
