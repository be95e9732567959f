use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_eks::error::DisplayErrorContext;
use aws_runtime::env_config::file::{EnvConfigFileKind, EnvConfigFiles};
use aws_sdk_eks::Client;
use serde::Serialize;
use tracing::debug;

/// Scaling bounds of a managed node group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingConfig {
    pub min_size: Option<i32>,
    pub max_size: Option<i32>,
    pub desired_size: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodegroupDetail {
    pub name: String,
    pub scaling_config: Option<ScalingConfig>,
}

/// What a kubeconfig needs to reach a cluster's API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEndpoint {
    pub endpoint: String,
    pub certificate_authority_data: String,
}

/// The subset of the EKS API this service calls.
#[async_trait]
pub trait EksApi: Send + Sync {
    async fn list_nodegroups(&self, cluster_name: &str) -> Result<Vec<String>>;

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> Result<NodegroupDetail>;

    async fn describe_cluster(&self, cluster_name: &str) -> Result<ClusterEndpoint>;
}

/// Builds region (and optionally profile) scoped EKS clients.
#[async_trait]
pub trait EksClientResolver: Send + Sync {
    async fn resolve(&self, region: &str, profile: Option<&str>) -> Result<Arc<dyn EksApi>>;
}

/// Resolves clients through the AWS default credential chain, or through a named
/// profile of the shared credentials file for multi-account lookups.
pub struct AwsEksClientResolver {
    credentials_file: PathBuf,
}

impl AwsEksClientResolver {
    pub fn new(credentials_file: PathBuf) -> Self {
        Self { credentials_file }
    }
}

#[async_trait]
impl EksClientResolver for AwsEksClientResolver {
    async fn resolve(&self, region: &str, profile: Option<&str>) -> Result<Arc<dyn EksApi>> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_owned()));

        if let Some(profile) = profile {
            if !self.credentials_file.is_file() {
                bail!(
                    "credentials file {} does not exist",
                    self.credentials_file.display()
                );
            }
            let profile_files = EnvConfigFiles::builder()
                .include_default_config_file(true)
                .with_file(EnvConfigFileKind::Credentials, &self.credentials_file)
                .build();
            loader = loader.profile_files(profile_files).profile_name(profile);
            debug!("Using AWS profile '{profile}' from {}", self.credentials_file.display());
        }

        let sdk_config = loader.load().await;
        if sdk_config.credentials_provider().is_none() {
            bail!("no AWS credentials provider available for region {region}");
        }

        Ok(Arc::new(AwsEksClient {
            client: Client::new(&sdk_config),
        }))
    }
}

pub struct AwsEksClient {
    client: Client,
}

#[async_trait]
impl EksApi for AwsEksClient {
    async fn list_nodegroups(&self, cluster_name: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_nodegroups()
                .cluster_name(cluster_name)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

            names.extend(output.nodegroups().iter().cloned());
            match output.next_token() {
                Some(token) => next_token = Some(token.to_owned()),
                None => break,
            }
        }

        debug!("Discovered {} nodegroup(s) in cluster '{}'", names.len(), cluster_name);
        Ok(names)
    }

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> Result<NodegroupDetail> {
        let output = self
            .client
            .describe_nodegroup()
            .cluster_name(cluster_name)
            .nodegroup_name(nodegroup_name)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        let nodegroup = output
            .nodegroup()
            .context("response did not include a nodegroup")?;

        Ok(NodegroupDetail {
            name: nodegroup
                .nodegroup_name()
                .unwrap_or(nodegroup_name)
                .to_owned(),
            scaling_config: nodegroup.scaling_config().map(|sc| ScalingConfig {
                min_size: sc.min_size(),
                max_size: sc.max_size(),
                desired_size: sc.desired_size(),
            }),
        })
    }

    async fn describe_cluster(&self, cluster_name: &str) -> Result<ClusterEndpoint> {
        let output = self
            .client
            .describe_cluster()
            .name(cluster_name)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        let cluster = output
            .cluster()
            .context("response did not include a cluster")?;
        let endpoint = cluster
            .endpoint()
            .context("cluster has no API endpoint yet")?;
        let certificate_authority_data = cluster
            .certificate_authority()
            .and_then(|ca| ca.data())
            .context("cluster has no certificate authority data")?;

        Ok(ClusterEndpoint {
            endpoint: endpoint.to_owned(),
            certificate_authority_data: certificate_authority_data.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn profile_lookup_requires_credentials_file() {
        let missing = std::env::temp_dir()
            .join(uuid::Uuid::new_v4().to_string())
            .join("credentials");
        let resolver = AwsEksClientResolver::new(missing.clone());

        let err = match resolver.resolve("us-west-2", Some("prod")).await {
            Ok(_) => panic!("expected missing credentials file to be rejected"),
            Err(err) => err,
        };
        assert!(err.to_string().contains(&missing.display().to_string()));
    }

    #[test]
    fn scaling_config_serializes_camel_case() {
        let sc = ScalingConfig {
            min_size: Some(1),
            max_size: Some(5),
            desired_size: Some(2),
        };
        assert_eq!(
            serde_json::to_value(&sc).unwrap(),
            serde_json::json!({ "minSize": 1, "maxSize": 5, "desiredSize": 2 })
        );
    }
}
