use std::sync::Arc;

use tracing::debug;

use crate::core::client::eks_client::{EksApi, EksClientResolver};
use crate::domain::eks::dto::nodegroup_summary::NodeGroupSummary;
use crate::errors::AppError;

pub struct NodeGroupService {
    resolver: Arc<dyn EksClientResolver>,
}

impl NodeGroupService {
    pub fn new(resolver: Arc<dyn EksClientResolver>) -> Self {
        Self { resolver }
    }

    /// List every node group of `cluster_name` with its scaling configuration.
    ///
    /// `profile` selects a named credential profile for clusters in other accounts.
    /// Any failing describe aborts the call; partial results are never returned.
    pub async fn list_node_groups(
        &self,
        cluster_name: &str,
        region: &str,
        profile: Option<&str>,
    ) -> Result<Vec<NodeGroupSummary>, AppError> {
        let api = self
            .resolver
            .resolve(region, profile)
            .await
            .map_err(|e| AppError::Configuration(format!("{e:#}")))?;

        let names = api
            .list_nodegroups(cluster_name)
            .await
            .map_err(|e| AppError::NodeGroupList {
                cluster: cluster_name.to_owned(),
                message: format!("{e:#}"),
            })?;

        // One describe per node group, in list order.
        let mut node_groups = Vec::with_capacity(names.len());
        for name in &names {
            node_groups.push(describe_node_group(api.as_ref(), cluster_name, name).await?);
        }

        debug!(
            "Described {} nodegroup(s) for cluster {cluster_name} in {region}",
            node_groups.len()
        );
        Ok(node_groups)
    }
}

/// One unit of work per node group.
async fn describe_node_group(
    api: &dyn EksApi,
    cluster_name: &str,
    nodegroup_name: &str,
) -> Result<NodeGroupSummary, AppError> {
    api.describe_nodegroup(cluster_name, nodegroup_name)
        .await
        .map(NodeGroupSummary::from)
        .map_err(|e| AppError::NodeGroupDescribe {
            nodegroup: nodegroup_name.to_owned(),
            message: format!("{e:#}"),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::client::eks_client::{ClusterEndpoint, NodegroupDetail, ScalingConfig};
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory EKS double shared by the service and router tests.
    #[derive(Default)]
    pub(crate) struct MockEks {
        pub nodegroups: Vec<String>,
        pub failing_describe: Option<String>,
        pub fail_list: bool,
        pub endpoint: Option<ClusterEndpoint>,
        pub describes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EksApi for MockEks {
        async fn list_nodegroups(&self, _cluster_name: &str) -> Result<Vec<String>> {
            if self.fail_list {
                bail!("ResourceNotFoundException: No cluster found");
            }
            Ok(self.nodegroups.clone())
        }

        async fn describe_nodegroup(
            &self,
            _cluster_name: &str,
            nodegroup_name: &str,
        ) -> Result<NodegroupDetail> {
            self.describes.lock().unwrap().push(nodegroup_name.to_owned());
            if self.failing_describe.as_deref() == Some(nodegroup_name) {
                bail!("AccessDeniedException");
            }
            let size = self.describes.lock().unwrap().len() as i32;
            Ok(NodegroupDetail {
                name: nodegroup_name.to_owned(),
                scaling_config: Some(ScalingConfig {
                    min_size: Some(size),
                    max_size: Some(size * 10),
                    desired_size: Some(size * 2),
                }),
            })
        }

        async fn describe_cluster(&self, cluster_name: &str) -> Result<ClusterEndpoint> {
            match &self.endpoint {
                Some(endpoint) => Ok(endpoint.clone()),
                None => bail!("No cluster found for name: {cluster_name}"),
            }
        }
    }

    /// Resolver handing out one shared `MockEks`, recording every resolve call.
    pub(crate) struct MockResolver {
        pub eks: Arc<MockEks>,
        pub fail: bool,
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockResolver {
        pub fn new(eks: MockEks) -> Self {
            Self {
                eks: Arc::new(eks),
                fail: false,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EksClientResolver for MockResolver {
        async fn resolve(&self, region: &str, profile: Option<&str>) -> Result<Arc<dyn EksApi>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push((region.to_owned(), profile.map(str::to_owned)));
            if self.fail {
                bail!("credentials file /nonexistent does not exist");
            }
            Ok(self.eks.clone())
        }
    }

    fn service(eks: MockEks) -> (NodeGroupService, Arc<MockResolver>) {
        let resolver = Arc::new(MockResolver::new(eks));
        (NodeGroupService::new(resolver.clone()), resolver)
    }

    #[tokio::test]
    async fn describes_each_nodegroup_in_list_order() {
        let (svc, resolver) = service(MockEks {
            nodegroups: vec!["a".into(), "b".into()],
            ..Default::default()
        });

        let out = svc.list_node_groups("demo", "us-west-2", None).await.unwrap();

        let names: Vec<&str> = out.iter().map(|ng| ng.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(out[0].scaling_config.as_ref().unwrap().min_size, Some(1));
        assert_eq!(out[1].scaling_config.as_ref().unwrap().min_size, Some(2));
        assert_eq!(*resolver.eks.describes.lock().unwrap(), ["a", "b"]);
    }

    #[tokio::test]
    async fn failing_describe_discards_partial_results() {
        let (svc, _) = service(MockEks {
            nodegroups: vec!["a".into(), "b".into()],
            failing_describe: Some("b".into()),
            ..Default::default()
        });

        let err = svc
            .list_node_groups("demo", "us-west-2", None)
            .await
            .unwrap_err();

        match err {
            AppError::NodeGroupDescribe { nodegroup, message } => {
                assert_eq!(nodegroup, "b");
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_failure_names_the_cluster() {
        let (svc, resolver) = service(MockEks {
            fail_list: true,
            ..Default::default()
        });

        let err = svc
            .list_node_groups("demo", "us-west-2", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NodeGroupList { ref cluster, .. } if cluster == "demo"));
        assert!(resolver.eks.describes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolver_failure_is_a_configuration_error() {
        let mut resolver = MockResolver::new(MockEks::default());
        resolver.fail = true;
        let svc = NodeGroupService::new(Arc::new(resolver));

        let err = svc
            .list_node_groups("demo", "us-west-2", Some("prod"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn profile_is_forwarded_to_the_resolver() {
        let (svc, resolver) = service(MockEks::default());

        let out = svc
            .list_node_groups("demo", "eu-central-1", Some("staging"))
            .await
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(
            *resolver.requests.lock().unwrap(),
            [("eu-central-1".to_string(), Some("staging".to_string()))]
        );
    }
}
