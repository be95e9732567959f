use std::sync::Arc;

use kube::Client;

use crate::config::AppConfig;
use crate::core::client::eks_client::AwsEksClientResolver;
use crate::core::persistence::kubeconfig_fs_adapter::KubeconfigFsAdapter;
use crate::domain::eks::service::login_service::ClusterLoginService;
use crate::domain::eks::service::nodegroup_service::NodeGroupService;
use crate::domain::ingress::service::ingress_service::IngressService;
use crate::domain::workload::service::restart_service::WorkloadRestartService;

/// Services shared by every request. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub ingress_service: Arc<IngressService>,
    pub nodegroup_service: Arc<NodeGroupService>,
    pub login_service: Arc<ClusterLoginService>,
    pub workload_service: Arc<WorkloadRestartService>,
    pub default_aws_profile: Arc<str>,
}

pub fn build_app_state(config: &AppConfig, kube_client: Client) -> AppState {
    let eks_resolver = Arc::new(AwsEksClientResolver::new(
        config.credential_profile_path.clone(),
    ));
    let kubeconfig_store = Arc::new(KubeconfigFsAdapter::new(config.kubeconfig_output.clone()));

    AppState {
        ingress_service: Arc::new(IngressService::new(
            Arc::new(kube_client.clone()),
            config.ingress_inclusion,
        )),
        nodegroup_service: Arc::new(NodeGroupService::new(eks_resolver.clone())),
        login_service: Arc::new(ClusterLoginService::new(
            eks_resolver,
            kubeconfig_store,
            config.token_command.clone(),
        )),
        workload_service: Arc::new(WorkloadRestartService::new(Arc::new(kube_client))),
        default_aws_profile: Arc::from(config.aws_profile.as_str()),
    }
}
