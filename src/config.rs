use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::persistence::kubeconfig_fs_adapter::KubeconfigTarget;
use crate::domain::ingress::service::ingress_service::IngressInclusionPolicy;
use crate::errors::StartupError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_AWS_PROFILE: &str = "default";
const DEFAULT_TOKEN_COMMAND: &str = "aws";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Process configuration, resolved once at startup and handed to the services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Kubeconfig used to build the cluster client at startup.
    pub kubeconfig_path: PathBuf,
    /// Shared credentials file used for multi-account profile lookups.
    pub credential_profile_path: PathBuf,
    /// Profile used by multi-account lookups that do not name one.
    pub aws_profile: String,
    pub kubeconfig_output: KubeconfigTarget,
    pub ingress_inclusion: IngressInclusionPolicy,
    /// Executable the generated kubeconfig invokes to obtain tokens.
    pub token_command: String,
    pub request_timeout: Duration,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let home = || {
            get("HOME").map(PathBuf::from).ok_or_else(|| {
                StartupError::Config("HOME is not set and no explicit path was given".into())
            })
        };

        let bind_addr = get("EKSOPS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| StartupError::Config(format!("EKSOPS_BIND_ADDR: {e}")))?;

        let kubeconfig_path = match get("KUBECONFIG") {
            Some(path) => PathBuf::from(path),
            None => home()?.join(".kube").join("config"),
        };

        let credential_profile_path = match get("AWS_SHARED_CREDENTIALS_FILE") {
            Some(path) => PathBuf::from(path),
            None => home()?.join(".aws").join("credentials"),
        };

        let per_cluster = match get("EKSOPS_KUBECONFIG_PER_CLUSTER") {
            Some(v) => v.trim().parse::<bool>().map_err(|_| {
                StartupError::Config(format!(
                    "EKSOPS_KUBECONFIG_PER_CLUSTER: expected true or false, got '{v}'"
                ))
            })?,
            None => false,
        };
        let kubeconfig_output = match (get("EKSOPS_KUBECONFIG_OUTPUT"), per_cluster) {
            (Some(path), false) => KubeconfigTarget::Shared(PathBuf::from(path)),
            (Some(dir), true) => KubeconfigTarget::PerCluster(PathBuf::from(dir)),
            (None, false) => KubeconfigTarget::Shared(kubeconfig_path.clone()),
            (None, true) => KubeconfigTarget::PerCluster(home()?.join(".kube").join("eks")),
        };

        let ingress_inclusion = match get("EKSOPS_INGRESS_INCLUSION") {
            Some(v) => v
                .parse::<IngressInclusionPolicy>()
                .map_err(|e| StartupError::Config(format!("EKSOPS_INGRESS_INCLUSION: {e}")))?,
            None => IngressInclusionPolicy::default(),
        };

        let request_timeout = match get("EKSOPS_REQUEST_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                StartupError::Config(format!("EKSOPS_REQUEST_TIMEOUT_SECS: {e}"))
            })?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            kubeconfig_path,
            credential_profile_path,
            aws_profile: get("EKSOPS_AWS_PROFILE").unwrap_or_else(|| DEFAULT_AWS_PROFILE.into()),
            kubeconfig_output,
            ingress_inclusion,
            token_command: get("EKSOPS_TOKEN_COMMAND")
                .unwrap_or_else(|| DEFAULT_TOKEN_COMMAND.into()),
            request_timeout,
            log_dir: get("EKSOPS_LOG_DIR").map(PathBuf::from),
        })
    }
}
