//! Kubeconfig document generated for EKS logins.
//!
//! Authentication is delegated to an exec credential plugin
//! (`<command> eks get-token --cluster-name <name> --region <region>`), so the file never
//! holds a static token.

use serde::Serialize;

pub const EXEC_API_VERSION: &str = "client.authentication.k8s.io/v1";
pub const EKS_USER: &str = "eks-user";

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct KubeconfigDocument {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub clusters: Vec<NamedCluster>,
    pub contexts: Vec<NamedContext>,
    pub current_context: String,
    pub kind: String,
    pub preferences: Preferences,
    pub users: Vec<NamedUser>,
}

#[derive(Debug, Serialize)]
pub struct NamedCluster {
    pub cluster: ClusterEntry,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEntry {
    pub server: String,
    pub certificate_authority_data: String,
}

#[derive(Debug, Serialize)]
pub struct NamedContext {
    pub context: ContextEntry,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ContextEntry {
    pub cluster: String,
    pub user: String,
}

#[derive(Debug, Default, Serialize)]
pub struct Preferences {}

#[derive(Debug, Serialize)]
pub struct NamedUser {
    pub name: String,
    pub user: UserEntry,
}

#[derive(Debug, Serialize)]
pub struct UserEntry {
    pub exec: ExecConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecConfig {
    pub api_version: String,
    pub command: String,
    pub args: Vec<String>,
}

impl KubeconfigDocument {
    /// Single-cluster kubeconfig whose cluster and context are both named `cluster_name`.
    pub fn for_eks_cluster(
        cluster_name: &str,
        region: &str,
        server: &str,
        certificate_authority_data: &str,
        token_command: &str,
    ) -> Self {
        Self {
            api_version: "v1".to_string(),
            clusters: vec![NamedCluster {
                cluster: ClusterEntry {
                    server: server.to_string(),
                    certificate_authority_data: certificate_authority_data.to_string(),
                },
                name: cluster_name.to_string(),
            }],
            contexts: vec![NamedContext {
                context: ContextEntry {
                    cluster: cluster_name.to_string(),
                    user: EKS_USER.to_string(),
                },
                name: cluster_name.to_string(),
            }],
            current_context: cluster_name.to_string(),
            kind: "Config".to_string(),
            preferences: Preferences::default(),
            users: vec![NamedUser {
                name: EKS_USER.to_string(),
                user: UserEntry {
                    exec: ExecConfig {
                        api_version: EXEC_API_VERSION.to_string(),
                        command: token_command.to_string(),
                        args: [
                            "eks",
                            "get-token",
                            "--cluster-name",
                            cluster_name,
                            "--region",
                            region,
                        ]
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    },
                },
            }],
        }
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
