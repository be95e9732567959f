use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::info;

/// Where generated kubeconfig documents are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubeconfigTarget {
    /// One shared file; concurrent logins are last-writer-wins.
    Shared(PathBuf),
    /// One file per cluster and region inside the directory.
    PerCluster(PathBuf),
}

impl KubeconfigTarget {
    pub fn path_for(&self, cluster_name: &str, region: &str) -> PathBuf {
        match self {
            KubeconfigTarget::Shared(path) => path.clone(),
            KubeconfigTarget::PerCluster(dir) => dir.join(format!("{cluster_name}-{region}.yaml")),
        }
    }
}

pub trait KubeconfigStore: Send + Sync {
    /// Replace the kubeconfig for `cluster_name`/`region` and return the written path.
    fn write(&self, cluster_name: &str, region: &str, contents: &str) -> Result<PathBuf>;

    fn path_for(&self, cluster_name: &str, region: &str) -> PathBuf;
}

/// FS adapter for generated kubeconfig files.
///
/// Writes go to a uniquely named temp file in the target directory which is then renamed
/// over the destination, so readers never observe a partially written document.
pub struct KubeconfigFsAdapter {
    target: KubeconfigTarget,
}

impl KubeconfigFsAdapter {
    pub fn new(target: KubeconfigTarget) -> Self {
        Self { target }
    }
}

impl KubeconfigStore for KubeconfigFsAdapter {
    fn write(&self, cluster_name: &str, region: &str, contents: &str) -> Result<PathBuf> {
        let path = self.target.path_for(cluster_name, region);
        write_atomic(&path, contents)?;

        info!("Updated kubeconfig {} for cluster {cluster_name}", path.display());
        Ok(path)
    }

    fn path_for(&self, cluster_name: &str, region: &str) -> PathBuf {
        self.target.path_for(cluster_name, region)
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create kubeconfig directory")?;
    }

    let tmp_path = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
    let result = (|| -> Result<()> {
        let mut f = File::create(&tmp_path).context("Failed to create temp kubeconfig file")?;
        f.write_all(contents.as_bytes())?;
        f.flush()?;
        f.sync_all().context("Failed to sync temp kubeconfig file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))
                .context("Failed to restrict kubeconfig permissions")?;
        }

        fs::rename(&tmp_path, path).context("Failed to finalize kubeconfig file")
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
