use serde::Serialize;

/// Flattened, read-only view of an Ingress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressSummary {
    pub namespace: String,
    pub name: String,
    pub rules: Vec<RuleSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub host: String,
    pub paths: Vec<PathSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSummary {
    pub path: String,
    pub service: String,
    pub port: i32,
}

impl IngressSummary {
    pub fn path_count(&self) -> usize {
        self.rules.iter().map(|r| r.paths.len()).sum()
    }
}
