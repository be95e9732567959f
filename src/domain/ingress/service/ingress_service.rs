use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use k8s_openapi::api::networking::v1::{HTTPIngressPath, Ingress, IngressRule};
use tracing::{debug, info};

use crate::core::client::ingresses::IngressReader;
use crate::domain::ingress::dto::ingress_summary::{IngressSummary, PathSummary, RuleSummary};
use crate::errors::AppError;

/// Which ingresses survive into the response once their paths are filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngressInclusionPolicy {
    /// Every listed ingress, even when filtering removed all of its paths.
    All,
    /// Only ingresses with at least one rule whose first rule kept at least one path.
    #[default]
    WithPaths,
}

impl FromStr for IngressInclusionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "with_paths" | "with-paths" => Ok(Self::WithPaths),
            other => Err(format!(
                "unknown ingress inclusion policy '{other}' (expected 'all' or 'with_paths')"
            )),
        }
    }
}

impl fmt::Display for IngressInclusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::WithPaths => f.write_str("with_paths"),
        }
    }
}

/// Case-insensitive exact-match filters; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct IngressFilter {
    pub path: Option<String>,
    pub service: Option<String>,
}

impl IngressFilter {
    /// Empty strings are treated as "no filter".
    pub fn new(path: Option<String>, service: Option<String>) -> Self {
        Self {
            path: path.filter(|p| !p.is_empty()),
            service: service.filter(|s| !s.is_empty()),
        }
    }

    fn matches(&self, path: &PathSummary) -> bool {
        let path_ok = self
            .path
            .as_deref()
            .is_none_or(|want| eq_fold(want, &path.path));
        let service_ok = self
            .service
            .as_deref()
            .is_none_or(|want| eq_fold(want, &path.service));
        path_ok && service_ok
    }
}

/// Unicode case-insensitive equality.
fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

pub struct IngressService {
    reader: Arc<dyn IngressReader>,
    policy: IngressInclusionPolicy,
}

impl IngressService {
    pub fn new(reader: Arc<dyn IngressReader>, policy: IngressInclusionPolicy) -> Self {
        Self { reader, policy }
    }

    /// List ingresses in `namespace` (all namespaces when empty) as filtered summaries.
    pub async fn list_ingresses(
        &self,
        namespace: Option<&str>,
        filter: &IngressFilter,
    ) -> Result<Vec<IngressSummary>, AppError> {
        let namespace = namespace.filter(|ns| !ns.is_empty());
        let ingresses = self
            .reader
            .list_ingresses(namespace)
            .await
            .map_err(|e| AppError::ClusterQuery(format!("{e:#}")))?;

        let listing = summarize_ingresses(&ingresses, filter, self.policy);
        info!(
            namespace = namespace.unwrap_or("*"),
            ingresses = listing.items.len(),
            "Total ingress rules: {}",
            listing.matched_paths
        );
        Ok(listing.items)
    }
}

#[derive(Debug, Default)]
pub struct IngressListing {
    /// Summaries kept by the inclusion policy, in source order.
    pub items: Vec<IngressSummary>,
    /// Paths that matched the filter across every listed ingress, kept or not.
    pub matched_paths: usize,
}

/// Project ingresses into summaries, keeping source order and applying `policy`.
pub fn summarize_ingresses(
    ingresses: &[Ingress],
    filter: &IngressFilter,
    policy: IngressInclusionPolicy,
) -> IngressListing {
    let summaries: Vec<IngressSummary> = ingresses
        .iter()
        .map(|ingress| summarize_ingress(ingress, filter))
        .collect();
    let matched_paths = summaries.iter().map(IngressSummary::path_count).sum();

    IngressListing {
        items: summaries
            .into_iter()
            .filter(|summary| is_included(summary, policy))
            .collect(),
        matched_paths,
    }
}

fn summarize_ingress(ingress: &Ingress, filter: &IngressFilter) -> IngressSummary {
    let rules = ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.rules.as_ref())
        .map(|rules| rules.iter().map(|rule| summarize_rule(rule, filter)).collect())
        .unwrap_or_default();

    IngressSummary {
        namespace: ingress.metadata.namespace.clone().unwrap_or_default(),
        name: ingress.metadata.name.clone().unwrap_or_default(),
        rules,
    }
}

fn summarize_rule(rule: &IngressRule, filter: &IngressFilter) -> RuleSummary {
    let paths = rule
        .http
        .as_ref()
        .map(|http| {
            http.paths
                .iter()
                .map(summarize_path)
                .filter(|p| filter.matches(p))
                .collect()
        })
        .unwrap_or_default();

    RuleSummary {
        host: rule.host.clone().unwrap_or_default(),
        paths,
    }
}

fn summarize_path(path: &HTTPIngressPath) -> PathSummary {
    let service = path.backend.service.as_ref();
    PathSummary {
        path: path.path.clone().unwrap_or_default(),
        service: service.map(|s| s.name.clone()).unwrap_or_default(),
        port: service
            .and_then(|s| s.port.as_ref())
            .and_then(|p| p.number)
            .unwrap_or_default(),
    }
}

fn is_included(summary: &IngressSummary, policy: IngressInclusionPolicy) -> bool {
    let included = match policy {
        IngressInclusionPolicy::All => true,
        IngressInclusionPolicy::WithPaths => summary
            .rules
            .first()
            .is_some_and(|first| !first.paths.is_empty()),
    };
    if !included {
        debug!("Skipping ingress {}/{}", summary.namespace, summary.name);
    }
    included
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    fn ingress(namespace: &str, name: &str, rules: serde_json::Value) -> Ingress {
        serde_json::from_value(json!({
            "metadata": { "namespace": namespace, "name": name },
            "spec": { "rules": rules }
        }))
        .unwrap()
    }

    fn backend(path: &str, service: &str, port: i32) -> serde_json::Value {
        json!({
            "path": path,
            "pathType": "Prefix",
            "backend": { "service": { "name": service, "port": { "number": port } } }
        })
    }

    fn sample() -> Vec<Ingress> {
        vec![
            ingress(
                "web",
                "frontend",
                json!([
                    { "host": "a.example.com", "http": { "paths": [
                        backend("/", "frontend", 80),
                        backend("/api", "api", 8080)
                    ]}},
                    { "host": "b.example.com", "http": { "paths": [
                        backend("/API", "Api", 8081)
                    ]}}
                ]),
            ),
            ingress(
                "ops",
                "grafana",
                json!([
                    { "host": "grafana.example.com", "http": { "paths": [
                        backend("/", "grafana", 3000)
                    ]}}
                ]),
            ),
        ]
    }

    #[test]
    fn no_filter_keeps_every_path() {
        let out = summarize_ingresses(
            &sample(),
            &IngressFilter::default(),
            IngressInclusionPolicy::All,
        )
        .items;

        let total: usize = out.iter().map(IngressSummary::path_count).sum();
        assert_eq!(total, 4);
        assert_eq!(out[0].name, "frontend");
        assert_eq!(out[1].name, "grafana");
        assert_eq!(out[0].rules[0].paths[1].port, 8080);
    }

    #[test]
    fn filters_are_case_insensitive_and_combined() {
        let filter = IngressFilter::new(Some("/api".into()), Some("API".into()));
        let out = summarize_ingresses(&sample(), &filter, IngressInclusionPolicy::All).items;

        let matched: Vec<&PathSummary> = out
            .iter()
            .flat_map(|i| i.rules.iter())
            .flat_map(|r| r.paths.iter())
            .collect();
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|p| p.path.eq_ignore_ascii_case("/api")));

        let filter = IngressFilter::new(Some("/api".into()), Some("grafana".into()));
        let out = summarize_ingresses(&sample(), &filter, IngressInclusionPolicy::All).items;
        assert!(out.iter().all(|i| i.path_count() == 0));
    }

    #[test]
    fn empty_filters_mean_unset() {
        let filter = IngressFilter::new(Some(String::new()), Some(String::new()));
        assert!(filter.path.is_none());
        assert!(filter.service.is_none());
    }

    #[test]
    fn rule_without_http_is_kept_empty() {
        let items = vec![ingress(
            "default",
            "mixed",
            json!([
                { "host": "a.example.com", "http": { "paths": [backend("/a", "svc1", 80)] } },
                { "host": "b.example.com" }
            ]),
        )];
        let filter = IngressFilter::new(Some(String::new()), Some(String::new()));

        for policy in [IngressInclusionPolicy::All, IngressInclusionPolicy::WithPaths] {
            let out = summarize_ingresses(&items, &filter, policy).items;
            assert_eq!(out.len(), 1);
            assert_eq!(out[0].rules.len(), 2);
            assert_eq!(
                out[0].rules[0].paths,
                vec![PathSummary {
                    path: "/a".into(),
                    service: "svc1".into(),
                    port: 80
                }]
            );
            assert!(out[0].rules[1].paths.is_empty());
        }
    }

    #[test]
    fn with_paths_policy_drops_ingresses_whose_first_rule_is_empty() {
        let items = vec![
            ingress("default", "no-rules", json!([])),
            ingress(
                "default",
                "second-only",
                json!([
                    { "host": "a.example.com" },
                    { "host": "b.example.com", "http": { "paths": [backend("/b", "svc", 80)] } }
                ]),
            ),
        ];

        let kept = summarize_ingresses(
            &items,
            &IngressFilter::default(),
            IngressInclusionPolicy::WithPaths,
        );
        assert!(kept.items.is_empty());
        // dropped ingresses still count toward the matched total
        assert_eq!(kept.matched_paths, 1);

        let all = summarize_ingresses(&items, &IngressFilter::default(), IngressInclusionPolicy::All).items;
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn non_service_backend_reports_blank_service() {
        let items = vec![ingress(
            "default",
            "bucket",
            json!([{ "http": { "paths": [{
                "path": "/static",
                "pathType": "Prefix",
                "backend": { "resource": { "apiGroup": "k8s.example.com", "kind": "Bucket", "name": "assets" } }
            }]}}]),
        )];

        let out = summarize_ingresses(&items, &IngressFilter::default(), IngressInclusionPolicy::All).items;
        assert_eq!(out[0].rules[0].host, "");
        assert_eq!(out[0].rules[0].paths[0].service, "");
        assert_eq!(out[0].rules[0].paths[0].port, 0);
    }

    #[test]
    fn filters_fold_non_ascii_case() {
        let items = vec![ingress(
            "default",
            "menu",
            json!([{ "http": { "paths": [{
                "path": "/café",
                "pathType": "ImplementationSpecific",
                "backend": { "service": { "name": "Crème", "port": { "number": 80 } } }
            }]}}]),
        )];
        let filter = IngressFilter::new(Some("/CAFÉ".into()), Some("CRÈME".into()));

        let listing = summarize_ingresses(&items, &filter, IngressInclusionPolicy::WithPaths);

        assert_eq!(listing.matched_paths, 1);
        assert_eq!(listing.items[0].rules[0].paths[0].path, "/café");
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!("all".parse::<IngressInclusionPolicy>(), Ok(IngressInclusionPolicy::All));
        assert_eq!("WITH_PATHS".parse::<IngressInclusionPolicy>(), Ok(IngressInclusionPolicy::WithPaths));
        assert!("some".parse::<IngressInclusionPolicy>().is_err());
    }

    #[derive(Default)]
    struct MockIngressReader {
        items: Vec<Ingress>,
        fail: bool,
        namespaces: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl IngressReader for MockIngressReader {
        async fn list_ingresses(&self, namespace: Option<&str>) -> Result<Vec<Ingress>> {
            self.namespaces
                .lock()
                .unwrap()
                .push(namespace.map(str::to_owned));
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(self.items.clone())
        }
    }

    #[tokio::test]
    async fn empty_namespace_lists_all_namespaces() {
        let reader = Arc::new(MockIngressReader {
            items: sample(),
            ..Default::default()
        });
        let service = IngressService::new(reader.clone(), IngressInclusionPolicy::WithPaths);

        let out = service
            .list_ingresses(Some(""), &IngressFilter::default())
            .await
            .unwrap();
        service
            .list_ingresses(Some("web"), &IngressFilter::default())
            .await
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(
            *reader.namespaces.lock().unwrap(),
            vec![None, Some("web".to_string())]
        );
    }

    #[tokio::test]
    async fn list_failure_is_a_cluster_query_error() {
        let reader = Arc::new(MockIngressReader {
            fail: true,
            ..Default::default()
        });
        let service = IngressService::new(reader, IngressInclusionPolicy::All);

        let err = service
            .list_ingresses(None, &IngressFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ClusterQuery(ref m) if m.contains("connection refused")));
    }
}
