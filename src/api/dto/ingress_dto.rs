//! Ingress API DTOs

use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct IngressListQuery {
    pub namespace: Option<String>,
    pub path: Option<String>,
    pub service: Option<String>,
}
