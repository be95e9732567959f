use serde::Serialize;

use crate::core::client::eks_client::{NodegroupDetail, ScalingConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeGroupSummary {
    pub name: String,
    #[serde(rename = "scalingConfig")]
    pub scaling_config: Option<ScalingConfig>,
}

impl From<NodegroupDetail> for NodeGroupSummary {
    fn from(value: NodegroupDetail) -> Self {
        Self {
            name: value.name,
            scaling_config: value.scaling_config,
        }
    }
}
