pub mod kubeconfig_document;
pub mod nodegroup_summary;
