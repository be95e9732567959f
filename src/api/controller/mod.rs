pub mod eks;
pub mod ingress;
pub mod workload;
