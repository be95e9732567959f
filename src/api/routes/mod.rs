//! API route declarations (e.g., /api/v1/*)

pub mod eks_routes;
pub mod ingress_routes;
pub mod workload_routes;
