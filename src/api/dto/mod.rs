pub mod eks_dto;
pub mod ingress_dto;
pub mod workload_dto;
