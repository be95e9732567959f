// Kubernetes client
pub mod kube_client;
pub mod ingresses;
pub mod deployments;
pub mod pods;
pub mod workloads;

// AWS EKS client
pub mod eks_client;
