pub mod ingress_summary;
