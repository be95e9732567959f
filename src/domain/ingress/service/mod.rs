pub mod ingress_service;
