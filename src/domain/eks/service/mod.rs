pub mod login_service;
pub mod nodegroup_service;
