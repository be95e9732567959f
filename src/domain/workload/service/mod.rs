pub mod restart_service;
