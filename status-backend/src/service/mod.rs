// status-backend/src/service/mod.rs
pub mod incident_service;
pub mod public_status_service;
pub mod service_service;
pub mod status_service;
