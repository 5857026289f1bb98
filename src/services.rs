pub mod auth;
pub mod client_service;
pub mod contract_service;
pub mod dashboard_service;
pub mod property_service;
pub mod sale_service;
pub mod social_service;
