// Application layer - Use cases over the backend contract
pub mod csv_export;
pub mod dashboard_service;
pub mod fallback;
pub mod hotspot_service;
pub mod list_query;
pub mod market_repository;
pub mod mock;
pub mod rotation_service;
