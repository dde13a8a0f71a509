// Presentation layer - HTTP routes and HTML panels
pub mod app_state;
pub mod handlers;
pub mod router;
pub mod views;
