//! HTTP endpoints for the engagement intelligence operations.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::EngagementHandlers;
pub use routes::engagement_routes;
