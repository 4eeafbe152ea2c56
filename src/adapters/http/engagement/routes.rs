//! Routes for the engagement endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    classify_all, classify_caller, engagement_overview, generate_activation_nudges,
    generate_nudges, EngagementHandlers,
};

/// Creates the engagement router.
pub fn engagement_routes(handlers: EngagementHandlers) -> Router {
    Router::new()
        .route("/", get(engagement_overview))
        .route("/classify", post(classify_caller))
        .route("/classify-all", post(classify_all))
        .route("/nudges", post(generate_nudges))
        .route("/nudges/activation", post(generate_activation_nudges))
        .with_state(handlers)
}
