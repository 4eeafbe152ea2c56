//! Pulsepoint service entry point.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pulsepoint::adapters::auth::JwtSessionValidator;
use pulsepoint::adapters::http::engagement::{engagement_routes, EngagementHandlers};
use pulsepoint::adapters::http::middleware::{auth_middleware, AuthState};
use pulsepoint::adapters::postgres::{PgNudgeStore, PgProfileStore};
use pulsepoint::application::handlers::{
    ClassifyProfilesHandler, GenerateActivationNudgesHandler, GenerateNudgesHandler,
    GetEngagementOverviewHandler,
};
use pulsepoint::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let profiles = Arc::new(PgProfileStore::new(pool.clone()));
    let nudges = Arc::new(PgNudgeStore::new(pool));

    let handlers = EngagementHandlers::new(
        Arc::new(ClassifyProfilesHandler::new(
            profiles.clone(),
            config.engagement.batch_page_size,
            config.engagement.batch_concurrency,
        )),
        Arc::new(GenerateNudgesHandler::new(profiles.clone(), nudges.clone())),
        Arc::new(GenerateActivationNudgesHandler::new(
            profiles.clone(),
            nudges.clone(),
        )),
        Arc::new(GetEngagementOverviewHandler::new(profiles, nudges)),
    );

    let validator: AuthState = Arc::new(JwtSessionValidator::new(&config.auth.jwt_secret));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/engagement", engagement_routes(handlers))
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "pulsepoint listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
