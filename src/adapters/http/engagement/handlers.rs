//! HTTP handlers for the engagement endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    ClassifyMode, ClassifyProfilesCommand, ClassifyProfilesHandler,
    GenerateActivationNudgesCommand, GenerateActivationNudgesHandler, GenerateNudgesCommand,
    GenerateNudgesHandler, GetEngagementOverviewHandler, GetEngagementOverviewQuery,
};
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode};

use super::dto::{
    ActivationNudgesResponse, ClassifyResponse, ErrorResponse, GenerateNudgesResponse,
    OverviewResponse,
};

/// Shared state for the engagement router.
#[derive(Clone)]
pub struct EngagementHandlers {
    classify: Arc<ClassifyProfilesHandler>,
    general_nudges: Arc<GenerateNudgesHandler>,
    activation_nudges: Arc<GenerateActivationNudgesHandler>,
    overview: Arc<GetEngagementOverviewHandler>,
}

impl EngagementHandlers {
    pub fn new(
        classify: Arc<ClassifyProfilesHandler>,
        general_nudges: Arc<GenerateNudgesHandler>,
        activation_nudges: Arc<GenerateActivationNudgesHandler>,
        overview: Arc<GetEngagementOverviewHandler>,
    ) -> Self {
        Self {
            classify,
            general_nudges,
            activation_nudges,
            overview,
        }
    }
}

/// POST /api/engagement/classify - recompute the caller's profile
pub async fn classify_caller(
    State(handlers): State<EngagementHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = ClassifyProfilesCommand {
        mode: ClassifyMode::Caller(user.id.clone()),
    };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.classify.handle(cmd, metadata).await {
        Ok(result) => {
            let response: ClassifyResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_engagement_error(e),
    }
}

/// POST /api/engagement/classify-all - batch recompute (scheduler)
pub async fn classify_all(
    State(handlers): State<EngagementHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = ClassifyProfilesCommand {
        mode: ClassifyMode::AllProfiles,
    };
    let metadata = CommandMetadata::new(user.id).with_source("scheduler");

    match handlers.classify.handle(cmd, metadata).await {
        Ok(result) => {
            let response: ClassifyResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_engagement_error(e),
    }
}

/// POST /api/engagement/nudges - evaluate the general rule set
pub async fn generate_nudges(
    State(handlers): State<EngagementHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = GenerateNudgesCommand {
        user_id: user.id.clone(),
    };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.general_nudges.handle(cmd, metadata).await {
        Ok(result) => {
            let response: GenerateNudgesResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_engagement_error(e),
    }
}

/// POST /api/engagement/nudges/activation - evaluate the activation rule set
pub async fn generate_activation_nudges(
    State(handlers): State<EngagementHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = GenerateActivationNudgesCommand {
        user_id: user.id.clone(),
    };
    let metadata = CommandMetadata::new(user.id).with_source("api");

    match handlers.activation_nudges.handle(cmd, metadata).await {
        Ok(result) => {
            let response: ActivationNudgesResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_engagement_error(e),
    }
}

/// GET /api/engagement - read-only overview for dashboards
pub async fn engagement_overview(
    State(handlers): State<EngagementHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetEngagementOverviewQuery {
        user_id: user.id.clone(),
    };

    match handlers.overview.handle(query).await {
        Ok(Some(overview)) => {
            let response: OverviewResponse = overview.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Engagement profile", user.id.as_str())),
        )
            .into_response(),
        Err(e) => handle_engagement_error(e),
    }
}

fn handle_engagement_error(error: DomainError) -> Response {
    let status = match error.code() {
        ErrorCode::ProfileNotFound | ErrorCode::NudgeNotFound => StatusCode::NOT_FOUND,
        ErrorCode::RevisionConflict => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %error, "engagement request failed");
    }

    (
        status,
        Json(ErrorResponse::new(error.code().to_string(), error.message())),
    )
        .into_response()
}
