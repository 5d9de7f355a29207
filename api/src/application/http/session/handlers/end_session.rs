use axum::{Extension, extract::State};
use foodease_core::domain::session::SessionService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session_middleware::SessionId,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EndSessionResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/{session_id}",
    tag = "session",
    summary = "End session",
    description = "Discards the session and everything stored in it.",
    responses(
        (status = 200, body = EndSessionResponse)
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn end_session(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<Response<EndSessionResponse>, ApiError> {
    state
        .service
        .end_session(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(EndSessionResponse {
        message: "Session ended successfully".to_string(),
    }))
}
