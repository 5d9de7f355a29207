use axum::extract::State;
use foodease_core::domain::session::{SessionContext, SessionService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SessionResponse {
    pub data: SessionContext,
}

#[utoipa::path(
    post,
    path = "",
    tag = "session",
    summary = "Create session",
    description = "Starts an empty session. Every other call is scoped to the returned session id.",
    responses(
        (status = 201, body = SessionResponse)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let session = state
        .service
        .create_session()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(SessionResponse { data: session }))
}
