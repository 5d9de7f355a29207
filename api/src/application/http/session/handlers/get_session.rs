use axum::Extension;
use foodease_core::domain::session::SessionContext;

use crate::application::http::{
    server::api_entities::{api_error::ApiError, response::Response},
    session::handlers::create_session::SessionResponse,
};

#[utoipa::path(
    get,
    path = "/{session_id}",
    tag = "session",
    summary = "Get session",
    description = "Returns the session context: latest analysis, fetched recipes, selection and scheduled slot.",
    responses(
        (status = 200, body = SessionResponse),
        (status = 404, description = "Unknown or expired session")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn get_session(
    Extension(session): Extension<SessionContext>,
) -> Result<Response<SessionResponse>, ApiError> {
    Ok(Response::OK(SessionResponse { data: session }))
}
