use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use foodease_core::domain::session::{SessionContext, SessionService};
use tracing::debug;
use uuid::Uuid;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

/// Session id taken from the request path, checked against the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Resolves `/sessions/{session_id}/...` before the handler runs.
///
/// Unknown or expired sessions are answered with 404 here, so uploads for a
/// dead session are never read. The loaded [`SessionContext`] and its
/// [`SessionId`] are stored in the request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw = extract_session_from_path(req.uri().path())
        .ok_or_else(|| ApiError::BadRequest("Missing session id".to_string()))?;

    let session_id = Uuid::parse_str(&raw)
        .map_err(|_| ApiError::BadRequest(format!("Invalid session id '{raw}'")))?;

    let session: SessionContext = state
        .service
        .get_session(session_id)
        .await
        .map_err(ApiError::from)?;

    debug!(session_id = %session_id, "session resolved");
    req.extensions_mut().insert(SessionId(session_id));
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Extract the session id from a path like "/sessions/{session_id}/..."
fn extract_session_from_path(path: &str) -> Option<String> {
    let mut parts = path.split('/').skip_while(|part| *part != "sessions");
    parts.next()?;
    parts
        .next()
        .filter(|part| !part.is_empty())
        .map(str::to_string)
}
