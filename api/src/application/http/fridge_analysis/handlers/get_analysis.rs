use axum::{Extension, extract::State};
use foodease_core::domain::fridge_analysis::FridgeAnalysisService;

use crate::application::{
    http::{
        fridge_analysis::handlers::analyze_fridge::FridgeAnalysisResponse,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    session_middleware::SessionId,
};

#[utoipa::path(
    get,
    path = "/{session_id}/fridge-analysis",
    tag = "fridge-analysis",
    summary = "Get fridge analysis",
    description = "Returns the latest analysis stored in the session.",
    responses(
        (status = 200, body = FridgeAnalysisResponse),
        (status = 404, description = "No photo has been analyzed yet")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<Response<FridgeAnalysisResponse>, ApiError> {
    let analysis = state
        .service
        .get_analysis(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(FridgeAnalysisResponse { data: analysis }))
}
