use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use foodease_core::domain::fridge_analysis::FridgeAnalysisService;

use crate::application::{
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
    session_middleware::SessionId,
};

#[utoipa::path(
    get,
    path = "/{session_id}/fridge-analysis/image",
    tag = "fridge-analysis",
    summary = "Get annotated fridge photo",
    description = "Returns the processed photo of the latest analysis as JPEG, with every located item outlined. Item `pixel_box` values refer to this image.",
    responses(
        (status = 200, description = "Annotated JPEG", content_type = "image/jpeg", body = Vec<u8>),
        (status = 404, description = "No photo has been analyzed yet")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn get_analysis_image(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<Response, ApiError> {
    let image = state
        .service
        .get_analysis_image(session_id)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::ETAG, format!("\"{}\"", image.analysis_id)),
        ],
        image.jpeg,
    )
        .into_response())
}
