use axum::{
    Extension,
    extract::{Multipart, State},
};
use foodease_core::domain::fridge_analysis::{
    FridgeAnalysis, FridgeAnalysisService, value_objects::AnalyzeFridgeInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session_middleware::SessionId,
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FridgeAnalysisResponse {
    pub data: FridgeAnalysis,
}

/// Multipart form accepted by the upload endpoint.
#[derive(Debug, ToSchema)]
pub struct FridgeImageForm {
    /// JPEG or PNG photo of the fridge contents.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/{session_id}/fridge-analysis",
    tag = "fridge-analysis",
    summary = "Analyze fridge photo",
    description = "Resizes the uploaded photo, asks the vision model for an inventory and stores the result in the session. Previously fetched recipes and selections are discarded.",
    request_body(content = FridgeImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = FridgeAnalysisResponse),
        (status = 400, description = "Missing, oversized or unsupported image"),
        (status = 504, description = "The vision model did not answer in time")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
)]
pub async fn analyze_fridge(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    mut multipart: Multipart,
) -> Result<Response<FridgeAnalysisResponse>, ApiError> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }
        if data.is_empty() {
            return Err(ApiError::BadRequest("Image cannot be empty".to_string()));
        }

        image_data = Some(data.to_vec());
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let analysis = state
        .service
        .analyze_fridge(session_id, AnalyzeFridgeInput { image_data })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(FridgeAnalysisResponse { data: analysis }))
}
