use axum::{
    Extension,
    extract::{Path, State},
};
use foodease_core::domain::recipe::{RecipeCard, RecipeService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session_middleware::SessionId,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeCardResponse {
    pub data: RecipeCard,
}

#[utoipa::path(
    get,
    path = "/{session_id}/recipes/{recipe_id}",
    tag = "recipe",
    summary = "Get recipe card",
    description = "Generates the recipe text for one of the fetched recipes and returns it with its key information parsed.",
    responses(
        (status = 200, body = RecipeCardResponse),
        (status = 404, description = "Recipe is not part of the last search"),
        (status = 504, description = "Generation did not finish in time")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
        ("recipe_id" = i64, Path, description = "Recipe ID"),
    ),
)]
pub async fn get_recipe_card(
    Path((_, recipe_id)): Path<(Uuid, i64)>,
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<Response<RecipeCardResponse>, ApiError> {
    let card = state
        .service
        .get_recipe_card(session_id, recipe_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RecipeCardResponse { data: card }))
}
