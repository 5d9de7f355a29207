use axum::{
    Extension,
    extract::{Path, State},
};
use foodease_core::domain::recipe::{RecipeService, entities::SelectedRecipe};
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
pub struct SelectRecipeResponse {
    pub data: SelectedRecipe,
}

#[utoipa::path(
    post,
    path = "/{session_id}/recipes/{recipe_id}/select",
    tag = "recipe",
    summary = "Select recipe",
    description = "Marks a fetched recipe for meal prep. Its preparation time becomes the slot duration.",
    responses(
        (status = 200, body = SelectRecipeResponse),
        (status = 404, description = "Recipe is not part of the last search")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
        ("recipe_id" = i64, Path, description = "Recipe ID"),
    ),
)]
pub async fn select_recipe(
    Path((_, recipe_id)): Path<(Uuid, i64)>,
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<Response<SelectRecipeResponse>, ApiError> {
    let selected = state
        .service
        .select_recipe(session_id, recipe_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SelectRecipeResponse { data: selected }))
}
