use axum::{Extension, extract::State};
use foodease_core::domain::recipe::{RecipeService, RecipeSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::{
        recipe::validators::FindRecipesParams,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateQuery},
                response::Response,
            },
            app_state::AppState,
        },
    },
    session_middleware::SessionId,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FindRecipesResponse {
    pub data: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/{session_id}/recipes",
    tag = "recipe",
    summary = "Find recipes",
    description = "Matches the ingredients of the latest fridge analysis against the recipe database. Repeating the same query returns the stored results.",
    responses(
        (status = 200, body = FindRecipesResponse),
        (status = 404, description = "No fridge analysis in the session"),
        (status = 502, description = "Recipe search failed")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
        FindRecipesParams
    ),
)]
pub async fn find_recipes(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    ValidateQuery(params): ValidateQuery<FindRecipesParams>,
) -> Result<Response<FindRecipesResponse>, ApiError> {
    let recipes = state
        .service
        .find_recipes(session_id, params.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(FindRecipesResponse { data: recipes }))
}
