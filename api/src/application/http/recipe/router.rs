use super::handlers::{
    find_recipes::{__path_find_recipes, find_recipes},
    get_recipe_card::{__path_get_recipe_card, get_recipe_card},
    select_recipe::{__path_select_recipe, select_recipe},
};
use crate::application::{http::server::app_state::AppState, session_middleware::session_middleware};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(find_recipes, get_recipe_card, select_recipe))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/sessions/{{session_id}}/recipes",
                state.args.server.root_path
            ),
            get(find_recipes),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/recipes/{{recipe_id}}",
                state.args.server.root_path
            ),
            get(get_recipe_card),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/recipes/{{recipe_id}}/select",
                state.args.server.root_path
            ),
            post(select_recipe),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
}
