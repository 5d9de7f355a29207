use super::handlers::{
    find_slots::{__path_find_slots, find_slots},
    schedule_meal_prep::{__path_schedule_meal_prep, schedule_meal_prep},
};
use crate::application::{http::server::app_state::AppState, session_middleware::session_middleware};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(find_slots, schedule_meal_prep))]
pub struct MealPlanApiDoc;

pub fn meal_plan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/sessions/{{session_id}}/meal-prep/slots",
                state.args.server.root_path
            ),
            get(find_slots),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/meal-prep",
                state.args.server.root_path
            ),
            post(schedule_meal_prep),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
}
