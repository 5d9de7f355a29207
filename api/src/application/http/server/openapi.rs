use crate::application::http::{
    fridge_analysis::router::FridgeAnalysisApiDoc, meal_plan::router::MealPlanApiDoc,
    recipe::router::RecipeApiDoc, session::router::SessionApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FoodEase API"
    ),
    paths(crate::application::http::health::handlers::health),
    nest(
        (path = "/sessions", api = SessionApiDoc),
        (path = "/sessions", api = FridgeAnalysisApiDoc),
        (path = "/sessions", api = RecipeApiDoc),
        (path = "/sessions", api = MealPlanApiDoc),
    )
)]
pub struct ApiDoc;
