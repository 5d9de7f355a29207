use super::handlers::{
    analyze_fridge::{__path_analyze_fridge, MAX_IMAGE_SIZE, analyze_fridge},
    get_analysis::{__path_get_analysis, get_analysis},
    get_analysis_image::{__path_get_analysis_image, get_analysis_image},
};
use crate::application::{http::server::app_state::AppState, session_middleware::session_middleware};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

/// Room for the multipart framing around a maximum-size image.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_fridge, get_analysis, get_analysis_image))]
pub struct FridgeAnalysisApiDoc;

pub fn fridge_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/sessions/{{session_id}}/fridge-analysis",
                state.args.server.root_path
            ),
            post(analyze_fridge).get(get_analysis),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/fridge-analysis/image",
                state.args.server.root_path
            ),
            get(get_analysis_image),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
}
