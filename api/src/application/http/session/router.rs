use super::handlers::{
    create_session::{__path_create_session, create_session},
    end_session::{__path_end_session, end_session},
    get_session::{__path_get_session, get_session},
};
use crate::application::{http::server::app_state::AppState, session_middleware::session_middleware};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(create_session, get_session, end_session))]
pub struct SessionApiDoc;

pub fn session_routes(state: AppState) -> Router<AppState> {
    let scoped = Router::new()
        .route(
            &format!("{}/sessions/{{session_id}}", state.args.server.root_path),
            get(get_session).delete(end_session),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route(
            &format!("{}/sessions", state.args.server.root_path),
            post(create_session),
        )
        .merge(scoped)
}
