use axum::{Extension, extract::State};
use chrono::Utc;
use foodease_core::domain::meal_plan::{MealPlanService, entities::MealPrepSlots};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::{
        meal_plan::validators::FindSlotsParams,
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
pub struct FindSlotsResponse {
    pub data: MealPrepSlots,
}

#[utoipa::path(
    get,
    path = "/{session_id}/meal-prep/slots",
    tag = "meal-plan",
    summary = "Find meal-prep slots",
    description = "Proposes free calendar windows long enough to cook the selected recipe.",
    responses(
        (status = 200, body = FindSlotsResponse),
        (status = 404, description = "No recipe selected"),
        (status = 502, description = "Calendar lookup failed")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
        FindSlotsParams
    ),
)]
pub async fn find_slots(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    ValidateQuery(params): ValidateQuery<FindSlotsParams>,
) -> Result<Response<FindSlotsResponse>, ApiError> {
    let slots = state
        .service
        .find_meal_prep_slots(session_id, params.into(), Utc::now())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(FindSlotsResponse { data: slots }))
}
