use axum::{Extension, extract::State};
use chrono::Utc;
use foodease_core::domain::meal_plan::{MealPlanService, entities::ScheduledMealPrep};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::{
        meal_plan::validators::ScheduleMealPrepValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
    session_middleware::SessionId,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleMealPrepResponse {
    pub data: ScheduledMealPrep,
}

#[utoipa::path(
    post,
    path = "/{session_id}/meal-prep",
    tag = "meal-plan",
    summary = "Schedule meal prep",
    description = "Creates the calendar event for the selected recipe at the chosen start time.",
    responses(
        (status = 201, body = ScheduleMealPrepResponse),
        (status = 422, description = "The slot starts too soon"),
        (status = 502, description = "The calendar rejected the event")
    ),
    params(
        ("session_id" = Uuid, Path, description = "Session ID"),
    ),
    request_body = ScheduleMealPrepValidator
)]
pub async fn schedule_meal_prep(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    ValidateJson(payload): ValidateJson<ScheduleMealPrepValidator>,
) -> Result<Response<ScheduleMealPrepResponse>, ApiError> {
    let scheduled = state
        .service
        .schedule_meal_prep(session_id, payload.into(), Utc::now())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(ScheduleMealPrepResponse { data: scheduled }))
}
