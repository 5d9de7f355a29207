use chrono::{DateTime, Utc};
use foodease_core::domain::meal_plan::value_objects::{
    DEFAULT_DAYS_AHEAD, FindSlotsInput, ScheduleMealPrepInput,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct FindSlotsParams {
    /// Look-ahead horizon in days; the UI offers 7, 14 and 21.
    #[schema(example = 7)]
    #[validate(range(min = 1, max = 21, message = "days_ahead must be between 1 and 21"))]
    pub days_ahead: Option<i64>,
}

impl From<FindSlotsParams> for FindSlotsInput {
    fn from(params: FindSlotsParams) -> Self {
        FindSlotsInput {
            days_ahead: params.days_ahead.unwrap_or(DEFAULT_DAYS_AHEAD),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct ScheduleMealPrepValidator {
    /// Start of one of the proposed slots.
    #[schema(example = "2026-10-20T18:00:00Z")]
    pub start: DateTime<Utc>,
}

impl From<ScheduleMealPrepValidator> for ScheduleMealPrepInput {
    fn from(payload: ScheduleMealPrepValidator) -> Self {
        ScheduleMealPrepInput {
            start: payload.start,
        }
    }
}
