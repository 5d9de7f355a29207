use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::{BusyInterval, MealPrepSlots, ScheduleRequest, ScheduledMealPrep},
        value_objects::{FindSlotsInput, ScheduleMealPrepInput},
    },
};

/// Remote calendar holding the user's existing commitments.
///
/// Results of `list_busy` may lag behind recent `create_event` calls; an
/// empty list means no known conflicts.
#[cfg_attr(test, mockall::automock)]
pub trait CalendarGateway: Send + Sync {
    fn list_busy(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<BusyInterval>, CoreError>> + Send;

    /// Returns the identifier of the created event.
    fn create_event(
        &self,
        request: ScheduleRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MealPlanService: Send + Sync {
    fn find_meal_prep_slots(
        &self,
        session_id: Uuid,
        input: FindSlotsInput,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<MealPrepSlots, CoreError>> + Send;

    fn schedule_meal_prep(
        &self,
        session_id: Uuid,
        input: ScheduleMealPrepInput,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<ScheduledMealPrep, CoreError>> + Send;
}
