use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    common::{deadline::with_deadline, entities::app_errors::CoreError, services::Service},
    fridge_analysis::ports::LLMClient,
    meal_plan::{
        entities::{MealPrepSlots, ScheduleRequest, ScheduledMealPrep},
        ports::{CalendarGateway, MealPlanService},
        scheduler::schedule,
        slot_finder::SlotFinder,
        value_objects::{FindSlotsInput, MAX_DAYS_AHEAD, ScheduleMealPrepInput},
    },
    recipe::{
        entities::SelectedRecipe,
        ports::{ChatCompletionClient, RecipeSearchClient},
    },
    session::{entities::SessionContext, ports::SessionRepository},
};

fn selected_recipe(session: &SessionContext) -> Result<SelectedRecipe, CoreError> {
    session
        .selected_recipe
        .clone()
        .ok_or_else(|| CoreError::NotFound("selected recipe".to_string()))
}

impl<LLM, RS, CC, CG, SR> MealPlanService for Service<LLM, RS, CC, CG, SR>
where
    LLM: LLMClient,
    RS: RecipeSearchClient,
    CC: ChatCompletionClient,
    CG: CalendarGateway,
    SR: SessionRepository,
{
    async fn find_meal_prep_slots(
        &self,
        session_id: Uuid,
        input: FindSlotsInput,
        now: DateTime<Utc>,
    ) -> Result<MealPrepSlots, CoreError> {
        if !(1..=MAX_DAYS_AHEAD).contains(&input.days_ahead) {
            return Err(CoreError::Invalid(format!(
                "days ahead must be between 1 and {MAX_DAYS_AHEAD}"
            )));
        }

        let session = self.load_session(session_id, now).await?;
        let recipe = selected_recipe(&session)?;

        let time_max = now + Duration::days(input.days_ahead);
        let busy_intervals = with_deadline(
            "calendar free/busy lookup",
            self.timeouts.calendar,
            self.calendar_gateway.list_busy(now, time_max),
        )
        .await?;
        debug!(busy = busy_intervals.len(), "busy intervals fetched");

        let slots = SlotFinder::from_config(&self.scheduling).find_slots(
            recipe.prep_minutes,
            input.days_ahead,
            &busy_intervals,
            now,
        );
        info!(
            recipe_id = recipe.recipe_id,
            days_ahead = input.days_ahead,
            slots = slots.len(),
            "meal prep slots computed"
        );

        Ok(MealPrepSlots {
            recipe_id: recipe.recipe_id,
            recipe_title: recipe.title,
            duration_minutes: recipe.prep_minutes,
            days_ahead: input.days_ahead,
            busy_intervals,
            slots,
        })
    }

    async fn schedule_meal_prep(
        &self,
        session_id: Uuid,
        input: ScheduleMealPrepInput,
        now: DateTime<Utc>,
    ) -> Result<ScheduledMealPrep, CoreError> {
        let session = self.load_session(session_id, now).await?;
        let recipe = selected_recipe(&session)?;

        let request = ScheduleRequest {
            title: format!("Meal Prep: {}", recipe.title),
            description: format!("Preparing {}", recipe.title),
            start: input.start,
            duration_minutes: recipe.prep_minutes,
        };
        let end = request.end();
        let title = request.title.clone();

        let event_id = schedule(
            self.calendar_gateway.as_ref(),
            request,
            now,
            self.timeouts.calendar,
        )
        .await?;

        let scheduled = ScheduledMealPrep {
            event_id,
            title,
            start: input.start,
            end,
            duration_minutes: recipe.prep_minutes,
        };
        let chosen = scheduled.clone();
        let stored = self
            .update_session(session_id, move |session| {
                if session.selected_recipe.as_ref() == Some(&recipe) {
                    session.chosen_slot = Some(chosen);
                }
            })
            .await?;
        if stored.chosen_slot.as_ref() != Some(&scheduled) {
            warn!(
                session_id = %session_id,
                event_id = %scheduled.event_id,
                "selected recipe changed while scheduling, slot not recorded"
            );
        }

        Ok(scheduled)
    }
}
