use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info};

use crate::domain::{
    common::{deadline::with_deadline, entities::app_errors::CoreError},
    meal_plan::{entities::ScheduleRequest, ports::CalendarGateway},
};

/// Minimum lead time between now and the start of a scheduled event.
pub const MIN_LEAD_MINUTES: i64 = 1;

/// Creates one calendar event for `request`. Never retried.
pub async fn schedule<CG>(
    gateway: &CG,
    request: ScheduleRequest,
    now: DateTime<Utc>,
    budget: StdDuration,
) -> Result<String, CoreError>
where
    CG: CalendarGateway,
{
    let earliest = now + Duration::minutes(MIN_LEAD_MINUTES);
    if request.start <= earliest {
        return Err(CoreError::TooSoon {
            start: request.start,
            earliest,
        });
    }

    if request.duration_minutes <= 0 {
        return Err(CoreError::Invalid(
            "meal prep duration must be positive".to_string(),
        ));
    }

    let title = request.title.clone();
    let start = request.start;

    let event_id = with_deadline("calendar event creation", budget, async {
        gateway.create_event(request).await.map_err(|e| {
            error!("failed to create calendar event: {}", e);
            CoreError::Scheduling(e.to_string())
        })
    })
    .await?;

    info!(event_id = %event_id, title = %title, start = %start, "meal prep scheduled");
    Ok(event_id)
}
