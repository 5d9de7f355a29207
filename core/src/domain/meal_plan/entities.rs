use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A range already occupied on the calendar, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Degenerate intervals (`start >= end`) are never used for conflicts.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && self.start < end
    }
}

/// Daily hour range eligible for scheduling, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActiveWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for ActiveWindow {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 22,
        }
    }
}

impl ActiveWindow {
    pub fn validate(&self) -> Result<(), String> {
        if self.end_hour > 24 {
            return Err(format!("end hour {} is past midnight", self.end_hour));
        }
        if self.start_hour >= self.end_hour {
            return Err(format!(
                "start hour {} must be before end hour {}",
                self.start_hour, self.end_hour
            ));
        }
        Ok(())
    }

    /// UTC bounds of the window on the local calendar day `date`.
    pub fn bounds_on(
        &self,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let midnight = date.and_time(NaiveTime::MIN).and_utc()
            - Duration::seconds(i64::from(offset.local_minus_utc()));
        (
            midnight + Duration::hours(i64::from(self.start_hour)),
            midnight + Duration::hours(i64::from(self.end_hour)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleRequest {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl ScheduleRequest {
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(self.duration_minutes)
    }
}

/// A meal-prep event accepted by the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduledMealPrep {
    pub event_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MealPrepSlots {
    pub recipe_id: i64,
    pub recipe_title: String,
    pub duration_minutes: i64,
    pub days_ahead: i64,
    pub busy_intervals: Vec<BusyInterval>,
    pub slots: Vec<CandidateSlot>,
}
