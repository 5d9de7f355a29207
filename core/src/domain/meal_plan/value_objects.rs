use chrono::{DateTime, Utc};

/// Look-ahead choices offered to the user are 7, 14 and 21 days.
pub const MAX_DAYS_AHEAD: i64 = 21;
pub const DEFAULT_DAYS_AHEAD: i64 = 7;

#[derive(Debug, Clone)]
pub struct FindSlotsInput {
    pub days_ahead: i64,
}

#[derive(Debug, Clone)]
pub struct ScheduleMealPrepInput {
    pub start: DateTime<Utc>,
}
