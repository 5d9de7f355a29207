//! Candidate meal-prep windows around existing calendar commitments.
//!
//! Each local day of the look-ahead horizon is scanned from the start of the
//! active window in steps of `duration + gap`. A candidate is kept when it
//! does not intersect any busy interval. The local offset places the window
//! and shapes the label; every comparison happens in UTC.

use chrono::{DateTime, Days, Duration, DurationRound, FixedOffset, Offset, Utc};
use tracing::warn;

use crate::domain::{
    common::SchedulingConfig,
    meal_plan::entities::{ActiveWindow, BusyInterval, CandidateSlot},
};

#[derive(Debug, Clone)]
pub struct SlotFinder {
    active_window: ActiveWindow,
    buffer_minutes: i64,
    gap_minutes: i64,
    local_offset: FixedOffset,
}

impl SlotFinder {
    pub fn new(active_window: ActiveWindow, buffer_minutes: i64, gap_minutes: i64) -> Self {
        Self {
            active_window,
            buffer_minutes,
            gap_minutes,
            local_offset: Utc.fix(),
        }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self::new(
            config.active_window,
            config.buffer_minutes,
            config.gap_minutes,
        )
        .with_local_offset(config.local_offset())
    }

    pub fn with_local_offset(mut self, offset: FixedOffset) -> Self {
        self.local_offset = offset;
        self
    }

    /// Earliest instant a slot may start.
    pub fn earliest_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::minutes(self.buffer_minutes)
    }

    pub fn find_slots(
        &self,
        duration_minutes: i64,
        days_ahead: i64,
        busy_intervals: &[BusyInterval],
        now: DateTime<Utc>,
    ) -> Vec<CandidateSlot> {
        if duration_minutes <= 0 || days_ahead <= 0 {
            return Vec::new();
        }

        let busy: Vec<BusyInterval> = busy_intervals
            .iter()
            .filter(|interval| {
                if interval.is_valid() {
                    true
                } else {
                    warn!(
                        start = %interval.start,
                        end = %interval.end,
                        "skipping malformed busy interval"
                    );
                    false
                }
            })
            .copied()
            .collect();

        let duration = Duration::minutes(duration_minutes);
        let step = duration + Duration::minutes(self.gap_minutes);
        let earliest = self.earliest_start(now);
        let horizon = now + Duration::days(days_ahead);

        let today = now.with_timezone(&self.local_offset).date_naive();
        let mut slots = Vec::new();
        for day in 0..days_ahead as u64 {
            let Some(date) = today.checked_add_days(Days::new(day)) else {
                break;
            };
            let (day_start, day_end) = self.active_window.bounds_on(date, self.local_offset);

            let mut cursor = ceil_to_minute(day_start.max(earliest));
            while cursor + duration <= day_end {
                let end = cursor + duration;
                if !busy.iter().any(|interval| interval.overlaps(cursor, end)) {
                    slots.push((cursor, end));
                }
                cursor += step;
            }
        }

        slots
            .into_iter()
            .filter(|(start, end)| *start >= earliest && *end <= horizon)
            .map(|(start, end)| CandidateSlot {
                start,
                end,
                duration_minutes,
                label: self.label(start, end),
            })
            .collect()
    }

    fn label(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        let start = start.with_timezone(&self.local_offset);
        let end = end.with_timezone(&self.local_offset);
        format!(
            "{} - {} (UTC{})",
            start.format("%a %b %-d, %H:%M"),
            end.format("%H:%M"),
            start.format("%:z")
        )
    }
}

/// Slots start on whole minutes.
fn ceil_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    match instant.duration_trunc(Duration::minutes(1)) {
        Ok(truncated) if truncated < instant => truncated + Duration::minutes(1),
        _ => instant,
    }
}
