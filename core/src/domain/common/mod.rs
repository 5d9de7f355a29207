use std::time::Duration;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::{common::entities::app_errors::CoreError, meal_plan::entities::ActiveWindow};

pub mod deadline;
pub mod entities;
pub mod services;

/// Upper bound for the slot buffer and gap, one day.
pub const MAX_SCHEDULING_MINUTES: i64 = 24 * 60;

#[derive(Clone, Debug)]
pub struct FoodeaseConfig {
    pub llm: LLMConfig,
    pub recipes: RecipeConfig,
    pub calendar: CalendarConfig,
    pub scheduling: SchedulingConfig,
    pub timeouts: TimeoutConfig,
    pub session: SessionConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

#[derive(Clone, Debug)]
pub struct RecipeConfig {
    pub spoonacular_api_key: String,
    pub spoonacular_base_url: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_base_url: String,
}

#[derive(Clone, Debug)]
pub struct CalendarConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_url: String,
    pub api_base_url: String,
    pub calendar_id: String,
}

#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    pub active_window: ActiveWindow,
    pub buffer_minutes: i64,
    pub gap_minutes: i64,
    /// Offset of the user's local time. The active window and slot labels
    /// are expressed in it.
    pub utc_offset_minutes: i32,
}

impl SchedulingConfig {
    pub fn local_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            active_window: ActiveWindow::default(),
            buffer_minutes: 15,
            gap_minutes: 15,
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TimeoutConfig {
    pub analysis: Duration,
    pub analysis_retry: Duration,
    pub recipes: Duration,
    pub generation: Duration,
    pub calendar: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            analysis: Duration::from_secs(60),
            analysis_retry: Duration::from_secs(90),
            recipes: Duration::from_secs(30),
            generation: Duration::from_secs(60),
            calendar: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub ttl_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_minutes: 120 }
    }
}

impl FoodeaseConfig {
    /// Rejects blank credentials and impossible scheduling settings.
    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            ("GOOGLE_API_KEY", &self.llm.gemini_api_key),
            ("SPOONACULAR_API_KEY", &self.recipes.spoonacular_api_key),
            ("GROQ_API_KEY", &self.recipes.groq_api_key),
            ("GOOGLE_CALENDAR_CLIENT_ID", &self.calendar.client_id),
            ("GOOGLE_CALENDAR_CLIENT_SECRET", &self.calendar.client_secret),
            ("GOOGLE_CALENDAR_REFRESH_TOKEN", &self.calendar.refresh_token),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(CoreError::Configuration(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )));
        }

        self.scheduling
            .active_window
            .validate()
            .map_err(CoreError::Configuration)?;

        for (name, minutes) in [
            ("buffer", self.scheduling.buffer_minutes),
            ("gap", self.scheduling.gap_minutes),
        ] {
            if !(0..=MAX_SCHEDULING_MINUTES).contains(&minutes) {
                return Err(CoreError::Configuration(format!(
                    "{name} of {minutes} minutes must be between 0 and {MAX_SCHEDULING_MINUTES}"
                )));
            }
        }

        let offset = self
            .scheduling
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt);
        if offset.is_none() {
            return Err(CoreError::Configuration(format!(
                "utc offset of {} minutes is out of range",
                self.scheduling.utc_offset_minutes
            )));
        }

        if self.session.ttl_minutes <= 0 {
            return Err(CoreError::Configuration(
                "session ttl must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn config() -> FoodeaseConfig {
        FoodeaseConfig {
            llm: LLMConfig {
                gemini_api_key: "gemini-key".to_string(),
                gemini_model: "gemini-1.5-flash".to_string(),
                gemini_base_url: "http://localhost".to_string(),
            },
            recipes: RecipeConfig {
                spoonacular_api_key: "spoon-key".to_string(),
                spoonacular_base_url: "http://localhost".to_string(),
                groq_api_key: "groq-key".to_string(),
                groq_model: "mixtral-8x7b-32768".to_string(),
                groq_base_url: "http://localhost".to_string(),
            },
            calendar: CalendarConfig {
                client_id: "client-id".to_string(),
                client_secret: "client-secret".to_string(),
                refresh_token: "refresh-token".to_string(),
                token_url: "http://localhost/token".to_string(),
                api_base_url: "http://localhost".to_string(),
                calendar_id: "primary".to_string(),
            },
            scheduling: SchedulingConfig::default(),
            timeouts: TimeoutConfig::default(),
            session: SessionConfig::default(),
        }
    }
}
