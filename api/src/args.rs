use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use foodease_core::domain::{
    common::{
        CalendarConfig, FoodeaseConfig, LLMConfig, RecipeConfig, SchedulingConfig, SessionConfig,
        TimeoutConfig, entities::app_errors::CoreError,
    },
    meal_plan::ActiveWindow,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "foodease-api", version, about = "FoodEase kitchen assistant API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub recipes: RecipeArgs,

    #[command(flatten)]
    pub calendar: CalendarArgs,

    #[command(flatten)]
    pub scheduling: SchedulingArgs,

    #[command(flatten)]
    pub timeouts: TimeoutArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LLMArgs {
    #[arg(long = "gemini-api-key", env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-1.5-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub gemini_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct RecipeArgs {
    #[arg(
        long = "spoonacular-api-key",
        env = "SPOONACULAR_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub spoonacular_api_key: String,

    #[arg(
        long = "spoonacular-base-url",
        env = "SPOONACULAR_BASE_URL",
        default_value = "https://api.spoonacular.com"
    )]
    pub spoonacular_base_url: String,

    #[arg(long = "groq-api-key", env = "GROQ_API_KEY", default_value = "", hide_env_values = true)]
    pub groq_api_key: String,

    #[arg(long = "groq-model", env = "GROQ_MODEL", default_value = "mixtral-8x7b-32768")]
    pub groq_model: String,

    #[arg(long = "groq-base-url", env = "GROQ_BASE_URL", default_value = "https://api.groq.com")]
    pub groq_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CalendarArgs {
    #[arg(
        long = "calendar-client-id",
        env = "GOOGLE_CALENDAR_CLIENT_ID",
        default_value = ""
    )]
    pub client_id: String,

    #[arg(
        long = "calendar-client-secret",
        env = "GOOGLE_CALENDAR_CLIENT_SECRET",
        default_value = "",
        hide_env_values = true
    )]
    pub client_secret: String,

    #[arg(
        long = "calendar-refresh-token",
        env = "GOOGLE_CALENDAR_REFRESH_TOKEN",
        default_value = "",
        hide_env_values = true
    )]
    pub refresh_token: String,

    #[arg(long = "calendar-id", env = "GOOGLE_CALENDAR_ID", default_value = "primary")]
    pub calendar_id: String,

    #[arg(
        long = "calendar-token-url",
        env = "GOOGLE_OAUTH_TOKEN_URL",
        default_value = "https://oauth2.googleapis.com/token"
    )]
    pub token_url: String,

    #[arg(
        long = "calendar-api-base-url",
        env = "GOOGLE_CALENDAR_API_BASE_URL",
        default_value = "https://www.googleapis.com"
    )]
    pub api_base_url: String,

    /// Local UTC offset in minutes; the active window and slot labels use it.
    #[arg(
        long = "calendar-utc-offset",
        env = "CALENDAR_UTC_OFFSET_MINUTES",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SchedulingArgs {
    #[arg(long = "active-window-start", env = "ACTIVE_WINDOW_START_HOUR", default_value_t = 6)]
    pub active_window_start_hour: u32,

    #[arg(long = "active-window-end", env = "ACTIVE_WINDOW_END_HOUR", default_value_t = 22)]
    pub active_window_end_hour: u32,

    #[arg(long = "slot-buffer-minutes", env = "SLOT_BUFFER_MINUTES", default_value_t = 15)]
    pub buffer_minutes: i64,

    #[arg(long = "slot-gap-minutes", env = "SLOT_GAP_MINUTES", default_value_t = 15)]
    pub gap_minutes: i64,

    #[arg(long = "session-ttl-minutes", env = "SESSION_TTL_MINUTES", default_value_t = 120)]
    pub session_ttl_minutes: i64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct TimeoutArgs {
    #[arg(long = "analysis-timeout-secs", env = "ANALYSIS_TIMEOUT_SECS", default_value_t = 60)]
    pub analysis_secs: u64,

    #[arg(
        long = "analysis-retry-timeout-secs",
        env = "ANALYSIS_RETRY_TIMEOUT_SECS",
        default_value_t = 90
    )]
    pub analysis_retry_secs: u64,

    #[arg(long = "recipes-timeout-secs", env = "RECIPES_TIMEOUT_SECS", default_value_t = 30)]
    pub recipes_secs: u64,

    #[arg(
        long = "generation-timeout-secs",
        env = "GENERATION_TIMEOUT_SECS",
        default_value_t = 60
    )]
    pub generation_secs: u64,

    #[arg(long = "calendar-timeout-secs", env = "CALENDAR_TIMEOUT_SECS", default_value_t = 30)]
    pub calendar_secs: u64,
}

impl TryFrom<Args> for FoodeaseConfig {
    type Error = CoreError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let config = FoodeaseConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            recipes: RecipeConfig {
                spoonacular_api_key: args.recipes.spoonacular_api_key,
                spoonacular_base_url: args.recipes.spoonacular_base_url,
                groq_api_key: args.recipes.groq_api_key,
                groq_model: args.recipes.groq_model,
                groq_base_url: args.recipes.groq_base_url,
            },
            calendar: CalendarConfig {
                client_id: args.calendar.client_id,
                client_secret: args.calendar.client_secret,
                refresh_token: args.calendar.refresh_token,
                token_url: args.calendar.token_url,
                api_base_url: args.calendar.api_base_url,
                calendar_id: args.calendar.calendar_id,
            },
            scheduling: SchedulingConfig {
                active_window: ActiveWindow {
                    start_hour: args.scheduling.active_window_start_hour,
                    end_hour: args.scheduling.active_window_end_hour,
                },
                buffer_minutes: args.scheduling.buffer_minutes,
                gap_minutes: args.scheduling.gap_minutes,
                utc_offset_minutes: args.calendar.utc_offset_minutes,
            },
            timeouts: TimeoutConfig {
                analysis: Duration::from_secs(args.timeouts.analysis_secs),
                analysis_retry: Duration::from_secs(args.timeouts.analysis_retry_secs),
                recipes: Duration::from_secs(args.timeouts.recipes_secs),
                generation: Duration::from_secs(args.timeouts.generation_secs),
                calendar: Duration::from_secs(args.timeouts.calendar_secs),
            },
            session: SessionConfig {
                ttl_minutes: args.scheduling.session_ttl_minutes,
            },
        };

        config.validate()?;
        Ok(config)
    }
}
