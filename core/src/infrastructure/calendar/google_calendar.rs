//! Google Calendar v3 gateway.
//!
//! Access tokens come from the OAuth refresh-token grant and are reused
//! until shortly before they expire.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{
    common::{CalendarConfig, entities::app_errors::CoreError},
    meal_plan::{
        entities::{BusyInterval, ScheduleRequest},
        ports::CalendarGateway,
    },
};

const SERVICE: &str = "google calendar";
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;
const MAX_TOKEN_LIFETIME_SECS: i64 = 24 * 3600;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct GoogleCalendarGateway {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: String,
    api_base_url: String,
    calendar_id: String,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: String,
    time_max: String,
    time_zone: &'static str,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Debug, Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Debug, Default, Deserialize)]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<RawBusy>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawBusy {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct CreatedEvent {
    id: String,
}

impl GoogleCalendarGateway {
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            client_id: config.client_id,
            client_secret: config.client_secret,
            refresh_token: config.refresh_token,
            token_url: config.token_url,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            calendar_id: config.calendar_id,
            client: Client::new(),
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, CoreError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) > now {
                return Ok(token.access_token.clone());
            }
        }

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OAuth token request failed: {}", e);
                CoreError::upstream(SERVICE, format!("token request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OAuth token refresh rejected: {} - {}", status, error_text);
            return Err(CoreError::upstream(
                SERVICE,
                format!("token refresh returned {status}: {error_text}"),
            ));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OAuth token response: {}", e);
            CoreError::upstream(SERVICE, format!("unreadable token response: {e}"))
        })?;

        debug!(expires_in = token.expires_in, "calendar access token refreshed");
        let lifetime = token.expires_in.clamp(0, MAX_TOKEN_LIFETIME_SECS);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: now + Duration::seconds(lifetime),
        });

        Ok(token.access_token)
    }

    async fn forget_token(&self) {
        *self.token.lock().await = None;
    }

    fn events_url(&self) -> Result<Url, CoreError> {
        let mut url = Url::parse(&format!("{}/calendar/v3/calendars", self.api_base_url))
            .map_err(|e| CoreError::Configuration(format!("invalid calendar base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| CoreError::Configuration("calendar base url cannot be a base".to_string()))?
            .push(&self.calendar_id)
            .push("events");
        Ok(url)
    }

    async fn post_json<T>(&self, url: Url, body: serde_json::Value) -> Result<T, CoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let access_token = self.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Google Calendar request failed: {}", e);
                CoreError::upstream(SERVICE, format!("request failed: {e}"))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.forget_token().await;
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Google Calendar API error: {} - {}", status, error_text);
            return Err(CoreError::upstream(
                SERVICE,
                format!("returned {status}: {error_text}"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse Google Calendar response: {}", e);
            CoreError::upstream(SERVICE, format!("unreadable response: {e}"))
        })
    }
}

fn parse_busy(raw: RawBusy) -> Option<BusyInterval> {
    let start = DateTime::parse_from_rfc3339(&raw.start).ok()?;
    let end = DateTime::parse_from_rfc3339(&raw.end).ok()?;
    Some(BusyInterval::new(
        start.with_timezone(&Utc),
        end.with_timezone(&Utc),
    ))
}

impl CalendarGateway for GoogleCalendarGateway {
    async fn list_busy(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>, CoreError> {
        let url = Url::parse(&format!("{}/calendar/v3/freeBusy", self.api_base_url))
            .map_err(|e| CoreError::Configuration(format!("invalid calendar base url: {e}")))?;
        let request = FreeBusyRequest {
            time_min: time_min.to_rfc3339(),
            time_max: time_max.to_rfc3339(),
            time_zone: "UTC",
            items: vec![FreeBusyItem {
                id: &self.calendar_id,
            }],
        };
        let body = serde_json::to_value(&request).map_err(|e| {
            tracing::error!("Failed to serialize free/busy request: {}", e);
            CoreError::InternalServerError
        })?;

        let mut response: FreeBusyResponse = self.post_json(url, body).await?;
        let calendar = response
            .calendars
            .remove(&self.calendar_id)
            .unwrap_or_default();

        if !calendar.errors.is_empty() {
            warn!(
                calendar_id = %self.calendar_id,
                errors = ?calendar.errors,
                "free/busy answered with calendar errors, treating as no known conflicts"
            );
        }

        let total = calendar.busy.len();
        let busy: Vec<BusyInterval> = calendar.busy.into_iter().filter_map(parse_busy).collect();
        if busy.len() < total {
            warn!(
                skipped = total - busy.len(),
                "skipping busy entries with unreadable timestamps"
            );
        }

        Ok(busy)
    }

    async fn create_event(&self, request: ScheduleRequest) -> Result<String, CoreError> {
        let body = json!({
            "summary": request.title,
            "description": request.description,
            "start": {
                "dateTime": request.start.to_rfc3339(),
                "timeZone": "UTC",
            },
            "end": {
                "dateTime": request.end().to_rfc3339(),
                "timeZone": "UTC",
            },
            "reminders": { "useDefault": true },
        });

        let created: CreatedEvent = self.post_json(self.events_url()?, body).await?;
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, body_string_contains, header, method, path},
    };

    use super::*;

    fn gateway(server: &MockServer) -> GoogleCalendarGateway {
        GoogleCalendarGateway::new(CalendarConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            refresh_token: "refresh-token".to_string(),
            token_url: format!("{}/token", server.uri()),
            api_base_url: server.uri(),
            calendar_id: "primary".to_string(),
        })
    }

    async fn mount_token(server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-1",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_list_busy_converts_to_utc_and_reuses_token() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/calendar/v3/freeBusy"))
            .and(header("authorization", "Bearer access-1"))
            .and(body_partial_json(json!({"items": [{"id": "primary"}], "timeZone": "UTC"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "calendar#freeBusy",
                "calendars": {
                    "primary": {
                        "busy": [
                            {"start": "2026-10-19T12:00:00Z", "end": "2026-10-19T13:00:00Z"},
                            {"start": "2026-10-19T16:00:00+02:00", "end": "2026-10-19T17:30:00+02:00"},
                            {"start": "tomorrow", "end": "later"}
                        ]
                    }
                }
            })))
            .expect(2)
            .mount(&server)
            .await;
        let gateway = gateway(&server);

        let busy = gateway.list_busy(at(0, 0), at(23, 0)).await.unwrap();
        gateway.list_busy(at(0, 0), at(23, 0)).await.unwrap();

        assert_eq!(
            busy,
            vec![
                BusyInterval::new(at(12, 0), at(13, 0)),
                BusyInterval::new(at(14, 0), at(15, 30)),
            ]
        );
    }

    #[tokio::test]
    async fn test_calendar_errors_mean_no_known_conflicts() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/calendar/v3/freeBusy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "calendars": {"primary": {"errors": [{"domain": "global", "reason": "notFound"}]}}
            })))
            .mount(&server)
            .await;

        let busy = gateway(&server).list_busy(at(0, 0), at(23, 0)).await.unwrap();

        assert!(busy.is_empty());
    }

    #[tokio::test]
    async fn test_create_event_posts_meal_prep() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(header("authorization", "Bearer access-1"))
            .and(body_partial_json(json!({
                "summary": "Meal Prep: Shakshuka",
                "description": "Preparing Shakshuka",
                "start": {"dateTime": "2026-10-19T18:00:00+00:00", "timeZone": "UTC"},
                "end": {"dateTime": "2026-10-19T18:40:00+00:00", "timeZone": "UTC"},
                "reminders": {"useDefault": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "evt-abc",
                "status": "confirmed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let event_id = gateway(&server)
            .create_event(ScheduleRequest {
                title: "Meal Prep: Shakshuka".to_string(),
                description: "Preparing Shakshuka".to_string(),
                start: at(18, 0),
                duration_minutes: 40,
            })
            .await
            .unwrap();

        assert_eq!(event_id, "evt-abc");
    }

    #[tokio::test]
    async fn test_rejected_refresh_token_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
            .mount(&server)
            .await;

        let result = gateway(&server).list_busy(at(0, 0), at(23, 0)).await;

        match result {
            Err(CoreError::Upstream { service, message }) => {
                assert_eq!(service, "google calendar");
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_response_drops_cached_token() {
        let server = MockServer::start().await;
        mount_token(&server, 2).await;
        Mock::given(method("POST"))
            .and(path("/calendar/v3/freeBusy"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        let gateway = gateway(&server);

        assert!(gateway.list_busy(at(0, 0), at(23, 0)).await.is_err());
        assert!(gateway.list_busy(at(0, 0), at(23, 0)).await.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_token_lifetime_is_clamped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-long",
                "expires_in": i64::MAX
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/calendar/v3/freeBusy"))
            .and(header("authorization", "Bearer access-long"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"calendars": {}})))
            .expect(2)
            .mount(&server)
            .await;
        let gateway = gateway(&server);

        gateway.list_busy(at(0, 0), at(23, 0)).await.unwrap();
        gateway.list_busy(at(0, 0), at(23, 0)).await.unwrap();

        let cached = gateway.token.lock().await.clone().unwrap();
        assert!(cached.expires_at <= Utc::now() + Duration::seconds(MAX_TOKEN_LIFETIME_SECS));
    }
}
