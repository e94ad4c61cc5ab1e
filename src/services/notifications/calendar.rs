//! Calendar event sender.
//!
//! Creates, updates, and deletes events on the workspace's primary Google
//! calendar using its stored OAuth grant. Unlike the other senders the
//! credential here is live: an expired access token is refreshed through
//! the stored refresh token and the call retried once before the attempt
//! is reported as failed. The refreshed token is kept for the lifetime of
//! this sender only; persisting rotated tokens belongs to the settings
//! layer that owns integration rows.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Instant;
use tokio::sync::Mutex;

use super::event::Channel;
use super::sender::{ChannelSender, SendOutcome};
use crate::external::client::HTTP_CLIENT;
use crate::models::CalendarProviderConfig;

/// One calendar event body
#[derive(Debug, Clone)]
pub struct CalendarEventPayload {
    pub summary: String,
    pub description: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub attendee_email: Option<String>,
}

/// Calendar channel sender
pub struct CalendarSender {
    config: CalendarProviderConfig,
    access_token: Mutex<String>,
}

impl CalendarSender {
    pub fn new(config: CalendarProviderConfig) -> Self {
        let access_token = Mutex::new(config.access_token.clone());
        Self {
            config,
            access_token,
        }
    }

    fn events_url(&self) -> String {
        format!(
            "{}/calendar/v3/calendars/primary/events",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn event_url(&self, event_id: &str) -> String {
        format!("{}/{}", self.events_url(), event_id)
    }

    fn event_body(payload: &CalendarEventPayload) -> serde_json::Value {
        let mut body = json!({
            "summary": payload.summary,
            "description": payload.description,
            "start": {
                "dateTime": payload.starts_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "timeZone": "UTC",
            },
            "end": {
                "dateTime": payload.ends_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "timeZone": "UTC",
            },
            "reminders": {
                "useDefault": false,
                "overrides": [
                    { "method": "email", "minutes": 24 * 60 },
                    { "method": "popup", "minutes": 30 },
                ],
            },
        });

        if let Some(attendee) = &payload.attendee_email {
            body["attendees"] = json!([{ "email": attendee }]);
        }

        body
    }

    /// Exchanges the refresh token for a new access token.
    async fn refresh_access_token(&self) -> Result<(), String> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", self.config.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = HTTP_CLIENT
            .post(&self.config.token_uri)
            .form(&form)
            .send()
            .await
            .map_err(|e| format!("token refresh failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!(
                "token refresh rejected with status {}",
                response.status()
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("token refresh returned invalid body: {}", e))?;
        let token = body["access_token"]
            .as_str()
            .ok_or("token refresh response had no access_token")?;

        *self.access_token.lock().await = token.to_string();
        tracing::debug!("calendar access token refreshed");
        Ok(())
    }

    /// Sends an authorized request, refreshing the access token and retrying
    /// once when the provider reports it expired.
    async fn authorized_send<F>(&self, build: F) -> Result<reqwest::Response, String>
    where
        F: Fn(String) -> reqwest::RequestBuilder,
    {
        let token = self.access_token.lock().await.clone();
        let response = build(token).send().await.map_err(|e| e.to_string())?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        self.refresh_access_token().await?;
        let token = self.access_token.lock().await.clone();
        build(token).send().await.map_err(|e| e.to_string())
    }

    /// Inserts an event on the primary calendar.
    pub async fn create_event(&self, payload: &CalendarEventPayload) -> SendOutcome {
        let start = Instant::now();
        let body = Self::event_body(payload);
        let url = self.events_url();

        let result = self
            .authorized_send(|token| HTTP_CLIENT.post(&url).bearer_auth(token).json(&body))
            .await;

        Self::into_outcome(result, start, true).await
    }

    /// Updates an existing event.
    pub async fn update_event(
        &self,
        event_id: &str,
        payload: &CalendarEventPayload,
    ) -> SendOutcome {
        let start = Instant::now();
        let body = Self::event_body(payload);
        let url = self.event_url(event_id);

        let result = self
            .authorized_send(|token| HTTP_CLIENT.put(&url).bearer_auth(token).json(&body))
            .await;

        Self::into_outcome(result, start, true).await
    }

    /// Deletes an event from the primary calendar.
    pub async fn delete_event(&self, event_id: &str) -> SendOutcome {
        let start = Instant::now();
        let url = self.event_url(event_id);

        let result = self
            .authorized_send(|token| HTTP_CLIENT.delete(&url).bearer_auth(token))
            .await;

        Self::into_outcome(result, start, false).await
    }

    async fn into_outcome(
        result: Result<reqwest::Response, String>,
        start: Instant,
        expect_body: bool,
    ) -> SendOutcome {
        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(resp) if resp.status().is_success() => {
                let event_id = if expect_body {
                    resp.json::<serde_json::Value>()
                        .await
                        .ok()
                        .and_then(|v| v["id"].as_str().map(String::from))
                } else {
                    None
                };
                SendOutcome::sent(event_id, duration_ms)
            }
            Ok(resp) => {
                let status = resp.status();
                let detail = resp.text().await.unwrap_or_default();
                SendOutcome::failed(
                    format!("calendar provider returned {}: {}", status, detail),
                    duration_ms,
                )
            }
            Err(e) => SendOutcome::failed(e, duration_ms),
        }
    }
}

#[async_trait]
impl ChannelSender for CalendarSender {
    type Payload = CalendarEventPayload;

    fn channel(&self) -> Channel {
        Channel::Calendar
    }

    async fn send(&self, payload: &CalendarEventPayload) -> SendOutcome {
        self.create_event(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base: String) -> CalendarProviderConfig {
        CalendarProviderConfig {
            access_token: "stale-token".to_string(),
            refresh_token: "refresh-1".to_string(),
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            token_uri: format!("{}/token", base),
            api_base: base,
        }
    }

    fn payload() -> CalendarEventPayload {
        CalendarEventPayload {
            summary: "Consultation - Dana".to_string(),
            description: "Customer: Dana".to_string(),
            starts_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            ends_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            attendee_email: Some("dana@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_event_with_valid_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(header("authorization", "Bearer stale-token"))
            .and(body_partial_json(json!({
                "summary": "Consultation - Dana",
                "start": { "timeZone": "UTC" },
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "evt-1", "htmlLink": "l"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let sender = CalendarSender::new(config(server.uri()));
        let outcome = sender.create_event(&payload()).await;

        assert!(outcome.success);
        assert_eq!(outcome.provider_message_id.as_deref(), Some("evt-1"));
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_and_retried_once() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(header("authorization", "Bearer stale-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "fresh-token", "expires_in": 3599})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(header("authorization", "Bearer fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt-2"})))
            .expect(1)
            .mount(&server)
            .await;

        let sender = CalendarSender::new(config(server.uri()));
        let outcome = sender.create_event(&payload()).await;

        assert!(outcome.success);
        assert_eq!(outcome.provider_message_id.as_deref(), Some("evt-2"));
    }

    #[tokio::test]
    async fn test_failed_refresh_reports_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
            .mount(&server)
            .await;

        let sender = CalendarSender::new(config(server.uri()));
        let outcome = sender.create_event(&payload()).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("token refresh"));
    }

    #[tokio::test]
    async fn test_delete_event_succeeds_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/calendar/v3/calendars/primary/events/evt-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sender = CalendarSender::new(config(server.uri()));
        let outcome = sender.delete_event("evt-1").await;

        assert!(outcome.success);
        assert!(outcome.provider_message_id.is_none());
    }

    #[tokio::test]
    async fn test_update_event_targets_existing_event() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/calendar/v3/calendars/primary/events/evt-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "evt-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let sender = CalendarSender::new(config(server.uri()));
        let outcome = sender.update_event("evt-1", &payload()).await;

        assert!(outcome.success);
        assert_eq!(outcome.provider_message_id.as_deref(), Some("evt-1"));
    }
}
