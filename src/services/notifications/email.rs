//! Transactional email sender.
//!
//! Delivers HTML email through the workspace's configured Brevo account
//! using the global `HTTP_CLIENT`.

use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;

use super::event::Channel;
use super::sender::{ChannelSender, SendOutcome};
use crate::external::client::HTTP_CLIENT;
use crate::models::EmailProviderConfig;

/// One outbound email
#[derive(Debug, Clone)]
pub struct EmailPayload {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
    /// Optional sender override; the integration's stored sender otherwise
    pub from_email: Option<String>,
    pub from_name: Option<String>,
}

/// Email channel sender
pub struct EmailSender {
    config: EmailProviderConfig,
}

impl EmailSender {
    pub fn new(config: EmailProviderConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v3/smtp/email",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChannelSender for EmailSender {
    type Payload = EmailPayload;

    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, payload: &EmailPayload) -> SendOutcome {
        let start = Instant::now();

        let from_email = payload
            .from_email
            .as_deref()
            .unwrap_or(&self.config.from_email);
        let from_name = payload
            .from_name
            .as_deref()
            .unwrap_or(&self.config.from_name);

        let body = json!({
            "sender": { "name": from_name, "email": from_email },
            "to": [{ "email": payload.to_email, "name": payload.to_name }],
            "subject": payload.subject,
            "htmlContent": payload.html_body,
        });

        let response = HTTP_CLIENT
            .post(self.endpoint())
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let message_id = resp
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|v| v["messageId"].as_str().map(String::from));
                SendOutcome::sent(message_id, duration_ms)
            }
            Ok(resp) => {
                let status = resp.status();
                let detail = resp.text().await.unwrap_or_default();
                SendOutcome::failed(
                    format!("email provider returned {}: {}", status, detail),
                    duration_ms,
                )
            }
            Err(e) => SendOutcome::failed(e.to_string(), duration_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: String) -> EmailProviderConfig {
        EmailProviderConfig {
            api_key: "key-123".to_string(),
            from_email: "bookings@glow.test".to_string(),
            from_name: "Glow Spa".to_string(),
            api_base,
        }
    }

    fn payload() -> EmailPayload {
        EmailPayload {
            to_email: "dana@example.com".to_string(),
            to_name: "Dana".to_string(),
            subject: "Booking Confirmed".to_string(),
            html_body: "<p>See you soon</p>".to_string(),
            from_email: None,
            from_name: None,
        }
    }

    #[tokio::test]
    async fn test_send_returns_provider_message_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/smtp/email"))
            .and(header("api-key", "key-123"))
            .and(body_partial_json(json!({
                "sender": { "email": "bookings@glow.test" },
                "to": [{ "email": "dana@example.com" }],
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"messageId": "msg-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = EmailSender::new(config(server.uri())).send(&payload()).await;

        assert!(outcome.success);
        assert_eq!(outcome.provider_message_id.as_deref(), Some("msg-1"));
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_rejected_key_becomes_failure_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/smtp/email"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Key not found"})),
            )
            .mount(&server)
            .await;

        let outcome = EmailSender::new(config(server.uri())).send(&payload()).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("401"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_becomes_failure_outcome() {
        // Nothing listens on this port
        let outcome = EmailSender::new(config("http://127.0.0.1:9".to_string()))
            .send(&payload())
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_sender_override_replaces_stored_sender() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/smtp/email"))
            .and(body_partial_json(json!({
                "sender": { "email": "owner@glow.test", "name": "The Owner" },
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"messageId": "msg-2"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut custom = payload();
        custom.from_email = Some("owner@glow.test".to_string());
        custom.from_name = Some("The Owner".to_string());

        let outcome = EmailSender::new(config(server.uri())).send(&custom).await;
        assert!(outcome.success);
    }
}
