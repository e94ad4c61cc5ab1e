//! SMS sender.
//!
//! Delivers text messages through the workspace's configured Twilio account
//! using the global `HTTP_CLIENT`.

use async_trait::async_trait;
use std::time::Instant;

use super::event::Channel;
use super::sender::{ChannelSender, SendOutcome};
use crate::external::client::HTTP_CLIENT;
use crate::models::SmsProviderConfig;

/// One outbound text message
#[derive(Debug, Clone)]
pub struct SmsPayload {
    /// Destination number, E.164-style
    pub to_phone: String,
    pub body: String,
}

/// SMS channel sender
pub struct SmsSender {
    config: SmsProviderConfig,
}

impl SmsSender {
    pub fn new(config: SmsProviderConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

/// Loose E.164 shape check: an optional leading `+` followed by 7-15 digits,
/// ignoring common separators.
fn looks_like_phone(number: &str) -> bool {
    let trimmed = number.strip_prefix('+').unwrap_or(number);
    let digits: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[async_trait]
impl ChannelSender for SmsSender {
    type Payload = SmsPayload;

    fn channel(&self) -> Channel {
        Channel::Sms
    }

    async fn send(&self, payload: &SmsPayload) -> SendOutcome {
        let start = Instant::now();

        if !looks_like_phone(&payload.to_phone) {
            return SendOutcome::failed(
                format!("invalid recipient phone number: {}", payload.to_phone),
                start.elapsed().as_millis() as u64,
            );
        }

        let form = [
            ("To", payload.to_phone.as_str()),
            ("From", self.config.from_phone.as_str()),
            ("Body", payload.body.as_str()),
        ];

        let response = HTTP_CLIENT
            .post(self.endpoint())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let sid = resp
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|v| v["sid"].as_str().map(String::from));
                SendOutcome::sent(sid, duration_ms)
            }
            Ok(resp) => {
                let status = resp.status();
                let detail = resp.text().await.unwrap_or_default();
                SendOutcome::failed(
                    format!("sms provider returned {}: {}", status, detail),
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
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base: String) -> SmsProviderConfig {
        SmsProviderConfig {
            account_sid: "AC123".to_string(),
            auth_token: "tok".to_string(),
            from_phone: "+15550000".to_string(),
            api_base,
        }
    }

    #[test]
    fn test_phone_shape_check() {
        assert!(looks_like_phone("+15551234567"));
        assert!(looks_like_phone("555 123-4567"));
        assert!(!looks_like_phone("not-a-number"));
        assert!(!looks_like_phone("+12"));
    }

    #[tokio::test]
    async fn test_send_posts_form_encoded_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(body_string_contains("To=%2B15551234567"))
            .and(body_string_contains("From=%2B15550000"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sid": "SM1"})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = SmsPayload {
            to_phone: "+15551234567".to_string(),
            body: "See you tomorrow".to_string(),
        };
        let outcome = SmsSender::new(config(server.uri())).send(&payload).await;

        assert!(outcome.success);
        assert_eq!(outcome.provider_message_id.as_deref(), Some("SM1"));
    }

    #[tokio::test]
    async fn test_provider_rejection_becomes_failure_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "The 'To' number is not valid"})),
            )
            .mount(&server)
            .await;

        let payload = SmsPayload {
            to_phone: "+15551234567".to_string(),
            body: "hello".to_string(),
        };
        let outcome = SmsSender::new(config(server.uri())).send(&payload).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("400"));
    }

    #[tokio::test]
    async fn test_malformed_recipient_fails_without_provider_call() {
        let server = MockServer::start().await;
        // No mock mounted: any request would 404 and be reported, but the
        // shape check fails first so the server must stay untouched.
        let payload = SmsPayload {
            to_phone: "garbage".to_string(),
            body: "hello".to_string(),
        };
        let outcome = SmsSender::new(config(server.uri())).send(&payload).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("invalid recipient"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
