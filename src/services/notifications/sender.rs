//! Core channel sender trait and outcome type.
//!
//! Every channel adapter converts provider responses and transport errors
//! into a [`SendOutcome`]; nothing a provider does propagates as an `Err`
//! past the sender boundary.

use async_trait::async_trait;

use super::event::{Channel, Disposition};

/// Result of one provider send attempt
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// Whether the provider accepted the message
    pub success: bool,
    /// Provider-side identifier (message id, SMS sid, calendar event id)
    pub provider_message_id: Option<String>,
    /// Provider or transport error description on failure
    pub error: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

impl SendOutcome {
    pub fn sent(provider_message_id: Option<String>, duration_ms: u64) -> Self {
        Self {
            success: true,
            provider_message_id,
            error: None,
            duration_ms,
        }
    }

    pub fn failed(error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            success: false,
            provider_message_id: None,
            error: Some(error.into()),
            duration_ms,
        }
    }
}

impl From<SendOutcome> for Disposition {
    fn from(outcome: SendOutcome) -> Self {
        if outcome.success {
            Disposition::Sent {
                provider_message_id: outcome.provider_message_id,
            }
        } else {
            Disposition::Failed {
                error: outcome
                    .error
                    .unwrap_or_else(|| "provider call failed".to_string()),
            }
        }
    }
}

/// Trait implemented by each channel adapter (email, SMS, calendar).
///
/// Payload types differ per channel, so the trait carries an associated
/// payload type instead of a lowest-common-denominator message struct.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    type Payload: Send + Sync;

    /// The channel this sender delivers on
    fn channel(&self) -> Channel;

    /// Performs the provider call. Provider and transport failures are
    /// reported through the outcome, never as a panic or error.
    async fn send(&self, payload: &Self::Payload) -> SendOutcome;
}
