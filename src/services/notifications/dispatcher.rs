//! Cross-channel notification dispatcher.
//!
//! Given a domain event whose primary state change has already been
//! committed by the caller, the dispatcher decides which channels apply,
//! fetches the workspace's provider credentials, invokes the channel
//! senders, and records the outcome on the conversation timeline. Nothing
//! that happens here can fail the caller's primary operation: every
//! internal error is folded into the per-channel disposition of the
//! returned [`DispatchReport`].

use async_trait::async_trait;
use std::sync::Arc;

use super::calendar::CalendarSender;
use super::email::{EmailPayload, EmailSender};
use super::event::{
    Channel, ChannelOutcome, DispatchEvent, DispatchReport, Disposition, SkipReason,
};
use super::sender::ChannelSender;
use super::sms::{SmsPayload, SmsSender};
use super::templates;
use crate::error::AppResult;
use crate::models::{Integration, IntegrationType, MessageChannel, ProviderConfig};

/// Read-only lookup of a workspace's active provider integrations.
///
/// Absence of an integration is a routine state for many workspaces and is
/// reported as `None`, never as an error.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_active(
        &self,
        workspace_id: i32,
        integration_type: IntegrationType,
    ) -> AppResult<Option<Integration>>;
}

/// Append-only conversation timeline.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn record(
        &self,
        conversation_id: i32,
        channel: MessageChannel,
        content: &str,
        automated: bool,
    ) -> AppResult<()>;
}

/// Notification dispatcher
#[derive(Clone)]
pub struct NotificationDispatcher {
    credentials: Arc<dyn CredentialStore>,
    activity: Arc<dyn ActivityLog>,
}

impl NotificationDispatcher {
    pub fn new(credentials: Arc<dyn CredentialStore>, activity: Arc<dyn ActivityLog>) -> Self {
        Self {
            credentials,
            activity,
        }
    }

    /// Attempts every channel the event kind covers and reports per-channel
    /// dispositions. Infallible by contract: provider failures, malformed
    /// stored credentials, and even credential-store errors surface in the
    /// report, not as an `Err`.
    pub async fn dispatch(&self, event: &DispatchEvent) -> DispatchReport {
        let mut report = DispatchReport::default();

        for &channel in event.planned_channels() {
            let disposition = self.dispatch_channel(event, channel).await;

            match &disposition {
                Disposition::Sent {
                    provider_message_id,
                } => tracing::info!(
                    kind = event.kind(),
                    workspace_id = event.workspace_id(),
                    channel = channel.as_str(),
                    provider_message_id = provider_message_id.as_deref().unwrap_or(""),
                    "notification sent"
                ),
                Disposition::Failed { error } => tracing::warn!(
                    kind = event.kind(),
                    workspace_id = event.workspace_id(),
                    channel = channel.as_str(),
                    error = %error,
                    "notification failed"
                ),
                Disposition::Skipped { reason } => tracing::debug!(
                    kind = event.kind(),
                    workspace_id = event.workspace_id(),
                    channel = channel.as_str(),
                    reason = ?reason,
                    "notification skipped"
                ),
            }

            self.log_activity(event, channel, &disposition).await;
            report.outcomes.push(ChannelOutcome {
                channel,
                disposition,
            });
        }

        report
    }

    async fn dispatch_channel(&self, event: &DispatchEvent, channel: Channel) -> Disposition {
        let recipient = event.recipient();
        match channel {
            Channel::Email if recipient.email.is_none() => {
                return Disposition::Skipped {
                    reason: SkipReason::NoRecipient,
                };
            }
            Channel::Sms if recipient.phone.is_none() => {
                return Disposition::Skipped {
                    reason: SkipReason::NoRecipient,
                };
            }
            _ => {}
        }

        let integration = match self
            .credentials
            .find_active(event.workspace_id(), channel.integration_type())
            .await
        {
            Ok(Some(integration)) => integration,
            Ok(None) => {
                return Disposition::Skipped {
                    reason: SkipReason::NotConfigured,
                };
            }
            Err(e) => {
                return Disposition::Failed {
                    error: format!("credential lookup failed: {}", e),
                };
            }
        };

        let config = match integration.provider_config() {
            Ok(config) => config,
            Err(e) => {
                return Disposition::Failed {
                    error: e.to_string(),
                };
            }
        };

        match (channel, config) {
            (Channel::Email, ProviderConfig::Email(config)) => {
                let Some(content) = templates::email_content(event) else {
                    return Disposition::Skipped {
                        reason: SkipReason::NoTemplate,
                    };
                };
                let payload = EmailPayload {
                    to_email: recipient.email.clone().unwrap_or_default(),
                    to_name: recipient.name.clone(),
                    subject: content.subject,
                    html_body: content.html,
                    from_email: None,
                    from_name: None,
                };
                EmailSender::new(config).send(&payload).await.into()
            }
            (Channel::Sms, ProviderConfig::Sms(config)) => {
                let Some(body) = templates::sms_content(event) else {
                    return Disposition::Skipped {
                        reason: SkipReason::NoTemplate,
                    };
                };
                let payload = SmsPayload {
                    to_phone: recipient.phone.clone().unwrap_or_default(),
                    body,
                };
                SmsSender::new(config).send(&payload).await.into()
            }
            (Channel::Calendar, ProviderConfig::Calendar(config)) => {
                let Some(payload) = templates::calendar_event(event) else {
                    return Disposition::Skipped {
                        reason: SkipReason::NoTemplate,
                    };
                };
                CalendarSender::new(config).send(&payload).await.into()
            }
            (channel, _) => Disposition::Failed {
                error: format!(
                    "stored integration config does not match the {} channel",
                    channel.as_str()
                ),
            },
        }
    }

    /// Appends a timeline record for attempted channels. Successful sends
    /// and failures get distinct entries so silent drops stay auditable;
    /// skipped channels leave no trace.
    async fn log_activity(
        &self,
        event: &DispatchEvent,
        channel: Channel,
        disposition: &Disposition,
    ) {
        let Some(conversation_id) = event.conversation_id() else {
            return;
        };

        let content = match disposition {
            Disposition::Sent { .. } => templates::sent_timeline_line(event, channel),
            Disposition::Failed { error } => format!(
                "Failed to send {} notification: {}",
                channel.as_str(),
                error
            ),
            Disposition::Skipped { .. } => return,
        };

        if let Err(e) = self
            .activity
            .record(conversation_id, channel.message_channel(), &content, true)
            .await
        {
            tracing::warn!(
                conversation_id,
                channel = channel.as_str(),
                error = %e,
                "failed to append activity record"
            );
        }
    }
}
