//! Dispatch event and report types.
//!
//! A [`DispatchEvent`] is a transient description of a domain event handed
//! to the dispatcher by a caller that has already committed its primary
//! state change. The [`DispatchReport`] returned to the caller records what
//! happened on every channel the event kind covers, so the initiating UI
//! can tell staff whether notifications went out without the primary
//! operation ever depending on it.

use chrono::NaiveDateTime;

use crate::models::{BookingStatus, IntegrationType, MessageChannel};

/// Who a notification is addressed to
#[derive(Debug, Clone)]
pub struct Recipient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Link to a form the customer should fill in before their appointment
#[derive(Debug, Clone)]
pub struct FormLink {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
}

/// Booking data shared by the booking-related event kinds
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub service_name: String,
    pub duration_minutes: i32,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub notes: Option<String>,
}

/// Domain event consumed once by the dispatcher
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    /// A lead-capture form was submitted by a (possibly new) contact
    ContactFormSubmitted {
        workspace_id: i32,
        workspace_name: String,
        recipient: Recipient,
        conversation_id: Option<i32>,
    },
    /// A booking row was committed
    BookingCreated {
        workspace_id: i32,
        workspace_name: String,
        recipient: Recipient,
        conversation_id: Option<i32>,
        booking: BookingDetails,
        /// Active forms for the workspace, gathered by the caller
        forms: Vec<FormLink>,
    },
    /// A booking status changed and the caller asked for a notification
    BookingStatusChanged {
        workspace_id: i32,
        workspace_name: String,
        recipient: Recipient,
        conversation_id: Option<i32>,
        booking: BookingDetails,
        status: BookingStatus,
    },
    /// A staff member was invited to the workspace
    StaffInvited {
        workspace_id: i32,
        workspace_name: String,
        recipient: Recipient,
        temporary_password: String,
        permissions: Vec<String>,
    },
    /// A booking starts roughly a day from now
    BookingReminder {
        workspace_id: i32,
        workspace_name: String,
        recipient: Recipient,
        conversation_id: Option<i32>,
        booking: BookingDetails,
    },
}

impl DispatchEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchEvent::ContactFormSubmitted { .. } => "contact_form_submitted",
            DispatchEvent::BookingCreated { .. } => "booking_created",
            DispatchEvent::BookingStatusChanged { .. } => "booking_status_changed",
            DispatchEvent::StaffInvited { .. } => "staff_invited",
            DispatchEvent::BookingReminder { .. } => "booking_reminder",
        }
    }

    pub fn workspace_id(&self) -> i32 {
        match self {
            DispatchEvent::ContactFormSubmitted { workspace_id, .. }
            | DispatchEvent::BookingCreated { workspace_id, .. }
            | DispatchEvent::BookingStatusChanged { workspace_id, .. }
            | DispatchEvent::StaffInvited { workspace_id, .. }
            | DispatchEvent::BookingReminder { workspace_id, .. } => *workspace_id,
        }
    }

    pub fn recipient(&self) -> &Recipient {
        match self {
            DispatchEvent::ContactFormSubmitted { recipient, .. }
            | DispatchEvent::BookingCreated { recipient, .. }
            | DispatchEvent::BookingStatusChanged { recipient, .. }
            | DispatchEvent::StaffInvited { recipient, .. }
            | DispatchEvent::BookingReminder { recipient, .. } => recipient,
        }
    }

    pub fn conversation_id(&self) -> Option<i32> {
        match self {
            DispatchEvent::ContactFormSubmitted {
                conversation_id, ..
            }
            | DispatchEvent::BookingCreated {
                conversation_id, ..
            }
            | DispatchEvent::BookingStatusChanged {
                conversation_id, ..
            }
            | DispatchEvent::BookingReminder {
                conversation_id, ..
            } => *conversation_id,
            DispatchEvent::StaffInvited { .. } => None,
        }
    }

    /// Channels this event kind covers, before any recipient, template, or
    /// configuration gating.
    pub fn planned_channels(&self) -> &'static [Channel] {
        match self {
            DispatchEvent::BookingCreated { .. } => {
                &[Channel::Calendar, Channel::Email, Channel::Sms]
            }
            DispatchEvent::ContactFormSubmitted { .. }
            | DispatchEvent::BookingStatusChanged { .. }
            | DispatchEvent::StaffInvited { .. }
            | DispatchEvent::BookingReminder { .. } => &[Channel::Email],
        }
    }
}

/// Notification medium
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
    Calendar,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Calendar => "calendar",
        }
    }

    /// Integration type holding this channel's credentials
    pub fn integration_type(&self) -> IntegrationType {
        match self {
            Channel::Email => IntegrationType::Email,
            Channel::Sms => IntegrationType::Sms,
            Channel::Calendar => IntegrationType::Calendar,
        }
    }

    /// Timeline channel used when logging attempts for this medium.
    ///
    /// Calendar activity has no customer-facing medium, so it lands on the
    /// system channel.
    pub fn message_channel(&self) -> MessageChannel {
        match self {
            Channel::Email => MessageChannel::Email,
            Channel::Sms => MessageChannel::Sms,
            Channel::Calendar => MessageChannel::System,
        }
    }
}

/// Why a channel was skipped without a provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No active integration of the channel's type for the workspace
    NotConfigured,
    /// The recipient lacks the address the channel needs
    NoRecipient,
    /// The event kind defines no content for this channel/state
    NoTemplate,
}

/// What happened on one channel
#[derive(Debug, Clone)]
pub enum Disposition {
    Sent {
        provider_message_id: Option<String>,
    },
    Failed {
        error: String,
    },
    Skipped {
        reason: SkipReason,
    },
}

/// Per-channel entry in a dispatch report
#[derive(Debug, Clone)]
pub struct ChannelOutcome {
    pub channel: Channel,
    pub disposition: Disposition,
}

/// Result of dispatching one event across its channels
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<ChannelOutcome>,
}

impl DispatchReport {
    /// True when at least one channel delivered successfully.
    pub fn notification_sent(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.disposition, Disposition::Sent { .. }))
    }

    /// Provider message id for a delivered channel, when present.
    ///
    /// For calendar sends this is the created event id, which the caller is
    /// responsible for persisting onto the booking row.
    pub fn provider_message_id(&self, channel: Channel) -> Option<&str> {
        self.outcomes.iter().find_map(|o| match &o.disposition {
            Disposition::Sent {
                provider_message_id,
            } if o.channel == channel => provider_message_id.as_deref(),
            _ => None,
        })
    }

    /// Outcome entry for a channel, when the event covered it.
    pub fn outcome(&self, channel: Channel) -> Option<&ChannelOutcome> {
        self.outcomes.iter().find(|o| o.channel == channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> Recipient {
        Recipient {
            name: "Dana".to_string(),
            email: Some("dana@example.com".to_string()),
            phone: None,
        }
    }

    #[test]
    fn test_booking_created_covers_all_channels() {
        let event = DispatchEvent::BookingCreated {
            workspace_id: 1,
            workspace_name: "Acme".to_string(),
            recipient: recipient(),
            conversation_id: None,
            booking: BookingDetails {
                service_name: "Consultation".to_string(),
                duration_minutes: 30,
                location: "Main office".to_string(),
                starts_at: chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap(),
                notes: None,
            },
            forms: vec![],
        };

        assert_eq!(
            event.planned_channels(),
            &[Channel::Calendar, Channel::Email, Channel::Sms]
        );
        assert_eq!(event.kind(), "booking_created");
    }

    #[test]
    fn test_staff_invites_have_no_conversation() {
        let event = DispatchEvent::StaffInvited {
            workspace_id: 1,
            workspace_name: "Acme".to_string(),
            recipient: recipient(),
            temporary_password: "temp123".to_string(),
            permissions: vec!["Manage Bookings".to_string()],
        };

        assert_eq!(event.conversation_id(), None);
        assert_eq!(event.planned_channels(), &[Channel::Email]);
    }

    #[test]
    fn test_report_notification_sent() {
        let mut report = DispatchReport::default();
        assert!(!report.notification_sent());

        report.outcomes.push(ChannelOutcome {
            channel: Channel::Email,
            disposition: Disposition::Skipped {
                reason: SkipReason::NotConfigured,
            },
        });
        assert!(!report.notification_sent());

        report.outcomes.push(ChannelOutcome {
            channel: Channel::Calendar,
            disposition: Disposition::Sent {
                provider_message_id: Some("evt-1".to_string()),
            },
        });
        assert!(report.notification_sent());
        assert_eq!(
            report.provider_message_id(Channel::Calendar),
            Some("evt-1")
        );
        assert_eq!(report.provider_message_id(Channel::Email), None);
    }
}
