//! Cross-channel notification dispatch.
//!
//! The dispatcher, its channel senders, and the seams they talk through:
//! a credential store for per-workspace provider integrations and an
//! activity log for conversation timelines.

pub mod calendar;
pub mod dispatcher;
pub mod email;
pub mod event;
pub mod sender;
pub mod sms;
pub mod templates;

pub use calendar::{CalendarEventPayload, CalendarSender};
pub use dispatcher::{ActivityLog, CredentialStore, NotificationDispatcher};
pub use email::{EmailPayload, EmailSender};
pub use event::{
    BookingDetails, Channel, ChannelOutcome, DispatchEvent, DispatchReport, Disposition,
    FormLink, Recipient, SkipReason,
};
pub use sender::{ChannelSender, SendOutcome};
pub use sms::{SmsPayload, SmsSender};
