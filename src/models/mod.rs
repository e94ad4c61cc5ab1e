mod booking;
mod contact;
mod conversation;
mod integration;
mod service;
mod workspace;

pub use booking::{Booking, BookingStatus, ReminderCandidate};
pub use contact::Contact;
pub use conversation::{Conversation, ConversationStatus, Message, MessageChannel, NewMessage};
pub use integration::{
    CalendarProviderConfig, EmailProviderConfig, Integration, IntegrationType, ProviderConfig,
    SmsProviderConfig,
};
pub use service::Service;
pub use workspace::Workspace;
