//! Per-event content rendering.
//!
//! Pure functions from a dispatch event to channel-specific content. An
//! event kind with no content for a channel (or for a particular booking
//! status) renders to `None`, which the dispatcher reports as a skipped
//! channel rather than a failure.

use chrono::{Duration, NaiveDateTime};
use std::fmt::Write;

use super::calendar::CalendarEventPayload;
use super::event::{Channel, DispatchEvent, FormLink};
use crate::models::BookingStatus;

/// Rendered email subject and HTML body
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// Email content for an event, if its kind/state defines any.
pub fn email_content(event: &DispatchEvent) -> Option<EmailContent> {
    match event {
        DispatchEvent::ContactFormSubmitted {
            workspace_name,
            recipient,
            ..
        } => Some(welcome_email(workspace_name, &recipient.name)),
        DispatchEvent::BookingCreated {
            workspace_name,
            recipient,
            booking,
            forms,
            ..
        } => Some(EmailContent {
            subject: format!("Booking Confirmed - {}", booking.service_name),
            html: booking_confirmation_html(workspace_name, &recipient.name, booking, forms),
        }),
        DispatchEvent::BookingStatusChanged {
            workspace_name,
            recipient,
            booking,
            status,
            ..
        } => status_change_email(workspace_name, &recipient.name, booking, *status),
        DispatchEvent::StaffInvited {
            workspace_name,
            recipient,
            temporary_password,
            permissions,
            ..
        } => Some(staff_invite_email(
            workspace_name,
            &recipient.name,
            recipient.email.as_deref().unwrap_or_default(),
            temporary_password,
            permissions,
        )),
        DispatchEvent::BookingReminder {
            workspace_name,
            recipient,
            booking,
            ..
        } => Some(EmailContent {
            subject: format!(
                "Reminder: {} Tomorrow at {}",
                booking.service_name,
                booking.starts_at.format("%I:%M %p")
            ),
            html: reminder_html(workspace_name, &recipient.name, booking),
        }),
    }
}

/// SMS body for an event, if its kind defines one.
pub fn sms_content(event: &DispatchEvent) -> Option<String> {
    match event {
        DispatchEvent::BookingCreated {
            workspace_name,
            booking,
            ..
        } => Some(format!(
            "Booking Confirmed!\n\n{}\n{}\n{}\n\nPlease arrive 5-10 minutes early.\n\n- {}",
            booking.service_name,
            booking.starts_at.format("%b %d, %Y at %I:%M %p"),
            booking.location,
            workspace_name
        )),
        _ => None,
    }
}

/// Calendar event body for an event, if its kind defines one.
pub fn calendar_event(event: &DispatchEvent) -> Option<CalendarEventPayload> {
    match event {
        DispatchEvent::BookingCreated {
            recipient, booking, ..
        } => {
            let mut description = format!("Customer: {}", recipient.name);
            write!(
                description,
                "\nEmail: {}",
                recipient.email.as_deref().unwrap_or("N/A")
            )
            .ok()?;
            write!(
                description,
                "\nPhone: {}",
                recipient.phone.as_deref().unwrap_or("N/A")
            )
            .ok()?;
            write!(
                description,
                "\nNotes: {}",
                booking.notes.as_deref().unwrap_or("N/A")
            )
            .ok()?;

            Some(CalendarEventPayload {
                summary: format!("{} - {}", booking.service_name, recipient.name),
                description,
                starts_at: booking.starts_at,
                ends_at: booking.starts_at + Duration::minutes(booking.duration_minutes as i64),
                attendee_email: recipient.email.clone(),
            })
        }
        _ => None,
    }
}

/// Timeline line recorded after a successful send on a channel.
pub fn sent_timeline_line(event: &DispatchEvent, channel: Channel) -> String {
    match (event, channel) {
        (DispatchEvent::ContactFormSubmitted { .. }, _) => {
            "Automated welcome email sent".to_string()
        }
        (DispatchEvent::BookingCreated { .. }, Channel::Email) => {
            "Booking confirmation email sent".to_string()
        }
        (DispatchEvent::BookingCreated { .. }, Channel::Sms) => {
            "Booking confirmation SMS sent".to_string()
        }
        (DispatchEvent::BookingCreated { .. }, Channel::Calendar) => {
            "Calendar event created".to_string()
        }
        (DispatchEvent::BookingStatusChanged { .. }, _) => {
            let subject = email_content(event)
                .map(|c| c.subject)
                .unwrap_or_else(|| "status update".to_string());
            format!("Status notification email sent: {}", subject)
        }
        (DispatchEvent::StaffInvited { .. }, _) => "Staff invitation email sent".to_string(),
        (DispatchEvent::BookingReminder { .. }, _) => {
            "Appointment reminder email sent".to_string()
        }
    }
}

fn format_date(dt: &NaiveDateTime) -> String {
    dt.format("%B %d, %Y at %I:%M %p").to_string()
}

fn welcome_email(workspace_name: &str, contact_name: &str) -> EmailContent {
    let html = format!(
        "<html><body>\
         <h2>Thank you for contacting {workspace_name}!</h2>\
         <p>Hi {contact_name},</p>\
         <p>We've received your message and will get back to you shortly.</p>\
         <p>Best regards,<br>{workspace_name} Team</p>\
         </body></html>"
    );
    EmailContent {
        subject: format!("Thank you for contacting {}", workspace_name),
        html,
    }
}

fn booking_confirmation_html(
    workspace_name: &str,
    customer_name: &str,
    booking: &super::event::BookingDetails,
    forms: &[FormLink],
) -> String {
    let mut html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h1>Booking Confirmed</h1>\
         <p>Hi <strong>{customer_name}</strong>,</p>\
         <p>Your booking has been confirmed! We're looking forward to seeing you.</p>\
         <h3>Booking Details</h3>\
         <table style=\"width: 100%;\">\
         <tr><td><strong>Service:</strong></td><td>{service}</td></tr>\
         <tr><td><strong>Date &amp; Time:</strong></td><td>{date}</td></tr>\
         <tr><td><strong>Duration:</strong></td><td>{duration} minutes</td></tr>\
         <tr><td><strong>Location:</strong></td><td>{location}</td></tr>\
         </table>",
        service = booking.service_name,
        date = format_date(&booking.starts_at),
        duration = booking.duration_minutes,
        location = booking.location,
    );

    if !forms.is_empty() {
        html.push_str(
            "<h3>Please Complete These Forms</h3>\
             <p>To make your appointment smoother, please fill out the following forms before your visit:</p>\
             <ul>",
        );
        for form in forms {
            let _ = write!(
                html,
                "<li><a href=\"{url}\">{name}</a>",
                url = form.url,
                name = form.name
            );
            if let Some(description) = &form.description {
                let _ = write!(html, "<br/><span>{description}</span>");
            }
            html.push_str("</li>");
        }
        html.push_str("</ul>");
    }

    let _ = write!(
        html,
        "<p><strong>Important:</strong> Please arrive 5-10 minutes early.</p>\
         <p>Need to reschedule or have questions? Reply to this email or contact us.</p>\
         <p>Powered by <strong>{workspace_name}</strong></p>\
         </div>"
    );
    html
}

fn status_change_email(
    workspace_name: &str,
    customer_name: &str,
    booking: &super::event::BookingDetails,
    status: BookingStatus,
) -> Option<EmailContent> {
    let date = format_date(&booking.starts_at);
    // Only these three statuses notify the customer; pending and no-show
    // transitions stay internal.
    let (subject, line) = match status {
        BookingStatus::Confirmed => (
            format!("Booking Confirmed - {}", booking.service_name),
            format!(
                "Your booking for {} on {} has been confirmed!",
                booking.service_name, date
            ),
        ),
        BookingStatus::Cancelled => (
            format!("Booking Cancelled - {}", booking.service_name),
            format!(
                "Your booking for {} on {} has been cancelled.",
                booking.service_name, date
            ),
        ),
        BookingStatus::Completed => (
            format!("Booking Completed - {}", booking.service_name),
            format!(
                "Thank you for visiting! Your booking for {} has been completed.",
                booking.service_name
            ),
        ),
        BookingStatus::Pending | BookingStatus::NoShow => return None,
    };

    let html = format!(
        "<html><body>\
         <h2>{subject}</h2>\
         <p>Hi {customer_name},</p>\
         <p>{line}</p>\
         <p><strong>Booking Details:</strong></p>\
         <p>Service: {service}</p>\
         <p>Date &amp; Time: {date}</p>\
         <p>Location: {location}</p>\
         <p>Status: {status}</p>\
         <p>If you have any questions, please contact us.</p>\
         <p>Best regards,<br>{workspace_name} Team</p>\
         </body></html>",
        service = booking.service_name,
        location = booking.location,
        status = status.as_str().to_uppercase(),
    );

    Some(EmailContent { subject, html })
}

fn staff_invite_email(
    workspace_name: &str,
    full_name: &str,
    email: &str,
    temporary_password: &str,
    permissions: &[String],
) -> EmailContent {
    let permissions_html = permissions
        .iter()
        .map(|p| format!("&bull; {p}"))
        .collect::<Vec<_>>()
        .join("<br>");

    let html = format!(
        "<html><body style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h1>Welcome to {workspace_name}!</h1>\
         <p>Hi {full_name},</p>\
         <p>You've been invited to join the <strong>{workspace_name}</strong> team! \
         We're excited to have you on board.</p>\
         <h3>Your Login Credentials</h3>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Temporary Password:</strong> <code>{temporary_password}</code></p>\
         <p>Please change your password after logging in for the first time.</p>\
         <h3>Your Permissions</h3>\
         <p>{permissions_html}</p>\
         <p>If you have any questions, please contact the workspace owner.<br>\
         Best regards,<br><strong>{workspace_name} Team</strong></p>\
         </body></html>"
    );

    EmailContent {
        subject: format!("You've been invited to join {}", workspace_name),
        html,
    }
}

fn reminder_html(
    workspace_name: &str,
    contact_name: &str,
    booking: &super::event::BookingDetails,
) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h1>Appointment Reminder</h1>\
         <p>Hi <strong>{contact_name}</strong>,</p>\
         <p>This is a friendly reminder about your upcoming appointment <strong>tomorrow</strong>:</p>\
         <h3>Your Appointment</h3>\
         <table style=\"width: 100%;\">\
         <tr><td><strong>Service:</strong></td><td>{service}</td></tr>\
         <tr><td><strong>Date &amp; Time:</strong></td><td>{date}</td></tr>\
         <tr><td><strong>Duration:</strong></td><td>{duration} minutes</td></tr>\
         <tr><td><strong>Location:</strong></td><td>{location}</td></tr>\
         </table>\
         <p><strong>Important Reminder:</strong> Please arrive 5-10 minutes early to \
         complete any required check-in procedures.</p>\
         <p><strong>Need to reschedule?</strong> Please contact us as soon as possible \
         if you need to make any changes.</p>\
         <p>We look forward to seeing you tomorrow!</p>\
         <p>Powered by <strong>{workspace_name}</strong></p>\
         </div>",
        service = booking.service_name,
        date = format_date(&booking.starts_at),
        duration = booking.duration_minutes,
        location = booking.location,
    )
}
