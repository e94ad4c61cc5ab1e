use serde::Serialize;

/// Response for the manual reminder sweep trigger.
///
/// The endpoint reports failures in-band with `success: false` rather than
/// an error status; it is a task trigger, not a resource.
#[derive(Debug, Serialize)]
pub struct ReminderSweepResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders_sent: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReminderSweepResponse {
    pub fn completed(count: u32) -> Self {
        Self {
            success: true,
            reminders_sent: Some(count),
            message: Some(format!("Successfully sent {} reminder(s)", count)),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            reminders_sent: None,
            message: None,
            error: Some(error),
        }
    }
}
