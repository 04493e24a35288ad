pub mod email;

use async_trait::async_trait;
use serde::Serialize;

use crate::models::Booking;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyOutcome {
    pub success: bool,
    pub message: String,
}

impl NotifyOutcome {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn into_result(self) -> Result<String, NotificationFailure> {
        if self.success {
            Ok(self.message)
        } else {
            Err(NotificationFailure(self.message))
        }
    }
}

/// The confirmation could not be delivered. Never undoes a stored booking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("notification failed: {0}")]
pub struct NotificationFailure(pub String);

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, email: &str, booking: &Booking) -> NotifyOutcome;
}
