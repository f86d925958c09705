//! Mailer port - outbound notification messages.
//!
//! The booking flow only queues messages; delivery happens elsewhere and
//! never blocks or fails a request.

use serde::{Deserialize, Serialize};

/// One outbound mail message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailData {
    pub to: String,
    pub from: String,
    pub subject: String,
    /// HTML body.
    pub content: String,
    /// Optional template the body is wrapped in at delivery time.
    pub template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    #[error("Mail queue is closed")]
    QueueClosed,

    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Fire-and-forget mail queue.
pub trait Mailer: Send + Sync {
    /// Queue `mail` for asynchronous delivery without waiting on it.
    fn send(&self, mail: MailData) -> Result<(), MailError>;
}
