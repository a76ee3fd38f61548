//! Outbound email for reservation notifications.
//!
//! - [`Mailer`]: the send seam handlers depend on.
//! - [`smtp`]: SMTP implementation over `lettre`.
//! - [`templates`]: HTML bodies for the admin and customer emails.

use async_trait::async_trait;

pub mod smtp;
pub mod templates;

pub use smtp::{EmailConfig, EmailError, SmtpMailer};

/// A rendered email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// Sends a single HTML email. One attempt, no retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError>;
}
