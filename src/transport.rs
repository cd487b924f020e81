//! Console-backed transports.
//!
//! The demo deployment delivers to stdout: notification payloads go to
//! stdout in the configured format, while diagnostics stay on stderr with
//! the rest of the logging, so piped output contains payloads only. A real
//! deployment implements the transport traits against actual gateways and
//! wires those in instead.

use crate::config::OutputFormat;
use crate::core::{
    EmailNotification, EmailTransport, PushNotification, PushTransport, SmsNotification,
    SmsTransport,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Writes every delivery to stdout in the configured format.
///
/// One instance serves all three channels; the formats differ per channel
/// in plain text and share a serde shape in JSON.
pub struct StdoutTransport {
    format: OutputFormat,
}

impl StdoutTransport {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

#[async_trait]
impl EmailTransport for StdoutTransport {
    async fn deliver(&self, notification: &EmailNotification) -> Result<()> {
        let text = match self.format {
            OutputFormat::PlainText => format_email(notification),
            OutputFormat::Json => serde_json::to_string(notification)?,
        };
        println!("{text}");
        debug!(recipient = notification.recipient(), "email written to stdout");
        Ok(())
    }
}

#[async_trait]
impl SmsTransport for StdoutTransport {
    async fn deliver(&self, notification: &SmsNotification) -> Result<()> {
        let text = match self.format {
            OutputFormat::PlainText => format_sms(notification),
            OutputFormat::Json => serde_json::to_string(notification)?,
        };
        println!("{text}");
        debug!(recipient = notification.recipient(), "sms written to stdout");
        Ok(())
    }
}

#[async_trait]
impl PushTransport for StdoutTransport {
    async fn deliver(&self, notification: &PushNotification) -> Result<()> {
        let text = match self.format {
            OutputFormat::PlainText => format_push(notification),
            OutputFormat::Json => serde_json::to_string(notification)?,
        };
        println!("{text}");
        debug!(recipient = notification.recipient(), "push written to stdout");
        Ok(())
    }
}

fn format_email(notification: &EmailNotification) -> String {
    format!(
        "Sending Email to {}\nFrom: {}\nSubject: {}\nMessage: {}\n",
        notification.recipient(),
        notification.sender_address(),
        notification.subject(),
        notification.message()
    )
}

fn format_sms(notification: &SmsNotification) -> String {
    format!(
        "Sending SMS to {}\nMessage: {}\n",
        notification.phone_number(),
        notification.message()
    )
}

fn format_push(notification: &PushNotification) -> String {
    format!(
        "Sending Push Notification to device {}\nMessage: {}\n",
        notification.device_id(),
        notification.message()
    )
}
