//! Stepwise construction of notifications.
//!
//! The builder collects fields across call sites and defers every check to
//! `build()`, where the accumulated state is validated in one place and
//! handed to the factory's construction path.

use crate::core::{BuildError, ChannelKind, Notification};
use crate::factory::{construct, Extras};

/// Accumulates notification fields, validating nothing until `build()`.
///
/// Setters take and return the builder by value, so calls chain naturally
/// and an abandoned builder is just dropped. `build()` consumes the
/// builder: one builder produces at most one notification.
#[derive(Debug, Default)]
pub struct NotificationBuilder {
    recipient: Option<String>,
    message: Option<String>,
    channel: Option<String>,
    extras: Extras,
}

impl NotificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets who the notification is for.
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Sets the message body.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the channel tag (`"email"`, `"sms"`, `"push"`). The tag is not
    /// checked here; an unknown value surfaces from `build()`.
    pub fn channel(mut self, tag: impl Into<String>) -> Self {
        self.channel = Some(tag.into());
        self
    }

    /// Sets one channel-specific field. Keys and defaults are the same
    /// ones [`Extras`] documents for the factory.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.set(key, value);
        self
    }

    /// Validates the accumulated state and produces the notification.
    ///
    /// Checks run in a fixed order: a channel must have been chosen, then
    /// recipient and message must be present and non-empty, then the tag
    /// must name a known channel. The first violation is returned.
    pub fn build(self) -> Result<Notification, BuildError> {
        let channel = self.channel.ok_or(BuildError::MissingChannelType)?;
        let recipient = self.recipient.unwrap_or_default();
        if recipient.is_empty() {
            return Err(BuildError::MissingRequiredField("recipient"));
        }
        let message = self.message.unwrap_or_default();
        if message.is_empty() {
            return Err(BuildError::MissingRequiredField("message"));
        }
        let kind = channel.parse::<ChannelKind>()?;
        construct(kind, &recipient, &message, &self.extras)
    }
}
