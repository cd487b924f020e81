//! Construction of notifications from loosely-typed input.
//!
//! The factory is the single place where a runtime channel tag plus a bag of
//! string extras becomes a validated [`Notification`]. The builder funnels
//! into the same construction path, so both read identical keys and apply
//! identical defaults.

use crate::core::{
    BuildError, ChannelKind, EmailNotification, Notification, PushNotification, SmsNotification,
};
use std::collections::HashMap;
use tracing::debug;

const DEFAULT_SUBJECT: &str = "No Subject";
const DEFAULT_SENDER_ADDRESS: &str = "no-reply@example.com";
const DEFAULT_PHONE_NUMBER: &str = "0000000000";
const DEFAULT_DEVICE_ID: &str = "unknown_device";

/// Channel-specific metadata passed alongside the universal fields.
///
/// Keys the channels read, with the defaults applied when a key is absent:
///
/// | key              | channel | default                  |
/// |------------------|---------|--------------------------|
/// | `subject`        | email   | `"No Subject"`           |
/// | `sender_address` | email   | `"no-reply@example.com"` |
/// | `phone_number`   | sms     | `"0000000000"`           |
/// | `device_id`      | push    | `"unknown_device"`       |
///
/// Unknown keys are carried but ignored, so callers can pass one bag to
/// several construction calls.
#[derive(Debug, Clone, Default)]
pub struct Extras {
    fields: HashMap<String, String>,
}

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key, returning the bag for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Sets a key in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        match self.fields.get(key) {
            Some(value) => value.clone(),
            None => default.to_string(),
        }
    }
}

/// Maps a channel tag and field bag to the matching notification variant.
///
/// The factory is stateless: it keeps no reference to what it produces, and
/// two calls with the same input yield equal values.
pub struct NotificationFactory;

impl NotificationFactory {
    /// Creates the channel variant named by `channel_tag`.
    ///
    /// # Arguments
    /// * `channel_tag` - One of `"email"`, `"sms"`, `"push"`
    /// * `recipient` - Who the notification is for; must be non-empty
    /// * `message` - The body; must be non-empty
    /// * `extras` - Channel-specific fields, defaulted when absent
    ///
    /// # Returns
    /// * `Ok(Notification)` on success
    /// * `Err(BuildError::UnknownChannelType)` for an unrecognized tag
    /// * `Err(BuildError::MissingRequiredField)` for an empty universal field
    pub fn create(
        channel_tag: &str,
        recipient: &str,
        message: &str,
        extras: &Extras,
    ) -> Result<Notification, BuildError> {
        let kind = channel_tag.parse::<ChannelKind>()?;
        construct(kind, recipient, message, extras)
    }
}

/// Shared construction path used by the factory and the builder.
pub(crate) fn construct(
    kind: ChannelKind,
    recipient: &str,
    message: &str,
    extras: &Extras,
) -> Result<Notification, BuildError> {
    let notification = match kind {
        ChannelKind::Email => Notification::Email(EmailNotification::new(
            recipient,
            message,
            extras.get_or("subject", DEFAULT_SUBJECT),
            extras.get_or("sender_address", DEFAULT_SENDER_ADDRESS),
        )?),
        ChannelKind::Sms => Notification::Sms(SmsNotification::new(
            recipient,
            message,
            extras.get_or("phone_number", DEFAULT_PHONE_NUMBER),
        )?),
        ChannelKind::Push => Notification::Push(PushNotification::new(
            recipient,
            message,
            extras.get_or("device_id", DEFAULT_DEVICE_ID),
        )?),
    };
    debug!(
        channel = kind.as_str(),
        recipient, "constructed notification"
    );
    metrics::counter!("notifications_created", "channel" => kind.as_str()).increment(1);
    Ok(notification)
}
