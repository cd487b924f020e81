//! Core domain types and service traits for Courier
//!
//! This module defines the notification variants, the trait contracts that
//! govern delivery and observation, and the error types raised during
//! construction and dispatch.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// The closed set of delivery channels a notification can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Email,
    Sms,
    Push,
}

impl ChannelKind {
    /// The lowercase tag used in factory input, configuration, and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Sms => "sms",
            ChannelKind::Push => "push",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ChannelKind::Email),
            "sms" => Ok(ChannelKind::Sms),
            "push" => Ok(ChannelKind::Push),
            other => Err(BuildError::UnknownChannelType(other.to_string())),
        }
    }
}

/// Errors raised while constructing a notification.
///
/// Construction is the only place these occur; a successfully built
/// notification is valid for its entire lifetime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The channel tag is outside the supported set.
    #[error("unknown channel type: {0}")]
    UnknownChannelType(String),

    /// `build()` was called before any channel was chosen.
    #[error("channel type must be set before build")]
    MissingChannelType,

    /// A universally required field was absent or empty.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
}

/// Errors raised while delivering notifications.
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    /// A transport reported that a single send did not go through.
    #[error("{channel} delivery to {recipient} failed: {reason}")]
    Failed {
        channel: &'static str,
        recipient: String,
        reason: String,
    },

    /// Some sends in a group or batch failed. The remainder were still
    /// attempted; `failures` holds one entry per failed send.
    #[error("{} of {attempted} deliveries failed", .failures.len())]
    Partial {
        attempted: usize,
        failures: Vec<DeliveryError>,
    },
}

impl DeliveryError {
    pub(crate) fn failed(channel: &'static str, recipient: &str, source: anyhow::Error) -> Self {
        DeliveryError::Failed {
            channel,
            recipient: recipient.to_string(),
            reason: format!("{source:#}"),
        }
    }
}

fn require(field: &'static str, value: String) -> Result<String, BuildError> {
    if value.is_empty() {
        Err(BuildError::MissingRequiredField(field))
    } else {
        Ok(value)
    }
}

/// An email-bound notification.
///
/// Fields are private and set through the validating constructor, so every
/// value in circulation satisfies the non-empty recipient/message rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailNotification {
    recipient: String,
    message: String,
    subject: String,
    sender_address: String,
}

impl EmailNotification {
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
        subject: impl Into<String>,
        sender_address: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            recipient: require("recipient", recipient.into())?,
            message: require("message", message.into())?,
            subject: subject.into(),
            sender_address: sender_address.into(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }
}

/// An SMS-bound notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsNotification {
    recipient: String,
    message: String,
    phone_number: String,
}

impl SmsNotification {
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            recipient: require("recipient", recipient.into())?,
            message: require("message", message.into())?,
            phone_number: phone_number.into(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// A push-bound notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushNotification {
    recipient: String,
    message: String,
    device_id: String,
}

impl PushNotification {
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            recipient: require("recipient", recipient.into())?,
            message: require("message", message.into())?,
            device_id: device_id.into(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

/// An ordered group of notifications delivered as one unit.
///
/// The group carries its own recipient and message describing the batch.
/// Children keep insertion order, and a composite may contain further
/// composites; ownership makes membership cycles impossible to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeNotification {
    recipient: String,
    message: String,
    children: Vec<Notification>,
}

impl CompositeNotification {
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            recipient: require("recipient", recipient.into())?,
            message: require("message", message.into())?,
            children: Vec::new(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn children(&self) -> &[Notification] {
        &self.children
    }

    /// Appends a child to the end of the delivery order.
    pub fn add(&mut self, notification: Notification) {
        self.children.push(notification);
    }

    /// Removes the first child equal to `notification`.
    ///
    /// Returns whether a child was removed. Asking to remove a child that
    /// is not in the group is a no-op, not an error.
    pub fn remove(&mut self, notification: &Notification) -> bool {
        match self.children.iter().position(|c| c == notification) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Delivers every child in insertion order.
    ///
    /// A failing child never stops the rest of the group. If any child
    /// fails, the collected failures are returned as
    /// [`DeliveryError::Partial`] after all children have been attempted.
    pub async fn deliver(&self, transports: &Transports) -> Result<(), DeliveryError> {
        let attempted = self.children.len();
        let mut failures = Vec::new();
        for child in &self.children {
            // Boxed to allow recursion through nested composites.
            if let Err(e) = Box::pin(child.deliver(transports)).await {
                failures.push(e);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DeliveryError::Partial {
                attempted,
                failures,
            })
        }
    }
}

/// A notification ready for dispatch: one of the channel variants, or a
/// composite group treated as a single unit.
///
/// Two notifications are equal when their contents are equal; equality
/// never depends on where or when a value was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Notification {
    Email(EmailNotification),
    Sms(SmsNotification),
    Push(PushNotification),
    Composite(CompositeNotification),
}

impl Notification {
    pub fn recipient(&self) -> &str {
        match self {
            Notification::Email(n) => n.recipient(),
            Notification::Sms(n) => n.recipient(),
            Notification::Push(n) => n.recipient(),
            Notification::Composite(n) => n.recipient(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Email(n) => n.message(),
            Notification::Sms(n) => n.message(),
            Notification::Push(n) => n.message(),
            Notification::Composite(n) => n.message(),
        }
    }

    /// The channel this notification is bound to, or `None` for a
    /// composite, which spans whatever channels its children use.
    pub fn channel(&self) -> Option<ChannelKind> {
        match self {
            Notification::Email(_) => Some(ChannelKind::Email),
            Notification::Sms(_) => Some(ChannelKind::Sms),
            Notification::Push(_) => Some(ChannelKind::Push),
            Notification::Composite(_) => None,
        }
    }

    /// Stable lowercase variant name for logs and error context.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Notification::Email(_) => "email",
            Notification::Sms(_) => "sms",
            Notification::Push(_) => "push",
            Notification::Composite(_) => "composite",
        }
    }

    /// Hands the notification to the transport for its channel.
    ///
    /// Composites deliver each child in order; see
    /// [`CompositeNotification::deliver`] for the partial-failure policy.
    pub async fn deliver(&self, transports: &Transports) -> Result<(), DeliveryError> {
        let result = match self {
            Notification::Email(n) => transports
                .email
                .deliver(n)
                .await
                .map_err(|e| DeliveryError::failed("email", n.recipient(), e)),
            Notification::Sms(n) => transports
                .sms
                .deliver(n)
                .await
                .map_err(|e| DeliveryError::failed("sms", n.recipient(), e)),
            Notification::Push(n) => transports
                .push
                .deliver(n)
                .await
                .map_err(|e| DeliveryError::failed("push", n.recipient(), e)),
            Notification::Composite(group) => group.deliver(transports).await,
        };
        match &result {
            Ok(()) => {
                metrics::counter!("deliveries", "channel" => self.kind_name()).increment(1);
            }
            Err(_) => {
                metrics::counter!("delivery_failures", "channel" => self.kind_name()).increment(1);
            }
        }
        result
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Sends email notifications to their destination.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Carries out one email send.
    ///
    /// # Returns
    /// * `Ok(())` if the notification was handed off successfully
    /// * `Err` if the gateway rejected it or could not be reached
    async fn deliver(&self, notification: &EmailNotification) -> anyhow::Result<()>;
}

/// Sends SMS notifications to their destination.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn deliver(&self, notification: &SmsNotification) -> anyhow::Result<()>;
}

/// Sends push notifications to their destination.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn deliver(&self, notification: &PushNotification) -> anyhow::Result<()>;
}

/// The per-channel transports a deployment wires together at startup.
///
/// Cloning is cheap; all clones share the same transport instances.
#[derive(Clone)]
pub struct Transports {
    pub email: Arc<dyn EmailTransport>,
    pub sms: Arc<dyn SmsTransport>,
    pub push: Arc<dyn PushTransport>,
}

impl Transports {
    pub fn new(
        email: Arc<dyn EmailTransport>,
        sms: Arc<dyn SmsTransport>,
        push: Arc<dyn PushTransport>,
    ) -> Self {
        Self { email, sms, push }
    }
}

/// Receives notifications fanned out by the dispatch manager.
///
/// Implementations decide for themselves whether a notification concerns
/// them and return `Ok(())` for ones they ignore.
#[async_trait]
pub trait Observer: Send + Sync {
    /// A unique, descriptive name for the observer (e.g., "email-observer").
    /// Used for logging and error reporting.
    fn name(&self) -> &str;

    /// Handles one notification.
    ///
    /// # Returns
    /// * `Ok(())` if the notification was handled or deliberately ignored
    /// * `Err` if handling was attempted and failed
    async fn update(&self, notification: &Notification) -> anyhow::Result<()>;
}
