//! Courier - A notification construction and dispatch library
//!
//! This library builds notifications for a closed set of channels (email,
//! SMS, push) through a factory or a fluent builder, groups them into
//! composites, and routes them through a shared dispatch manager that
//! either batches deliveries or fans them out to registered observers.

pub mod builder;
pub mod cli;
pub mod config;
pub mod core;
pub mod decorator;
pub mod dispatch;
pub mod facade;
pub mod factory;
pub mod transport;

// Re-export core types for convenience
pub use crate::core::{
    BuildError, ChannelKind, CompositeNotification, DeliveryError, EmailNotification,
    Notification, Observer, PushNotification, SmsNotification, Transports,
};
