#![allow(dead_code)]
pub mod mock_observer;

use courier::core::{Notification, Transports};
use courier::factory::{Extras, NotificationFactory};
use mock_transport::MockTransport;
use std::sync::Arc;

/// Creates a recording mock wired into all three transport slots.
pub fn mock_transports() -> (MockTransport, Arc<Transports>) {
    let mock = MockTransport::new();
    let transports = Arc::new(Transports::new(
        Arc::new(mock.clone()),
        Arc::new(mock.clone()),
        Arc::new(mock.clone()),
    ));
    (mock, transports)
}

/// A ready-made email notification with distinct field values.
pub fn sample_email(recipient: &str) -> Notification {
    NotificationFactory::create(
        "email",
        recipient,
        "Welcome to our service!",
        &Extras::new()
            .with("subject", "Welcome!")
            .with("sender_address", "support@example.com"),
    )
    .unwrap()
}

/// A ready-made SMS notification.
pub fn sample_sms(recipient: &str) -> Notification {
    NotificationFactory::create(
        "sms",
        recipient,
        "Your verification code is 123456.",
        &Extras::new().with("phone_number", "+1234567890"),
    )
    .unwrap()
}

/// A ready-made push notification.
pub fn sample_push(recipient: &str) -> Notification {
    NotificationFactory::create(
        "push",
        recipient,
        "You have a new friend request.",
        &Extras::new().with("device_id", "device_xyz"),
    )
    .unwrap()
}
