//! End-to-end tests for the one-call facade.

#[path = "../helpers/mod.rs"]
mod helpers;

use courier::core::{BuildError, ChannelKind, Transports};
use courier::dispatch::{ChannelObserver, DispatchManager, DispatchMode};
use courier::facade::Courier;
use helpers::mock_transport::{FailingTransport, MockTransport};
use helpers::mock_transports;
use std::sync::Arc;

fn batch_courier() -> (MockTransport, Courier, Arc<DispatchManager>) {
    let (mock, transports) = mock_transports();
    let manager = Arc::new(DispatchManager::new(DispatchMode::Batch, transports));
    (mock, Courier::new(manager.clone()), manager)
}

#[tokio::test]
async fn test_each_send_call_delivers_immediately() {
    // Arrange
    let (mock, courier, manager) = batch_courier();

    // Act
    courier
        .send_email(
            "john.doe@example.com",
            "Welcome!",
            "Welcome to our service!",
            "support@example.com",
        )
        .await
        .unwrap();
    courier
        .send_sms("Jane Doe", "Your verification code is 123456.", "+1234567890")
        .await
        .unwrap();
    courier
        .send_push("User123", "You have a new friend request.", "device_xyz")
        .await
        .unwrap();

    // Assert: three calls, three deliveries, empty queue after each.
    assert_eq!(
        mock.order(),
        vec!["email:john.doe@example.com", "sms:Jane Doe", "push:User123"]
    );
    assert_eq!(manager.pending_count(), 0);

    let emails = mock.emails();
    assert_eq!(emails[0].subject(), "Welcome!");
    assert_eq!(emails[0].sender_address(), "support@example.com");
    let sms = mock.sms();
    assert_eq!(sms[0].phone_number(), "+1234567890");
    let pushes = mock.pushes();
    assert_eq!(pushes[0].device_id(), "device_xyz");
}

#[tokio::test]
async fn test_facade_flushes_notifications_queued_by_others() {
    // A facade send triggers a full batch flush, so anything added to the
    // shared manager beforehand rides along.
    let (mock, courier, manager) = batch_courier();
    manager.add(helpers::sample_email("queued-first@example.com")).await;

    courier
        .send_sms("Jane Doe", "Your verification code is 123456.", "+1234567890")
        .await
        .unwrap();

    assert_eq!(
        mock.order(),
        vec!["email:queued-first@example.com", "sms:Jane Doe"]
    );
}

#[tokio::test]
async fn test_build_errors_surface_and_nothing_is_sent() {
    let (mock, courier, manager) = batch_courier();

    let err = courier
        .send_push("", "You have a new friend request.", "device_xyz")
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::MissingRequiredField("recipient"))
    );
    assert_eq!(mock.total_sent(), 0);
    assert_eq!(manager.pending_count(), 0);
}

#[tokio::test]
async fn test_delivery_failures_come_back_as_errors() {
    let failing = FailingTransport::new("smtp relay rejected the message");
    let mock = MockTransport::new();
    let transports = Arc::new(Transports::new(
        Arc::new(failing),
        Arc::new(mock.clone()),
        Arc::new(mock.clone()),
    ));
    let manager = Arc::new(DispatchManager::new(DispatchMode::Batch, transports));
    let courier = Courier::new(manager);

    let err = courier
        .send_email("a@example.com", "Hi", "hello", "b@example.com")
        .await
        .unwrap_err();

    let text = format!("{err:#}");
    assert!(text.contains("delivering queued notifications"));
    assert!(text.contains("1 of 1 deliveries failed"));
}

#[tokio::test]
async fn test_fan_out_facade_delivers_exactly_once() {
    // Arrange: fan-out manager with full observer coverage.
    let (mock, transports) = mock_transports();
    let manager = Arc::new(DispatchManager::new(
        DispatchMode::FanOut,
        transports.clone(),
    ));
    for kind in [ChannelKind::Email, ChannelKind::Sms, ChannelKind::Push] {
        manager.register_observer(Arc::new(ChannelObserver::new(kind, transports.clone())));
    }
    let courier = Courier::new(manager.clone());

    // Act
    courier
        .send_email(
            "john.doe@example.com",
            "Welcome!",
            "Welcome to our service!",
            "support@example.com",
        )
        .await
        .unwrap();

    // Assert: the add fanned out and delivered; the facade's trailing
    // flush found an empty queue, so there is no second copy.
    assert_eq!(mock.order(), vec!["email:john.doe@example.com"]);
    assert_eq!(manager.pending_count(), 0);
}
