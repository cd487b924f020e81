//! Courier - Notification Construction and Dispatch
//!
//! A demo binary that builds notifications through the factory, the
//! builder, and the facade, then routes them through the dispatch manager
//! in the configured mode. Delivered payloads go to stdout; logs go to
//! stderr.

use anyhow::Result;
use clap::Parser;
use courier::{
    builder::NotificationBuilder,
    cli::Cli,
    config::Config,
    core::{ChannelKind, CompositeNotification, Notification, Transports},
    decorator::LoggingDecorator,
    dispatch::{ChannelObserver, DispatchManager, DispatchMode, LoggingObserver},
    facade::Courier,
    factory::{Extras, NotificationFactory},
    transport::StdoutTransport,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(cli).unwrap_or_else(|err| {
        // Logging is not up yet, so report straight to stderr.
        eprintln!("Failed to load configuration: {err:#}");
        std::process::exit(1);
    });

    // Initialize logging on stderr, leaving stdout to the transports.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Courier starting up...");

    // Log the loaded configuration settings for visibility
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Dispatch Mode: {}", config.dispatch.mode);
    info!("Output Format: {}", config.output.format);
    info!("-------------------------------------------------------");

    // =========================================================================
    // 1. Wire Transports and the Dispatch Manager
    // =========================================================================
    let stdout_transport = Arc::new(StdoutTransport::new(config.output.format.clone()));
    let transports = Arc::new(Transports::new(
        stdout_transport.clone(),
        stdout_transport.clone(),
        stdout_transport,
    ));
    let manager = Arc::new(DispatchManager::new(
        config.dispatch.mode,
        transports.clone(),
    ));

    if manager.mode() == DispatchMode::FanOut {
        for kind in [ChannelKind::Email, ChannelKind::Sms, ChannelKind::Push] {
            manager.register_observer(Arc::new(ChannelObserver::new(kind, transports.clone())));
        }
        manager.register_observer(Arc::new(LoggingObserver::new()));
        info!(observers = manager.observer_count(), "fan-out observers registered");
    }

    // =========================================================================
    // 2. Construct Notifications via the Factory and the Builder
    // =========================================================================
    let welcome = NotificationFactory::create(
        "email",
        "john.doe@example.com",
        "Welcome to our service!",
        &Extras::new()
            .with("subject", "Welcome!")
            .with("sender_address", "support@example.com"),
    )?;

    let order_shipped = NotificationBuilder::new()
        .recipient("alice@example.com")
        .message("Your order has been shipped!")
        .channel("email")
        .extra("subject", "Order Shipped")
        .extra("sender_address", "orders@example.com")
        .build()?;

    manager.add(welcome).await;
    manager.add(order_shipped).await;

    // =========================================================================
    // 3. One-Call Sends via the Facade
    // =========================================================================
    let courier = Courier::new(manager.clone());
    courier
        .send_sms("Jane Doe", "Your verification code is 123456.", "+1234567890")
        .await?;
    courier
        .send_push("User123", "You have a new friend request.", "device_xyz")
        .await?;

    // In batch mode the facade calls above also flushed the two
    // constructed notifications; this drains anything still waiting.
    match manager.send_all().await {
        Ok(count) => {
            if count > 0 {
                info!(delivered = count, "drained remaining notifications");
            }
        }
        Err(e) => error!(error = %e, "some deliveries failed"),
    }

    // =========================================================================
    // 4. Composite Group Behind a Logging Decorator
    // =========================================================================
    let mut digest = CompositeNotification::new("oncall-team", "Nightly digest")?;
    digest.add(NotificationFactory::create(
        "email",
        "ops@example.com",
        "All systems nominal.",
        &Extras::new().with("subject", "Status"),
    )?);
    digest.add(NotificationFactory::create(
        "sms",
        "Primary Oncall",
        "All systems nominal.",
        &Extras::new().with("phone_number", "+15550100"),
    )?);
    let digest = Notification::Composite(digest);

    if let Err(e) = LoggingDecorator::new(&digest).deliver(&transports).await {
        error!(error = %e, "digest delivery incomplete");
    }

    info!("All notifications processed. Exiting.");

    Ok(())
}
