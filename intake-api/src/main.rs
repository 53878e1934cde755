//! Form Intake API - lead and quote form receiver.
//!
//! This binary:
//! - Accepts lead and quote form submissions
//! - Rejects spam and incomplete submissions
//! - Relays accepted submissions to a fixed mailbox over SMTP
//! - Logs submissions instead when SMTP is not configured

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use intake::{router, AppState, Config, MailTransport, SmtpMailer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        allowed_origin = ?config.allowed_origin,
        smtp_configured = config.smtp.is_some(),
        to_email = %config.to_email,
        mail_timeout_ms = config.mail_timeout_ms,
        "config_loaded"
    );

    // Create the mail transport once; absent means log-only delivery
    let mailer: Option<Arc<dyn MailTransport>> = match &config.smtp {
        Some(settings) => {
            let mailer: Arc<dyn MailTransport> = Arc::new(
                SmtpMailer::new(settings, Duration::from_millis(config.mail_timeout_ms))
                    .context("Failed to create SMTP transport")?,
            );
            Some(mailer)
        }
        None => {
            warn!("smtp_not_configured");
            None
        }
    };

    let port = config.port;
    let state = AppState::new(config, mailer);

    // Build the router
    let app = router(state)?;

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
