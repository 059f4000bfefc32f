// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Advent-Leader bot
//!
//! Polls a private leaderboard every few minutes and posts the standings to
//! a Webex room when somebody earns a new star.

use advent_leader::{config::Config, services::Poller};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = option_env!("GIT_HASH").unwrap_or("unknown"),
        build_timestamp = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        "Starting Advent-Leader"
    );

    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!(
        url = %config.url,
        room_id = %config.room_id,
        debug = config.debug,
        interval_secs = config.poll_interval_secs,
        timeout_secs = config.http_timeout_secs,
        "Configuration ready"
    );

    let mut poller = Poller::new(&config)?;

    if let Err(e) = poller.run(shutdown_signal()).await {
        tracing::error!(
            error = %e,
            session_expired = e.is_session_expired(),
            "Poll loop stopped"
        );
        if e.is_session_expired() {
            tracing::error!("The leaderboard session cookie looks expired; update it and restart");
        }
        return Err(e.into());
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("advent_leader=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
