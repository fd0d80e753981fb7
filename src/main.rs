// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness Site demo backend server.
//!
//! Serves the program generation, form check and login endpoints the
//! site's HTTP services call.

use fitness_site::{config::Config, services::Services, ServerState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        demo_latency = config.demo_latency,
        "Starting Fitness Site demo backend"
    );

    // The server always answers locally; SERVICE_MODE only affects clients
    let services = Services::demo_from_config(&config);

    let state = Arc::new(ServerState {
        config: config.clone(),
        services,
    });

    // Build router
    let app = fitness_site::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("fitness_site=debug,info")
            }),
        )
        .with(format)
        .init();
}
