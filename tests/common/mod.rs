// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitness_site::config::Config;
use fitness_site::routes::create_router;
use fitness_site::services::Services;
use fitness_site::site::SiteContext;
use fitness_site::store::MemoryStore;
use fitness_site::time_utils::{FixedClock, NoDelay};
use fitness_site::ui::Document;
use fitness_site::ServerState;
use std::sync::Arc;

/// Timestamp used by the fixed test clock.
#[allow(dead_code)]
pub const TEST_NOW_MILLIS: i64 = 1_767_225_600_000;

/// Demo services that answer immediately with a fixed clock.
#[allow(dead_code)]
pub fn instant_services() -> Services {
    Services::demo(Arc::new(NoDelay), Arc::new(FixedClock(TEST_NOW_MILLIS)))
}

/// Create a test app with instant demo services.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<ServerState>) {
    let state = Arc::new(ServerState {
        config: Config::default(),
        services: instant_services(),
    });
    (create_router(state.clone()), state)
}

/// Serve `app` on an ephemeral local port. Returns `http://127.0.0.1:<port>`.
#[allow(dead_code)]
pub async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

/// Site context over a fresh store and the given document.
#[allow(dead_code)]
pub fn create_test_site(document: Document) -> (SiteContext, MemoryStore) {
    let store = MemoryStore::new();
    let site = SiteContext::new(Arc::new(store.clone()), document, instant_services());
    (site, store)
}
