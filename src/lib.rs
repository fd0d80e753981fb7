// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness Site: the interaction layer of a fitness marketing website.
//!
//! The client side ([`site::SiteContext`]) drives an in-memory document:
//! modals, notifications, form validation, cookie consent, lazy images and
//! hash navigation, backed by program/form-check/login services. The same
//! services are exposed by a small axum server for the demo backend.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod site;
pub mod state;
pub mod store;
pub mod time_utils;
pub mod ui;

use config::Config;
use services::Services;

/// Shared server state.
pub struct ServerState {
    pub config: Config,
    pub services: Services,
}
