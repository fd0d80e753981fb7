// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend operations behind swappable interfaces.
//!
//! Each operation is a trait; [`DemoServices`] answers locally with fixed
//! latency and deterministic data, [`HttpServices`] calls the backend through
//! [`ApiClient`]. [`Services::from_config`] picks one.

pub mod api_client;
pub mod demo;
pub mod http;

pub use api_client::{ApiClient, ApiError, RequestOptions, RetryPolicy};
pub use demo::DemoServices;
pub use http::HttpServices;

use crate::config::{Config, ServiceMode};
use crate::models::{
    AuthOutcome, Credentials, FormCheckResult, FormData, GenerateProgramResponse, UserProfile,
};
use crate::time_utils::{Clock, Delay, NoDelay, SystemClock, TokioDelay};
use async_trait::async_trait;
use std::sync::Arc;

/// Failure of a service call. Rejections and validation issues are not
/// errors; they come back as ordinary values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[async_trait]
pub trait ProgramService: Send + Sync {
    async fn generate_program(
        &self,
        profile: &UserProfile,
    ) -> Result<GenerateProgramResponse, ServiceError>;
}

#[async_trait]
pub trait FormValidationService: Send + Sync {
    async fn check_form(&self, data: &FormData) -> Result<FormCheckResult, ServiceError>;
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate_user(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthOutcome, ServiceError>;
}

/// The set of services a page or server works against.
#[derive(Clone)]
pub struct Services {
    pub programs: Arc<dyn ProgramService>,
    pub forms: Arc<dyn FormValidationService>,
    pub auth: Arc<dyn AuthService>,
}

impl Services {
    /// Local demo answers.
    pub fn demo(delay: Arc<dyn Delay>, clock: Arc<dyn Clock>) -> Self {
        let demo = Arc::new(DemoServices::new(delay, clock));
        Self {
            programs: demo.clone(),
            forms: demo.clone(),
            auth: demo,
        }
    }

    /// Remote backend reached through `client`.
    pub fn http(client: ApiClient) -> Self {
        let http = Arc::new(HttpServices::new(client));
        Self {
            programs: http.clone(),
            forms: http.clone(),
            auth: http,
        }
    }

    /// Demo answers with the configured latency (no waits when disabled).
    pub fn demo_from_config(config: &Config) -> Self {
        let delay: Arc<dyn Delay> = if config.demo_latency {
            Arc::new(TokioDelay)
        } else {
            Arc::new(NoDelay)
        };
        Self::demo(delay, Arc::new(SystemClock))
    }

    /// Services selected by `SERVICE_MODE`.
    pub fn from_config(config: &Config) -> Self {
        match config.service_mode {
            ServiceMode::Demo => Self::demo_from_config(config),
            ServiceMode::Http => Self::http(
                ApiClient::new(config.api_base_url.clone()).with_policy(config.retry_policy()),
            ),
        }
    }
}
