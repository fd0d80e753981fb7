// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services backed by the HTTP API.

use crate::models::{
    AuthOutcome, Credentials, FormCheckResult, FormData, GenerateProgramResponse, UserProfile,
};
use crate::services::{
    ApiClient, AuthService, FormValidationService, ProgramService, ServiceError,
};
use async_trait::async_trait;

pub const GENERATE_PROGRAM_PATH: &str = "/program/generate";
pub const CHECK_FORM_PATH: &str = "/form/check";
pub const LOGIN_PATH: &str = "/auth/login";

/// Calls the backend for every operation.
#[derive(Clone)]
pub struct HttpServices {
    client: ApiClient,
}

impl HttpServices {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProgramService for HttpServices {
    async fn generate_program(
        &self,
        profile: &UserProfile,
    ) -> Result<GenerateProgramResponse, ServiceError> {
        Ok(self.client.post(GENERATE_PROGRAM_PATH, profile).await?)
    }
}

#[async_trait]
impl FormValidationService for HttpServices {
    async fn check_form(&self, data: &FormData) -> Result<FormCheckResult, ServiceError> {
        Ok(self.client.post(CHECK_FORM_PATH, data).await?)
    }
}

#[async_trait]
impl AuthService for HttpServices {
    async fn authenticate_user(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthOutcome, ServiceError> {
        Ok(self.client.post(LOGIN_PATH, credentials).await?)
    }
}
