// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Demo API routes: program generation, form check, login.
//!
//! A rejected login is answered with 200 and `success: false`; only
//! malformed requests and backend failures produce error statuses.

use crate::error::Result;
use crate::models::{
    AuthOutcome, Credentials, FormCheckResult, FormData, GenerateProgramResponse, UserProfile,
};
use crate::services::http::{CHECK_FORM_PATH, GENERATE_PROGRAM_PATH, LOGIN_PATH};
use crate::ServerState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

/// Prefix shared by all API routes.
pub const API_PREFIX: &str = "/api";

pub fn routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route(
            &format!("{}{}", API_PREFIX, GENERATE_PROGRAM_PATH),
            post(generate_program),
        )
        .route(&format!("{}{}", API_PREFIX, CHECK_FORM_PATH), post(check_form))
        .route(&format!("{}{}", API_PREFIX, LOGIN_PATH), post(login))
}

async fn generate_program(
    State(state): State<Arc<ServerState>>,
    payload: std::result::Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<GenerateProgramResponse>> {
    let Json(profile) = payload?;
    let response = state.services.programs.generate_program(&profile).await?;
    tracing::info!(program_id = response.program.id, "Program generated");
    Ok(Json(response))
}

async fn check_form(
    State(state): State<Arc<ServerState>>,
    payload: std::result::Result<Json<FormData>, JsonRejection>,
) -> Result<Json<FormCheckResult>> {
    let Json(data) = payload?;
    let result = state.services.forms.check_form(&data).await?;
    tracing::info!(valid = result.valid, issues = result.issues.len(), "Form checked");
    Ok(Json(result))
}

async fn login(
    State(state): State<Arc<ServerState>>,
    payload: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<AuthOutcome>> {
    let Json(credentials) = payload?;
    let outcome = state.services.auth.authenticate_user(&credentials).await?;
    if !outcome.is_success() {
        tracing::info!("Login rejected");
    }
    Ok(Json(outcome))
}
