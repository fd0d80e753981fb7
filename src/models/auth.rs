// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Authentication request and outcome models.
//!
//! A rejected login is an ordinary value, not an error: callers branch on
//! [`AuthOutcome`]. On the wire both cases share the flat [`AuthResponse`]
//! shape (`{"success": true, "user", "token"}` / `{"success": false, "error"}`).

use crate::models::User;

/// Rejection message used when the backend gives none.
pub const INVALID_CREDENTIALS: &str = "Credenziali non valide";
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Login credentials. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Optional display name for newly created users
    pub name: Option<String>,
}

/// Result of an authentication attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "AuthResponse", try_from = "AuthResponse")]
pub enum AuthOutcome {
    Authenticated { user: User, token: String },
    Rejected { error: String },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated { .. })
    }
}

/// Flat wire representation of [`AuthOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Authenticated { user, token } => Self {
                success: true,
                user: Some(user),
                token: Some(token),
                error: None,
            },
            AuthOutcome::Rejected { error } => Self {
                success: false,
                user: None,
                token: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<AuthResponse> for AuthOutcome {
    type Error = String;

    fn try_from(response: AuthResponse) -> Result<Self, Self::Error> {
        if !response.success {
            return Ok(AuthOutcome::Rejected {
                error: response
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
            });
        }

        match (response.user, response.token) {
            (Some(user), Some(token)) => Ok(AuthOutcome::Authenticated { user, token }),
            _ => Err("successful auth response is missing user or token".to_string()),
        }
    }
}
