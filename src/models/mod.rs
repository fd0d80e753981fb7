// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models shared by the client layer and the demo backend.

pub mod auth;
pub mod form;
pub mod program;
pub mod user;

pub use auth::{AuthOutcome, AuthResponse, Credentials};
pub use form::{FormCheckResult, FormData};
pub use program::{GenerateProgramResponse, Nutrition, Program, UserProfile, Workout};
pub use user::User;
