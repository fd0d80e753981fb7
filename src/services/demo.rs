// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Demo backend: fixed latency, deterministic answers, no I/O.

use crate::models::{
    AuthOutcome, Credentials, FormCheckResult, FormData, GenerateProgramResponse, Nutrition,
    Program, User, UserProfile, Workout,
};
use crate::services::{AuthService, FormValidationService, ProgramService, ServiceError};
use crate::time_utils::{Clock, Delay};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

pub use crate::models::auth::INVALID_CREDENTIALS;

pub const PROGRAM_DELAY: Duration = Duration::from_millis(2000);
pub const FORM_CHECK_DELAY: Duration = Duration::from_millis(1500);
pub const AUTH_DELAY: Duration = Duration::from_millis(1000);

pub const NAME_TOO_SHORT: &str = "Nome deve essere almeno 2 caratteri";
pub const INVALID_EMAIL: &str = "Email non valida";
pub const FORM_OK_SUGGESTION: &str = "Ottimo! Tutti i campi sono corretti";
pub const TOKEN_PREFIX: &str = "demo_token_";

const DEMO_USER_ID: u64 = 123;
const DEFAULT_USER_NAME: &str = "Utente Demo";
const TRIAL_SUBSCRIPTION: &str = "trial";
const TRIAL_DAYS: u32 = 14;

/// Local stand-in for the backend.
pub struct DemoServices {
    delay: Arc<dyn Delay>,
    clock: Arc<dyn Clock>,
}

impl DemoServices {
    pub fn new(delay: Arc<dyn Delay>, clock: Arc<dyn Clock>) -> Self {
        Self { delay, clock }
    }
}

#[async_trait]
impl ProgramService for DemoServices {
    async fn generate_program(
        &self,
        profile: &UserProfile,
    ) -> Result<GenerateProgramResponse, ServiceError> {
        self.delay.sleep(PROGRAM_DELAY).await;
        tracing::debug!(goal = %profile.goal, "Generating demo program");
        Ok(GenerateProgramResponse {
            success: true,
            program: demo_program(self.clock.now_millis()),
        })
    }
}

#[async_trait]
impl FormValidationService for DemoServices {
    async fn check_form(&self, data: &FormData) -> Result<FormCheckResult, ServiceError> {
        self.delay.sleep(FORM_CHECK_DELAY).await;
        Ok(check_form_rules(data))
    }
}

#[async_trait]
impl AuthService for DemoServices {
    async fn authenticate_user(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthOutcome, ServiceError> {
        self.delay.sleep(AUTH_DELAY).await;
        Ok(authenticate(credentials, self.clock.now_millis()))
    }
}

/// The fixed three-day plan.
pub fn demo_program(id: i64) -> Program {
    let workout = |day: &str, exercises: [&str; 3], duration: &str| Workout {
        day: day.to_string(),
        exercises: exercises.iter().map(|e| e.to_string()).collect(),
        duration: duration.to_string(),
    };

    Program {
        id,
        name: "Programma Personalizzato".to_string(),
        duration: "12 settimane".to_string(),
        workouts: vec![
            workout("Lunedì", ["Push-up", "Squat", "Plank"], "45 min"),
            workout("Mercoledì", ["Deadlift", "Pull-up", "Burpees"], "50 min"),
            workout("Venerdì", ["Bench Press", "Leg Press", "Abs"], "45 min"),
        ],
        nutrition: Nutrition {
            calories: 2200,
            protein: "140g".to_string(),
            carbs: "220g".to_string(),
            fat: "80g".to_string(),
        },
    }
}

/// Fields checked by the form rules. A missing field fails its rule.
#[derive(Debug, Validate)]
struct CheckedFields {
    #[validate(
        required(message = "Nome deve essere almeno 2 caratteri"),
        length(min = 2, message = "Nome deve essere almeno 2 caratteri")
    )]
    name: Option<String>,
    #[validate(
        required(message = "Email non valida"),
        contains(pattern = "@", message = "Email non valida")
    )]
    email: Option<String>,
}

/// Field order of reported issues.
const CHECKED_FIELD_ORDER: [&str; 2] = ["name", "email"];

/// Rule-based check: name of at least 2 characters, email containing "@".
pub fn check_form_rules(data: &FormData) -> FormCheckResult {
    let fields = CheckedFields {
        name: data.get("name").map(str::to_string),
        email: data.get("email").map(str::to_string),
    };

    let issues: Vec<String> = match fields.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => {
            let by_field = errors.field_errors();
            CHECKED_FIELD_ORDER
                .iter()
                .filter_map(|field| by_field.get(*field).and_then(|errs| errs.first()))
                .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
                .collect()
        }
    };

    let valid = issues.is_empty();
    FormCheckResult {
        valid,
        issues,
        suggestions: if valid {
            vec![FORM_OK_SUGGESTION.to_string()]
        } else {
            Vec::new()
        },
    }
}

/// Accept any non-empty email/password pair and fabricate a trial user.
pub fn authenticate(credentials: &Credentials, now_millis: i64) -> AuthOutcome {
    let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);

    match (non_empty(&credentials.email), non_empty(&credentials.password)) {
        (Some(email), Some(_)) => AuthOutcome::Authenticated {
            user: User {
                id: DEMO_USER_ID,
                email,
                name: non_empty(&credentials.name)
                    .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
                subscription: TRIAL_SUBSCRIPTION.to_string(),
                trial_days: TRIAL_DAYS,
            },
            token: format!("{}{}", TOKEN_PREFIX, now_millis),
        },
        _ => AuthOutcome::Rejected {
            error: INVALID_CREDENTIALS.to_string(),
        },
    }
}
