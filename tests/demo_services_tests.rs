// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Demo service behaviour: program generation, form check, login.

use fitness_site::models::{AuthOutcome, Credentials, FormData, UserProfile};
use fitness_site::services::demo::{AUTH_DELAY, FORM_CHECK_DELAY, PROGRAM_DELAY};
use fitness_site::services::{AuthService, DemoServices, FormValidationService, ProgramService};
use fitness_site::time_utils::{FixedClock, RecordingDelay};
use std::sync::Arc;

mod common;

fn credentials(email: Option<&str>, password: Option<&str>) -> Credentials {
    Credentials {
        email: email.map(str::to_string),
        password: password.map(str::to_string),
        name: None,
    }
}

#[tokio::test]
async fn test_generate_program_is_fixed_plan() {
    let services = common::instant_services();
    let profiles = [
        UserProfile::default(),
        UserProfile::landing_page(),
        UserProfile {
            age: 25,
            weight: 70,
            goal: "weight_loss".to_string(),
            ..UserProfile::default()
        },
    ];

    for profile in &profiles {
        let response = services.programs.generate_program(profile).await.unwrap();
        assert!(response.success);
        assert_eq!(response.program.workouts.len(), 3);
        assert_eq!(response.program.nutrition.calories, 2200);
        assert_eq!(response.program.id, common::TEST_NOW_MILLIS);
        assert_eq!(response.program.name, "Programma Personalizzato");
    }
}

#[tokio::test]
async fn test_check_form_reports_issues_in_order() {
    let services = common::instant_services();
    let data: FormData = [("name", "A"), ("email", "invalid-email")].into_iter().collect();

    let result = services.forms.check_form(&data).await.unwrap();

    assert!(!result.valid);
    assert_eq!(
        result.issues,
        vec!["Nome deve essere almeno 2 caratteri", "Email non valida"]
    );
    assert!(result.suggestions.is_empty());
}

#[tokio::test]
async fn test_check_form_accepts_valid_data() {
    let services = common::instant_services();
    let data: FormData = [("name", "John Doe"), ("email", "john@example.com")]
        .into_iter()
        .collect();

    let result = services.forms.check_form(&data).await.unwrap();

    assert!(result.valid);
    assert!(result.issues.is_empty());
    assert_eq!(result.suggestions, vec!["Ottimo! Tutti i campi sono corretti"]);
}

#[tokio::test]
async fn test_authenticate_accepts_any_non_empty_pair() {
    let services = common::instant_services();
    let pairs = [("a@b.it", "x"), ("not-even-an-email", "demo"), ("mario@rossi.it", "s3cret!")];

    for (email, password) in pairs {
        let outcome = services
            .auth
            .authenticate_user(&credentials(Some(email), Some(password)))
            .await
            .unwrap();

        match outcome {
            AuthOutcome::Authenticated { user, token } => {
                assert!(token.starts_with("demo_token_"));
                assert_eq!(user.id, 123);
                assert_eq!(user.email, email);
                assert_eq!(user.name, "Utente Demo");
                assert_eq!(user.subscription, "trial");
                assert_eq!(user.trial_days, 14);
            }
            other => panic!("expected success for {}, got {:?}", email, other),
        }
    }
}

#[tokio::test]
async fn test_authenticate_rejects_missing_fields() {
    let services = common::instant_services();
    let cases = [
        credentials(None, Some("x")),
        credentials(Some("a@b.it"), None),
        credentials(Some(""), Some("x")),
        credentials(Some("a@b.it"), Some("")),
        credentials(None, None),
    ];

    for case in &cases {
        let outcome = services.auth.authenticate_user(case).await.unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Rejected {
                error: "Credenziali non valide".to_string()
            }
        );
    }
}

#[tokio::test]
async fn test_each_operation_waits_its_fixed_delay() {
    let delay = Arc::new(RecordingDelay::new());
    let demo = DemoServices::new(delay.clone(), Arc::new(FixedClock(0)));

    demo.generate_program(&UserProfile::default()).await.unwrap();
    demo.check_form(&FormData::new()).await.unwrap();
    demo.authenticate_user(&Credentials::default()).await.unwrap();

    assert_eq!(
        delay.requested(),
        vec![PROGRAM_DELAY, FORM_CHECK_DELAY, AUTH_DELAY]
    );
}
