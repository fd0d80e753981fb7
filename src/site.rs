// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page handlers.
//!
//! [`SiteContext`] owns everything a handler touches: application state,
//! the document, the key-value store and the backend services. Handlers run
//! one at a time on `&mut self`; the only suspension points are the service
//! calls.

use crate::models::{AuthOutcome, Credentials, FormCheckResult, Program, UserProfile};
use crate::services::Services;
use crate::state::AppState;
use crate::store::KeyValueStore;
use crate::ui::dom::{Action, Document, Element, NodeId, TimerTask};
use crate::ui::forms::validate_form;
use crate::ui::modal::{close_modal, show_modal, ModalAction};
use crate::ui::notification::{dismiss_notification, show_notification, NotificationKind};
use crate::ui::{consent, lazy, navigation, user_menu};
use std::sync::Arc;
use std::time::Duration;

/// Id of the form inspected by the "AI" form check.
pub const USER_FORM_ID: &str = "user-form";
/// Where a new trial lands.
pub const DASHBOARD_HASH: &str = "#dashboard";
/// Delay before redirecting a new trial user.
pub const TRIAL_REDIRECT_DELAY: Duration = Duration::from_secs(2);
/// Page loads slower than this are reported.
pub const SLOW_PAGE_LOAD: Duration = Duration::from_millis(3000);

const TRIAL_PASSWORD: &str = "demo";
const TRIAL_USER_NAME: &str = "Nuovo Utente";

pub struct SiteContext {
    pub state: AppState,
    pub document: Document,
    store: Arc<dyn KeyValueStore>,
    services: Services,
}

impl SiteContext {
    pub fn new(store: Arc<dyn KeyValueStore>, document: Document, services: Services) -> Self {
        Self {
            state: AppState::new(store.clone()),
            document,
            store,
            services,
        }
    }

    // ─── Page lifecycle ──────────────────────────────────────────

    /// Run once the document is ready.
    pub fn on_page_load(&mut self) {
        tracing::info!("Site interaction layer loaded");
        lazy::setup_lazy_loading(&mut self.document);
        consent::show_cookie_consent(&mut self.document, self.store.as_ref());
        self.update_user_interface();
    }

    /// Report the measured page load time.
    pub fn report_page_load(&self, load_time: Duration) -> bool {
        let slow = load_time > SLOW_PAGE_LOAD;
        if slow {
            tracing::warn!(load_ms = load_time.as_millis() as u64, "Slow page load detected");
        }
        slow
    }

    /// Move the document timeline forward, running due timers.
    pub fn advance(&mut self, elapsed: Duration) {
        // Removals are applied by the document; only navigations come back
        for task in self.document.advance(elapsed) {
            if let TimerTask::Navigate(hash) = task {
                self.document.set_location_hash(hash);
                self.on_hash_change();
                self.update_user_interface();
            }
        }
    }

    // ─── Events ──────────────────────────────────────────────────

    /// Click on an element; runs its action if it has one.
    pub fn click(&mut self, node_id: NodeId) -> bool {
        let Some(action) = self
            .document
            .get(node_id)
            .and_then(|e| e.click_action())
            .cloned()
        else {
            return false;
        };
        self.dispatch(action);
        true
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "Dispatching action");
        match action {
            Action::CloseModal => {
                close_modal(&mut self.document);
            }
            Action::DownloadProgramPdf => self.download_program_pdf(),
            Action::DismissNotification(banner) => {
                dismiss_notification(&mut self.document, banner);
            }
            Action::AcceptCookies => {
                consent::accept_cookies(&mut self.document, self.store.as_ref());
            }
            Action::DismissCookies => {
                consent::dismiss_cookies(&mut self.document, self.store.as_ref());
            }
            Action::Logout => self.logout(),
        }
    }

    /// Key press anywhere on the page. Escape closes the modal.
    pub fn on_key_down(&mut self, key: &str) {
        if key == "Escape" {
            close_modal(&mut self.document);
        }
    }

    /// The location hash changed.
    pub fn on_hash_change(&mut self) {
        navigation::handle_hash_change(&mut self.document);
    }

    /// Form submission. Returns false when the submission is blocked.
    pub fn on_form_submit(&mut self, form_id: &str) -> bool {
        let Some(form) = self.document.form_mut(form_id) else {
            return true;
        };

        let errors = validate_form(form);
        match errors.first() {
            Some(first) => {
                show_notification(&mut self.document, first, NotificationKind::Error);
                false
            }
            None => true,
        }
    }

    // ─── Handlers ────────────────────────────────────────────────

    /// Generate a program for the landing-page profile and show it.
    pub async fn generate_program(&mut self) {
        self.state.set_loading(true, &mut self.document);
        show_notification(
            &mut self.document,
            "Generazione programma in corso...",
            NotificationKind::Info,
        );

        let profile = UserProfile::landing_page();
        match self.services.programs.generate_program(&profile).await {
            Ok(response) if response.success => {
                self.display_program(&response.program);
                show_notification(
                    &mut self.document,
                    "Programma generato con successo!",
                    NotificationKind::Success,
                );
            }
            Ok(_) => {
                tracing::warn!("Program generation reported no success");
                show_notification(
                    &mut self.document,
                    "Errore nella generazione. Riprova.",
                    NotificationKind::Error,
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Error generating program");
                show_notification(
                    &mut self.document,
                    "Errore nella generazione. Riprova.",
                    NotificationKind::Error,
                );
            }
        }

        self.state.set_loading(false, &mut self.document);
    }

    /// Show a program in the modal.
    pub fn display_program(&mut self, program: &Program) -> NodeId {
        show_modal(
            &mut self.document,
            "Il Tuo Programma Personalizzato",
            program_content(program),
            vec![
                ModalAction::new("Scarica PDF", Action::DownloadProgramPdf)
                    .with_class("btn-primary"),
                ModalAction::new("Chiudi", Action::CloseModal).with_class("btn-secondary"),
            ],
        )
    }

    /// Run the remote check on the user form and show the verdict.
    pub async fn check_form_ai(&mut self) {
        let Some(data) = self.document.form(USER_FORM_ID).map(|f| f.data()) else {
            show_notification(&mut self.document, "Form non trovato", NotificationKind::Error);
            return;
        };

        self.state.set_loading(true, &mut self.document);

        match self.services.forms.check_form(&data).await {
            Ok(result) => {
                show_modal(
                    &mut self.document,
                    "Controllo Form AI",
                    form_check_content(&result),
                    Vec::new(),
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Error checking form");
                show_notification(
                    &mut self.document,
                    "Errore nel controllo form",
                    NotificationKind::Error,
                );
            }
        }

        self.state.set_loading(false, &mut self.document);
    }

    /// Start a free trial for `email` (the prompt's answer; `None` if cancelled).
    pub async fn start_trial(&mut self, email: Option<&str>) {
        let Some(email) = email.filter(|e| !e.is_empty()) else {
            return;
        };

        self.state.set_loading(true, &mut self.document);
        show_notification(
            &mut self.document,
            "Attivazione prova gratuita...",
            NotificationKind::Info,
        );

        let credentials = Credentials {
            email: Some(email.to_string()),
            password: Some(TRIAL_PASSWORD.to_string()),
            name: Some(TRIAL_USER_NAME.to_string()),
        };

        match self.services.auth.authenticate_user(&credentials).await {
            Ok(AuthOutcome::Authenticated { user, .. }) => {
                let welcome = format!("Benvenuto {}! Prova gratuita attivata.", user.name);
                tracing::info!(user_id = user.id, "Trial started");
                self.state.set_user(user);
                show_notification(&mut self.document, &welcome, NotificationKind::Success);
                self.document.schedule(
                    TRIAL_REDIRECT_DELAY,
                    TimerTask::Navigate(DASHBOARD_HASH.to_string()),
                );
            }
            Ok(AuthOutcome::Rejected { error }) => {
                show_notification(&mut self.document, &error, NotificationKind::Error);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error starting trial");
                show_notification(
                    &mut self.document,
                    "Errore nell'attivazione. Riprova.",
                    NotificationKind::Error,
                );
            }
        }

        self.state.set_loading(false, &mut self.document);
    }

    /// PDF export is not available yet; tell the user and close the modal.
    pub fn download_program_pdf(&mut self) {
        show_notification(
            &mut self.document,
            "Download PDF non ancora implementato. Verrà aggiunto nelle prossime versioni.",
            NotificationKind::Info,
        );
        close_modal(&mut self.document);
    }

    pub fn logout(&mut self) {
        self.state.clear_user();
        show_notification(&mut self.document, "Logout effettuato", NotificationKind::Info);
        self.update_user_interface();
    }

    /// Render the header for the current user.
    pub fn update_user_interface(&mut self) {
        let user = self.state.get_user().cloned();
        user_menu::update_user_interface(&mut self.document, user.as_ref());
    }
}

fn program_content(program: &Program) -> Vec<Element> {
    let n = &program.nutrition;
    vec![
        Element::new("h4").text(&program.name),
        Element::new("p")
            .child(Element::new("strong").text("Durata:"))
            .child(Element::new("span").text(format!(" {}", program.duration))),
        Element::new("h5").text("Piano Allenamento:"),
        Element::new("ul").children(program.workouts.iter().map(|w| {
            Element::new("li")
                .child(Element::new("strong").text(format!("{}:", w.day)))
                .child(Element::new("span").text(format!(
                    " {} ({})",
                    w.exercises.join(", "),
                    w.duration
                )))
        })),
        Element::new("h5").text("Piano Nutrizionale:"),
        Element::new("p")
            .child(Element::new("strong").text("Calorie giornaliere:"))
            .child(Element::new("span").text(format!(" {}", n.calories))),
        Element::new("p")
            .child(Element::new("strong").text("Macros:"))
            .child(Element::new("span").text(format!(
                " Proteine {}, Carboidrati {}, Grassi {}",
                n.protein, n.carbs, n.fat
            ))),
    ]
}

fn form_check_content(result: &FormCheckResult) -> Vec<Element> {
    let list = |items: &[String]| {
        Element::new("ul").children(items.iter().map(|i| Element::new("li").text(i)))
    };

    let mut content = vec![Element::new("h4").text("Risultato Controllo Form")];

    if result.valid {
        content.push(
            Element::new("p")
                .class("success-message")
                .text("\u{2705} Tutti i campi sono corretti!"),
        );
    } else {
        content.push(
            Element::new("div")
                .class("error-message")
                .child(Element::new("p").text("\u{26a0}\u{fe0f} Problemi trovati:"))
                .child(list(&result.issues)),
        );
    }

    if !result.suggestions.is_empty() {
        content.push(
            Element::new("div")
                .class("success-message")
                .child(Element::new("p").text("\u{1f4a1} Suggerimenti:"))
                .child(list(&result.suggestions)),
        );
    }

    content
}
