// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client application state: current user and loading flag.
//!
//! The in-memory user mirrors or supersedes the stored copy. Reads hydrate
//! from the store only when memory is empty.

use crate::models::User;
use crate::store::{keys, KeyValueStore};
use crate::ui::dom::{Display, Document};
use std::sync::Arc;

/// Class of elements shown while a request is in flight.
pub const LOADING_INDICATOR_CLASS: &str = "loading-indicator";

pub struct AppState {
    user: Option<User>,
    loading: bool,
    store: Arc<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            user: None,
            loading: false,
            store,
        }
    }

    /// Keep the user in memory and persist it. Overwrites unconditionally.
    pub fn set_user(&mut self, user: User) {
        match serde_json::to_string(&user) {
            Ok(json) => self.store.set(keys::USER, json),
            Err(e) => tracing::error!(error = %e, "Failed to serialize user"),
        }
        self.user = Some(user);
    }

    /// Current user, hydrated from the store on first access.
    ///
    /// A malformed stored record reads as "no user".
    pub fn get_user(&mut self) -> Option<&User> {
        if self.user.is_none() {
            self.user = self.load_stored_user();
        }
        self.user.as_ref()
    }

    fn load_stored_user(&self) -> Option<User> {
        let raw = self.store.get(keys::USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed stored user");
                None
            }
        }
    }

    /// Forget the user in memory and in the store.
    pub fn clear_user(&mut self) {
        self.store.remove(keys::USER);
        self.user = None;
    }

    /// Update the flag and show or hide every loading indicator.
    pub fn set_loading(&mut self, loading: bool, doc: &mut Document) {
        self.loading = loading;
        let display = if loading {
            Display::Block
        } else {
            Display::None
        };
        doc.set_display_by_class(LOADING_INDICATOR_CLASS, display);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::ui::dom::Element;

    fn user(name: &str) -> User {
        User {
            id: 1,
            email: "test@example.com".to_string(),
            name: name.to_string(),
            subscription: "trial".to_string(),
            trial_days: 14,
        }
    }

    #[test]
    fn test_initial_state_is_empty() {
        let mut state = AppState::new(Arc::new(MemoryStore::new()));
        assert!(state.get_user().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_set_user_persists_json() {
        let store = MemoryStore::new();
        let mut state = AppState::new(Arc::new(store.clone()));
        state.set_user(user("Test User"));

        let raw = store.get(keys::USER).unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored["name"], "Test User");
        assert_eq!(stored["trialDays"], 14);
    }

    #[test]
    fn test_memory_supersedes_store() {
        let store = MemoryStore::new();
        let mut state = AppState::new(Arc::new(store.clone()));
        state.set_user(user("In Memory"));

        // another tab rewrites storage; this state keeps its own copy
        store.set(keys::USER, serde_json::to_string(&user("Other")).unwrap());
        assert_eq!(state.get_user().unwrap().name, "In Memory");
    }

    #[test]
    fn test_malformed_record_fails_closed() {
        let store = MemoryStore::new();
        store.set(keys::USER, "{not json".to_string());

        let mut state = AppState::new(Arc::new(store));
        assert!(state.get_user().is_none());
    }

    #[test]
    fn test_loading_toggles_indicators() {
        let mut doc = Document::new();
        doc.append(Element::new("div").class(LOADING_INDICATOR_CLASS));
        let mut state = AppState::new(Arc::new(MemoryStore::new()));

        state.set_loading(true, &mut doc);
        assert!(state.is_loading());
        assert_eq!(doc.first_by_class(LOADING_INDICATOR_CLASS).unwrap().display(), Some(Display::Block));

        state.set_loading(false, &mut doc);
        assert_eq!(doc.first_by_class(LOADING_INDICATOR_CLASS).unwrap().display(), Some(Display::None));
    }
}
