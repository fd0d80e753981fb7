// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side key-value persistence (the browser storage equivalent).

use dashmap::DashMap;
use std::sync::Arc;

/// Storage keys as constants.
pub mod keys {
    /// JSON-serialized current user
    pub const USER: &str = "user";
    /// Cookie banner choice: "accepted" or "dismissed"
    pub const COOKIE_CONSENT: &str = "cookieConsent";
}

/// Durable string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-process store. Clones share the same entries, so a second
/// consumer built from a clone sees what the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set(keys::COOKIE_CONSENT, "accepted".to_string());
        assert_eq!(other.get(keys::COOKIE_CONSENT).as_deref(), Some("accepted"));

        other.remove(keys::COOKIE_CONSENT);
        assert!(store.get(keys::COOKIE_CONSENT).is_none());
        assert!(store.is_empty());
    }
}
