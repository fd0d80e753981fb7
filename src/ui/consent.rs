// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie consent banner (GDPR). Shown until a choice is remembered.

use crate::store::{keys, KeyValueStore};
use crate::ui::dom::{Action, Document, Element, NodeId};

/// The visitor's remembered choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Accepted,
    Dismissed,
}

impl ConsentChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsentChoice::Accepted => "accepted",
            ConsentChoice::Dismissed => "dismissed",
        }
    }
}

/// Append the banner unless a choice is stored or it is already shown.
pub fn show_cookie_consent(doc: &mut Document, store: &dyn KeyValueStore) -> Option<NodeId> {
    if store.get(keys::COOKIE_CONSENT).is_some() || doc.count_class("cookie-banner") > 0 {
        return None;
    }

    let banner = Element::new("div").class("cookie-banner").child(
        Element::new("div")
            .class("cookie-content")
            .child(
                Element::new("p")
                    .text("Questo sito utilizza cookie per migliorare l'esperienza utente. ")
                    .child(
                        Element::new("a")
                            .attr("href", "/privacy-policy")
                            .attr("target", "_blank")
                            .text("Leggi di più"),
                    ),
            )
            .child(
                Element::new("button")
                    .class("btn btn-primary btn-sm")
                    .on_click(Action::AcceptCookies)
                    .text("Accetta"),
            )
            .child(
                Element::new("button")
                    .class("btn btn-secondary btn-sm")
                    .on_click(Action::DismissCookies)
                    .text("Rifiuta"),
            ),
    );

    Some(doc.append(banner))
}

/// Remember the choice and take the banner down.
pub fn record_cookie_choice(doc: &mut Document, store: &dyn KeyValueStore, choice: ConsentChoice) {
    store.set(keys::COOKIE_CONSENT, choice.as_str().to_string());
    for banner in doc.node_ids(&|e| e.has_class("cookie-banner")) {
        doc.remove(banner);
    }
    tracing::info!(choice = choice.as_str(), "Cookie consent recorded");
}

pub fn accept_cookies(doc: &mut Document, store: &dyn KeyValueStore) {
    record_cookie_choice(doc, store, ConsentChoice::Accepted);
}

pub fn dismiss_cookies(doc: &mut Document, store: &dyn KeyValueStore) {
    record_cookie_choice(doc, store, ConsentChoice::Dismissed);
}
