// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Modal dialog. At most one `.modal` exists in the document.

use crate::ui::dom::{Action, Display, Document, Element, NodeId, TimerTask};
use std::time::Duration;

/// Delay between hiding a modal and detaching it (fade-out).
pub const MODAL_FADE_OUT: Duration = Duration::from_millis(300);

const DEFAULT_BUTTON_CLASS: &str = "btn-secondary";

/// A button in the modal's action row.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalAction {
    pub text: String,
    pub action: Action,
    /// Extra button class, `btn-secondary` when absent
    pub class: Option<String>,
}

impl ModalAction {
    pub fn new(text: impl Into<String>, action: Action) -> Self {
        Self {
            text: text.into(),
            action,
            class: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    fn into_button(self) -> Element {
        let class = self.class.as_deref().unwrap_or(DEFAULT_BUTTON_CLASS);
        Element::new("button")
            .class("btn")
            .class(class)
            .on_click(self.action)
            .text(self.text)
    }
}

/// Replace any modal with a new visible one and focus its close control.
pub fn show_modal(
    doc: &mut Document,
    title: &str,
    content: Vec<Element>,
    actions: Vec<ModalAction>,
) -> NodeId {
    for existing in doc.node_ids(&|e| e.has_class("modal")) {
        doc.remove(existing);
    }

    let close = Element::new("span")
        .class("modal-close")
        .attr("role", "button")
        .attr("aria-label", "Chiudi")
        .attr("tabindex", "0")
        .on_click(Action::CloseModal)
        .text("\u{00d7}");
    let close_id = close.node_id();

    let mut modal = Element::new("div").class("modal").attr("role", "dialog").child(
        Element::new("div")
            .class("modal-content")
            .child(close)
            .child(Element::new("h3").text(title))
            .child(Element::new("div").class("modal-body").children(content))
            .child(
                Element::new("div")
                    .class("modal-actions")
                    .children(actions.into_iter().map(ModalAction::into_button)),
            ),
    );
    modal.set_display(Display::Block);

    let modal_id = doc.append(modal);
    doc.focus(close_id);
    tracing::debug!(title, "Modal shown");
    modal_id
}

/// Hide the current modal now and detach it after the fade-out.
///
/// Returns false when no modal is present.
pub fn close_modal(doc: &mut Document) -> bool {
    let Some(modal_id) = doc.first_by_class("modal").map(Element::node_id) else {
        return false;
    };

    if let Some(modal) = doc.get_mut(modal_id) {
        modal.set_display(Display::None);
    }
    doc.schedule(MODAL_FADE_OUT, TimerTask::Remove(modal_id));
    true
}

/// The visible modal, if any.
pub fn current_modal(doc: &Document) -> Option<&Element> {
    doc.by_class("modal").into_iter().find(|m| m.is_visible())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_button_class() {
        let button = ModalAction::new("Chiudi", Action::CloseModal).into_button();
        assert_eq!(button.classes(), ["btn", "btn-secondary"]);
    }

    #[test]
    fn test_close_without_modal_is_noop() {
        let mut doc = Document::new();
        assert!(!close_modal(&mut doc));
        assert_eq!(doc.pending_timers(), 0);
    }

    #[test]
    fn test_modal_removed_after_fade_out() {
        let mut doc = Document::new();
        show_modal(&mut doc, "Titolo", vec![], vec![]);
        assert!(close_modal(&mut doc));

        assert!(current_modal(&doc).is_none());
        assert_eq!(doc.count_class("modal"), 1);

        doc.advance(Duration::from_millis(299));
        assert_eq!(doc.count_class("modal"), 1);
        doc.advance(Duration::from_millis(1));
        assert_eq!(doc.count_class("modal"), 0);
    }
}
