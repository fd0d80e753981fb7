// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dismissible, self-expiring notification banners.

use crate::ui::dom::{Action, Document, Element, NodeId, TimerTask};
use std::fmt;
use std::time::Duration;

/// How long a notification stays before removing itself.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Notification severity, rendered as `notification-<kind>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append a banner that expires after [`NOTIFICATION_TTL`].
pub fn show_notification(doc: &mut Document, message: &str, kind: NotificationKind) -> NodeId {
    let banner = Element::new("div")
        .class("notification")
        .class(&format!("notification-{}", kind))
        .attr("role", "status");
    let banner_id = banner.node_id();

    let banner = banner.child(Element::new("span").text(message)).child(
        Element::new("button")
            .attr("aria-label", "Chiudi")
            .on_click(Action::DismissNotification(banner_id))
            .text("\u{00d7}"),
    );

    doc.append(banner);
    doc.schedule(NOTIFICATION_TTL, TimerTask::Remove(banner_id));
    banner_id
}

/// Remove a banner before it expires.
pub fn dismiss_notification(doc: &mut Document, banner_id: NodeId) -> bool {
    doc.remove(banner_id)
}

/// Messages of all notifications currently shown, oldest first.
pub fn notification_messages(doc: &Document) -> Vec<String> {
    doc.by_class("notification")
        .iter()
        .filter_map(|n| n.child_elements().first())
        .map(Element::text_content)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires() {
        let mut doc = Document::new();
        let id = show_notification(&mut doc, "Ciao", NotificationKind::Success);

        let banner = doc.get(id).unwrap();
        assert!(banner.has_class("notification-success"));
        assert_eq!(notification_messages(&doc), vec!["Ciao"]);

        doc.advance(Duration::from_millis(4999));
        assert!(doc.get(id).is_some());
        doc.advance(Duration::from_millis(1));
        assert!(doc.get(id).is_none());
    }

    #[test]
    fn test_dismiss_button_targets_its_banner() {
        let mut doc = Document::new();
        let id = show_notification(&mut doc, "Ciao", NotificationKind::Info);

        let button = doc.select(&|e| e.tag() == "button")[0];
        assert_eq!(button.click_action(), Some(&Action::DismissNotification(id)));

        assert!(dismiss_notification(&mut doc, id));
        // the expiry timer later finds nothing to remove
        doc.advance(NOTIFICATION_TTL);
        assert_eq!(doc.count_class("notification"), 0);
    }
}
