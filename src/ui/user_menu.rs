// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Header rendering for the signed-in state.

use crate::models::User;
use crate::ui::dom::{Action, Display, Document, Element};

/// Swap login buttons for the user menu, or back when signed out.
///
/// Signed out, login buttons lose any inline display and fall back to
/// the stylesheet.
pub fn update_user_interface(doc: &mut Document, user: Option<&User>) {
    let Some(user) = user else {
        doc.clear_display_by_class("login-btn");
        for menu in doc.node_ids(&|e| e.has_class("user-menu")) {
            if let Some(menu) = doc.get_mut(menu) {
                menu.set_display(Display::None);
                menu.replace_children(Vec::new());
            }
        }
        return;
    };

    doc.set_display_by_class("login-btn", Display::None);
    for menu in doc.node_ids(&|e| e.has_class("user-menu")) {
        if let Some(menu) = doc.get_mut(menu) {
            menu.set_display(Display::Block);
            menu.replace_children(vec![
                Element::new("span").text(format!("Ciao, {}!", user.name)),
                Element::new("button")
                    .class("btn btn-sm")
                    .on_click(Action::Logout)
                    .text("Logout"),
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Document {
        let mut doc = Document::new();
        doc.append(Element::new("button").class("login-btn").text("Accedi"));
        doc.append(Element::new("div").class("user-menu"));
        doc
    }

    fn user() -> User {
        User {
            id: 7,
            email: "giulia@example.it".to_string(),
            name: "Giulia".to_string(),
            subscription: "trial".to_string(),
            trial_days: 14,
        }
    }

    #[test]
    fn test_anonymous_visit_leaves_login_styles_alone() {
        let mut doc = header();
        update_user_interface(&mut doc, None);

        let login = doc.first_by_class("login-btn").unwrap();
        assert_eq!(login.display(), None);
        assert!(!doc.to_html().contains("display: block"));
    }

    #[test]
    fn test_sign_out_restores_stylesheet_display() {
        let mut doc = header();
        update_user_interface(&mut doc, Some(&user()));
        assert_eq!(
            doc.first_by_class("login-btn").unwrap().display(),
            Some(Display::None)
        );
        assert!(doc
            .first_by_class("user-menu")
            .unwrap()
            .text_content()
            .contains("Ciao, Giulia!"));

        update_user_interface(&mut doc, None);
        let login = doc.first_by_class("login-btn").unwrap();
        assert_eq!(login.display(), None);
        assert!(login.is_visible());
        let menu = doc.first_by_class("user-menu").unwrap();
        assert_eq!(menu.display(), Some(Display::None));
        assert!(menu.child_elements().is_empty());
    }
}
