// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! UI layer: document model and widgets.

pub mod consent;
pub mod dom;
pub mod forms;
pub mod lazy;
pub mod modal;
pub mod navigation;
pub mod notification;
pub mod user_menu;

pub use dom::{Action, Display, Document, Element, NodeId, TimerTask};
pub use forms::{validate_form, Field, FieldKind, Form};
pub use modal::{close_modal, show_modal, ModalAction};
pub use notification::{show_notification, NotificationKind};
