// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document model.
//!
//! Widgets are built as [`Element`] trees and appended to a [`Document`].
//! Click behaviour is attached as a declarative [`Action`] that the site
//! context dispatches; no markup ever carries executable code. Deferred
//! work (fade-out removal, notification expiry, redirects) is scheduled on
//! the document's own timeline and runs when [`Document::advance`] is called.

use crate::ui::forms::Form;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Unique handle of an element, stable for its lifetime.
pub type NodeId = u64;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// CSS `display` value controlled by the interaction layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    fn as_css(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

/// Handler attached to a clickable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CloseModal,
    DownloadProgramPdf,
    DismissNotification(NodeId),
    AcceptCookies,
    DismissCookies,
    Logout,
}

impl Action {
    /// Name emitted as `data-action` when rendering.
    pub fn name(&self) -> &'static str {
        match self {
            Action::CloseModal => "close-modal",
            Action::DownloadProgramPdf => "download-program-pdf",
            Action::DismissNotification(_) => "dismiss-notification",
            Action::AcceptCookies => "accept-cookies",
            Action::DismissCookies => "dismiss-cookies",
            Action::Logout => "logout",
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    node_id: NodeId,
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
    display: Option<Display>,
    on_click: Option<Action>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node_id: NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed),
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            display: None,
            on_click: None,
        }
    }

    // ─── Builder ─────────────────────────────────────────────────

    /// Set the HTML `id`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn html_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn own_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child_elements(&self) -> &[Element] {
        &self.children
    }

    pub fn display(&self) -> Option<Display> {
        self.display
    }

    /// Visible unless explicitly set to `display: none`.
    pub fn is_visible(&self) -> bool {
        self.display != Some(Display::None)
    }

    pub fn click_action(&self) -> Option<&Action> {
        self.on_click.as_ref()
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.push_text(out);
        }
    }

    // ─── Mutation ────────────────────────────────────────────────

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn set_display(&mut self, display: Display) {
        self.display = Some(display);
    }

    /// Drop the inline display so the stylesheet applies again.
    pub fn clear_display(&mut self) {
        self.display = None;
    }

    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    // ─── Traversal ───────────────────────────────────────────────

    pub fn find(&self, node_id: NodeId) -> Option<&Element> {
        if self.node_id == node_id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(node_id))
    }

    pub fn find_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        if self.node_id == node_id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(node_id))
    }

    /// Descendants (self included) matching `pred`, in document order.
    pub fn select(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect(pred, &mut out);
        out
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(pred, out);
        }
    }

    // ─── Rendering ───────────────────────────────────────────────

    /// Serialize to HTML. Text and attribute values are escaped; actions
    /// become `data-action` attributes for a delegated listener.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            push_attr(out, "id", id);
        }
        if !self.classes.is_empty() {
            push_attr(out, "class", &self.classes.join(" "));
        }
        for (name, value) in &self.attrs {
            push_attr(out, name, value);
        }
        if let Some(display) = self.display {
            push_attr(out, "style", &format!("display: {}", display.as_css()));
        }
        if let Some(action) = &self.on_click {
            push_attr(out, "data-action", action.name());
        }
        out.push('>');

        if is_void(&self.tag) {
            return;
        }

        if let Some(text) = &self.text {
            out.push_str(&escape_html(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "input" | "br" | "hr" | "meta" | "link")
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Deferred document work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Detach an element (handled by the document itself)
    Remove(NodeId),
    /// Change the location hash (handled by the site context)
    Navigate(String),
}

#[derive(Debug, Clone)]
struct Timer {
    due: Duration,
    task: TimerTask,
}

/// The page: body content, forms, focus, location and a virtual timeline.
#[derive(Debug)]
pub struct Document {
    body: Vec<Element>,
    forms: Vec<Form>,
    focused: Option<NodeId>,
    location_hash: String,
    scrolled_to: Option<String>,
    intersection_observer: bool,
    observed: Vec<NodeId>,
    now: Duration,
    timers: Vec<Timer>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document in an environment with intersection observer support.
    pub fn new() -> Self {
        Self {
            body: Vec::new(),
            forms: Vec::new(),
            focused: None,
            location_hash: String::new(),
            scrolled_to: None,
            intersection_observer: true,
            observed: Vec::new(),
            now: Duration::ZERO,
            timers: Vec::new(),
        }
    }

    // ─── Body ────────────────────────────────────────────────────

    /// Append to the end of the body.
    pub fn append(&mut self, element: Element) -> NodeId {
        let node_id = element.node_id();
        self.body.push(element);
        node_id
    }

    /// Detach an element (and its subtree). Returns false if absent.
    pub fn remove(&mut self, node_id: NodeId) -> bool {
        let removed = remove_from(&mut self.body, node_id);
        if removed {
            if let Some(focused) = self.focused {
                if self.get(focused).is_none() {
                    self.focused = None;
                }
            }
            self.observed.retain(|id| self.body.iter().any(|e| e.find(*id).is_some()));
        }
        removed
    }

    pub fn get(&self, node_id: NodeId) -> Option<&Element> {
        self.body.iter().find_map(|e| e.find(node_id))
    }

    pub fn get_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        self.body.iter_mut().find_map(|e| e.find_mut(node_id))
    }

    /// All elements matching `pred`, in document order.
    pub fn select(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        self.body.iter().flat_map(|e| e.select(pred)).collect()
    }

    pub fn by_class(&self, class: &str) -> Vec<&Element> {
        self.select(&|e| e.has_class(class))
    }

    pub fn first_by_class(&self, class: &str) -> Option<&Element> {
        self.by_class(class).into_iter().next()
    }

    pub fn count_class(&self, class: &str) -> usize {
        self.by_class(class).len()
    }

    /// Element with the given HTML id.
    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.select(&|e| e.html_id() == Some(id)).into_iter().next()
    }

    /// Node ids of all elements matching `pred`.
    pub fn node_ids(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<NodeId> {
        self.select(pred).into_iter().map(Element::node_id).collect()
    }

    /// Set `display` on every element carrying `class`. Returns how many.
    pub fn set_display_by_class(&mut self, class: &str, display: Display) -> usize {
        let targets = self.node_ids(&|e| e.has_class(class));
        for node_id in &targets {
            if let Some(element) = self.get_mut(*node_id) {
                element.set_display(display);
            }
        }
        targets.len()
    }

    pub fn clear_display_by_class(&mut self, class: &str) -> usize {
        let targets = self.node_ids(&|e| e.has_class(class));
        for node_id in &targets {
            if let Some(element) = self.get_mut(*node_id) {
                element.clear_display();
            }
        }
        targets.len()
    }

    // ─── Focus ───────────────────────────────────────────────────

    pub fn focus(&mut self, node_id: NodeId) -> bool {
        if self.get(node_id).is_some() {
            self.focused = Some(node_id);
            true
        } else {
            false
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    // ─── Forms ───────────────────────────────────────────────────

    pub fn add_form(&mut self, form: Form) {
        self.forms.push(form);
    }

    pub fn form(&self, id: &str) -> Option<&Form> {
        self.forms.iter().find(|f| f.id == id)
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut Form> {
        self.forms.iter_mut().find(|f| f.id == id)
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    // ─── Location ────────────────────────────────────────────────

    pub fn location_hash(&self) -> &str {
        &self.location_hash
    }

    pub fn set_location_hash(&mut self, hash: impl Into<String>) {
        self.location_hash = hash.into();
    }

    /// Record that the viewport was scrolled to the element with this id.
    pub fn scroll_into_view(&mut self, id: &str) -> bool {
        if self.by_id(id).is_none() {
            return false;
        }
        self.scrolled_to = Some(id.to_string());
        true
    }

    pub fn scrolled_to(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }

    // ─── Intersection observer ───────────────────────────────────

    pub fn supports_intersection_observer(&self) -> bool {
        self.intersection_observer
    }

    pub fn set_intersection_observer(&mut self, supported: bool) {
        self.intersection_observer = supported;
    }

    pub fn observe(&mut self, node_id: NodeId) {
        if !self.observed.contains(&node_id) {
            self.observed.push(node_id);
        }
    }

    /// Stop observing. Returns whether the node was observed.
    pub fn unobserve(&mut self, node_id: NodeId) -> bool {
        let before = self.observed.len();
        self.observed.retain(|id| *id != node_id);
        self.observed.len() != before
    }

    pub fn is_observed(&self, node_id: NodeId) -> bool {
        self.observed.contains(&node_id)
    }

    // ─── Timeline ────────────────────────────────────────────────

    /// Time elapsed on the document's timeline.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `after` has elapsed on the timeline.
    pub fn schedule(&mut self, after: Duration, task: TimerTask) {
        self.timers.push(Timer {
            due: self.now + after,
            task,
        });
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Move the timeline forward and run what became due, earliest first.
    /// Removals are applied here; other tasks are returned to the caller.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerTask> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            std::mem::take(&mut self.timers)
                .into_iter()
                .partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.due);

        let mut unhandled = Vec::new();
        for timer in due {
            match timer.task {
                TimerTask::Remove(node_id) => {
                    self.remove(node_id);
                }
                other => unhandled.push(other),
            }
        }
        unhandled
    }

    /// Serialize the body to HTML.
    pub fn to_html(&self) -> String {
        self.body.iter().map(Element::to_html).collect()
    }
}

fn remove_from(nodes: &mut Vec<Element>, node_id: NodeId) -> bool {
    if let Some(pos) = nodes.iter().position(|n| n.node_id == node_id) {
        nodes.remove(pos);
        return true;
    }
    nodes
        .iter_mut()
        .any(|n| remove_from(&mut n.children, node_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let el = Element::new("p")
            .attr("title", "\"quoted\"")
            .text("<script>alert('x')</script>");

        assert_eq!(
            el.to_html(),
            "<p title=\"&quot;quoted&quot;\">&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_actions_render_as_data_attributes() {
        let el = Element::new("button")
            .class("btn btn-primary")
            .on_click(Action::CloseModal)
            .text("Chiudi");

        assert_eq!(
            el.to_html(),
            "<button class=\"btn btn-primary\" data-action=\"close-modal\">Chiudi</button>"
        );
    }

    #[test]
    fn test_remove_nested_element() {
        let inner = Element::new("span").class("target");
        let inner_id = inner.node_id();
        let mut doc = Document::new();
        doc.append(Element::new("div").child(inner));

        assert_eq!(doc.count_class("target"), 1);
        assert!(doc.remove(inner_id));
        assert_eq!(doc.count_class("target"), 0);
        assert!(!doc.remove(inner_id));
    }

    #[test]
    fn test_removing_focused_element_clears_focus() {
        let mut doc = Document::new();
        let id = doc.append(Element::new("button"));
        assert!(doc.focus(id));

        doc.remove(id);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_advance_runs_due_timers_in_order() {
        let mut doc = Document::new();
        let id = doc.append(Element::new("div"));
        doc.schedule(Duration::from_millis(500), TimerTask::Navigate("#b".into()));
        doc.schedule(Duration::from_millis(300), TimerTask::Remove(id));
        doc.schedule(Duration::from_millis(100), TimerTask::Navigate("#a".into()));

        let ran = doc.advance(Duration::from_millis(300));
        assert_eq!(ran, vec![TimerTask::Navigate("#a".into())]);
        assert!(doc.get(id).is_none());
        assert_eq!(doc.pending_timers(), 1);

        let ran = doc.advance(Duration::from_millis(200));
        assert_eq!(ran, vec![TimerTask::Navigate("#b".into())]);
        assert_eq!(doc.pending_timers(), 0);
    }

    #[test]
    fn test_set_display_by_class() {
        let mut doc = Document::new();
        doc.append(Element::new("div").class("loading-indicator"));
        doc.append(Element::new("div").child(Element::new("span").class("loading-indicator")));

        assert_eq!(doc.set_display_by_class("loading-indicator", Display::Block), 2);
        assert!(doc
            .by_class("loading-indicator")
            .iter()
            .all(|e| e.display() == Some(Display::Block)));
    }
}
