// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Document`] for headless hosts, demos, and tests.
//!
//! ## Layout model
//!
//! There is no real layout engine. Boxes come from three sources, in order:
//!
//! 1. An explicit rectangle set with [`MemoryDocument::set_rect`].
//! 2. For `ul` panels: `left`/`top`/`width`/`height` inline styles when present,
//!    otherwise the origin and a size of one [`row_size`](MemoryDocument::row_size)
//!    width by one row height per `li` child.
//! 3. For `li` rows: a row-sized slot inside the parent panel, by index.
//!
//! Everything else measures as [`Rect::ZERO`].
//!
//! ## Selectors
//!
//! [`Document::query_selector`] understands `#id`, `.class`, and bare tag names.
//!
//! ```
//! use kurbo::Size;
//! use understory_menu::document::Document;
//! use understory_menu::memory::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new(Size::new(800.0, 600.0));
//! let target = doc.append_to_body("div", "t");
//! assert_eq!(doc.query_selector("#t"), Some(target));
//! ```

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Rect, Size};

use crate::document::{Document, Listener, ListenerOptions};
use crate::types::{ElementId, Viewport};

#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    inner_html: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    rect: Option<Rect>,
}

struct Registered {
    element: ElementId,
    event: String,
    listener: Listener,
    options: ListenerOptions,
}

/// Element tree held in memory with a manually advanced clock.
///
/// Elements live in an arena and are never freed: a detached element keeps its
/// slot and its handle stays valid, so it can be appended again later. Each
/// menu show and submenu open allocates its rows plus a measurement clone, so
/// a long-running host should start a fresh document periodically.
/// [`node_count`](Self::node_count) reports the arena size.
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
    viewport: Viewport,
    row_size: Size,
    clock: Duration,
    listeners: Vec<Registered>,
}

impl core::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("nodes", &self.nodes.len())
            .field("viewport", &self.viewport)
            .field("clock", &self.clock)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl MemoryDocument {
    /// Create an empty `html`/`head`/`body` document with an unscaled viewport.
    pub fn new(viewport_size: Size) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: ElementId::new(0),
            head: ElementId::new(0),
            body: ElementId::new(0),
            viewport: Viewport::new(viewport_size),
            row_size: Size::new(120.0, 24.0),
            clock: Duration::ZERO,
            listeners: Vec::new(),
        };
        doc.root = doc.alloc(Node {
            tag: String::from("html"),
            ..Node::default()
        });
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        let (root, head, body) = (doc.root, doc.head, doc.body);
        doc.append_child(root, head);
        doc.append_child(root, body);
        doc
    }

    fn alloc(&mut self, node: Node) -> ElementId {
        let id = ElementId::new(self.nodes.len() as u64);
        self.nodes.push(node);
        id
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "ElementId values come from `alloc`, which indexes `nodes`."
    )]
    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.raw() as usize)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "ElementId values come from `alloc`, which indexes `nodes`."
    )]
    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id.raw() as usize)
    }

    /// Create an element, give it an `id`, and append it to the body.
    pub fn append_to_body(&mut self, tag: &str, id: &str) -> ElementId {
        let el = self.create_element(tag);
        self.set_attribute(el, "id", id);
        let body = self.body;
        self.append_child(body, el);
        el
    }

    /// Number of elements ever created, connected or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Replace the viewport metrics.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Size of one menu row in the fallback layout.
    pub fn row_size(&self) -> Size {
        self.row_size
    }

    /// Change the fallback row size.
    pub fn set_row_size(&mut self, size: Size) {
        self.row_size = size;
    }

    /// Pin an element's on-screen box.
    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(n) = self.node_mut(element) {
            n.rect = Some(rect);
        }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    /// Attribute value. `class` reflects the class list.
    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.node(element)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    /// Class list in insertion order.
    pub fn classes(&self, element: ElementId) -> Vec<&str> {
        self.node(element)
            .map(|n| n.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Inline style property.
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.node(element)?
            .styles
            .get(property)
            .map(String::as_str)
    }

    /// Text set with [`Document::set_text`].
    pub fn text(&self, element: ElementId) -> &str {
        self.node(element).map(|n| n.text.as_str()).unwrap_or_default()
    }

    /// Serialized content of `element`: raw markup followed by children, or the text.
    pub fn inner_markup(&self, element: ElementId) -> String {
        let Some(n) = self.node(element) else {
            return String::new();
        };
        if n.inner_html.is_none() && n.children.is_empty() {
            return n.text.clone();
        }
        let mut out = n.inner_html.clone().unwrap_or_default();
        for &c in &n.children {
            out.push_str(&self.outer_markup(c));
        }
        out
    }

    /// Serialized `element` including its own tag. Empty `title` attributes are skipped.
    pub fn outer_markup(&self, element: ElementId) -> String {
        let Some(n) = self.node(element) else {
            return String::new();
        };
        let mut open = n.tag.clone();
        for (name, value) in &n.attributes {
            if name == "title" && value.is_empty() {
                continue;
            }
            open.push_str(&format!(" {name}=\"{value}\""));
        }
        format!("<{open}>{}</{}>", self.inner_markup(element), n.tag)
    }

    /// Every connected element with `class`, in document order.
    pub fn query_all_by_class(&self, class: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.walk(self.root, &mut |doc, el| {
            if doc.has_class(el, class) {
                out.push(el);
            }
        });
        out
    }

    /// Invoke the caller listeners registered for `event` on `element`.
    ///
    /// Listeners registered with `once` are dropped after running.
    pub fn fire(&mut self, element: ElementId, event: &str) {
        let matching: Vec<Listener> = self
            .listeners
            .iter()
            .filter(|r| r.element == element && r.event == event)
            .map(|r| r.listener.clone())
            .collect();
        self.listeners
            .retain(|r| !(r.element == element && r.event == event && r.options.once));
        for listener in matching {
            listener(element);
        }
    }

    /// Number of caller listeners registered on `element`.
    pub fn listener_count(&self, element: ElementId) -> usize {
        self.listeners
            .iter()
            .filter(|r| r.element == element)
            .count()
    }

    fn walk(&self, el: ElementId, f: &mut dyn FnMut(&Self, ElementId)) {
        f(self, el);
        if let Some(n) = self.node(el) {
            for &c in &n.children {
                self.walk(c, f);
            }
        }
    }

    fn sync_class_attribute(&mut self, element: ElementId) {
        if let Some(n) = self.node_mut(element) {
            let joined = n.classes.join(" ");
            if joined.is_empty() {
                n.attributes.remove("class");
            } else {
                n.attributes.insert(String::from("class"), joined);
            }
        }
    }

    fn px(&self, element: ElementId, property: &str) -> Option<f64> {
        self.style(element, property)?
            .strip_suffix("px")?
            .trim()
            .parse()
            .ok()
    }

    fn panel_rect(&self, element: ElementId, n: &Node) -> Rect {
        let rows = n
            .children
            .iter()
            .filter(|&&c| self.node(c).is_some_and(|c| c.tag == "li"))
            .count();
        let x = self.px(element, "left").unwrap_or(0.0);
        let y = self.px(element, "top").unwrap_or(0.0);
        let w = self.px(element, "width").unwrap_or(self.row_size.width);
        let h = self
            .px(element, "height")
            .unwrap_or(self.row_size.height * rows as f64);
        Rect::new(x, y, x + w, y + h)
    }

    fn row_rect(&self, element: ElementId, n: &Node) -> Rect {
        let Some(parent) = n.parent else {
            return Rect::ZERO;
        };
        let Some(p) = self.node(parent) else {
            return Rect::ZERO;
        };
        if p.tag != "ul" {
            return Rect::ZERO;
        }
        let panel = self.bounding_rect(parent);
        let index = p
            .children
            .iter()
            .filter(|&&c| self.node(c).is_some_and(|c| c.tag == "li"))
            .position(|&c| c == element)
            .unwrap_or(0);
        let y = panel.y0 + self.row_size.height * index as f64;
        Rect::new(panel.x0, y, panel.x1, y + self.row_size.height)
    }

    fn deep_clone(&mut self, element: ElementId) -> ElementId {
        let Some(src) = self.node(element).cloned() else {
            return self.create_element("div");
        };
        let copy = self.alloc(Node {
            parent: None,
            children: Vec::new(),
            ..src.clone()
        });
        for child in src.children {
            let c = self.deep_clone(child);
            self.append_child(copy, c);
        }
        copy
    }
}

impl Document for MemoryDocument {
    fn create_element(&mut self, tag: &str) -> ElementId {
        self.alloc(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        })
    }

    fn clone_element(&mut self, element: ElementId) -> ElementId {
        self.deep_clone(element)
    }

    fn tag_name(&self, element: ElementId) -> Option<String> {
        self.node(element).map(|n| n.tag.clone())
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn head(&self) -> ElementId {
        self.head
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element)?.parent
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.insert_before(parent, child, None);
    }

    fn insert_before(&mut self, parent: ElementId, child: ElementId, reference: Option<ElementId>) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            return;
        }
        self.detach(child);
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            let at = reference
                .and_then(|r| p.children.iter().position(|&c| c == r))
                .unwrap_or(p.children.len());
            p.children.insert(at, child);
        }
    }

    fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.node(element).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != element);
        }
        if let Some(n) = self.node_mut(element) {
            n.parent = None;
        }
    }

    fn is_connected(&self, element: ElementId) -> bool {
        let mut cur = Some(element);
        while let Some(el) = cur {
            if el == self.root {
                return true;
            }
            cur = self.parent(el);
        }
        false
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let selector = selector.trim();
        let mut found = None;
        self.walk(self.root, &mut |doc, el| {
            if found.is_some() {
                return;
            }
            let hit = if let Some(id) = selector.strip_prefix('#') {
                doc.attribute(el, "id") == Some(id)
            } else if let Some(class) = selector.strip_prefix('.') {
                doc.has_class(el, class)
            } else {
                doc.node(el)
                    .is_some_and(|n| n.tag.eq_ignore_ascii_case(selector))
            };
            if hit {
                found = Some(el);
            }
        });
        found
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if name == "class" {
            if let Some(n) = self.node_mut(element) {
                n.classes = value.split_whitespace().map(ToString::to_string).collect();
            }
            self.sync_class_attribute(element);
            return;
        }
        if let Some(n) = self.node_mut(element) {
            n.attributes.insert(String::from(name), String::from(value));
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(n) = self.node_mut(element) {
            if n.classes.iter().any(|c| c == class) {
                return;
            }
            n.classes.push(String::from(class));
        }
        self.sync_class_attribute(element);
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        let old = self.children(element);
        for c in old {
            self.detach(c);
        }
        if let Some(n) = self.node_mut(element) {
            n.text = String::from(text);
            n.inner_html = None;
        }
    }

    fn set_inner_html(&mut self, element: ElementId, html: &str) {
        let old = self.children(element);
        for c in old {
            self.detach(c);
        }
        if let Some(n) = self.node_mut(element) {
            n.inner_html = Some(String::from(html));
            n.text.clear();
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(n) = self.node_mut(element) {
            n.styles.insert(String::from(property), String::from(value));
        }
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        let Some(n) = self.node(element) else {
            return Rect::ZERO;
        };
        if let Some(rect) = n.rect {
            return rect;
        }
        match n.tag.as_str() {
            "ul" => self.panel_rect(element, n),
            "li" => self.row_rect(element, n),
            _ => Rect::ZERO,
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn add_event_listener(
        &mut self,
        element: ElementId,
        event: &str,
        listener: Listener,
        options: ListenerOptions,
    ) {
        self.listeners.push(Registered {
            element,
            event: String::from(event),
            listener,
            options,
        });
    }

    fn now(&self) -> Duration {
        self.clock
    }
}
