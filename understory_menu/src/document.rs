// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host document capability consumed by the menu engine.
//!
//! ## Overview
//!
//! The engine never talks to a concrete rendering surface. Everything it needs
//! (element creation, tree edits, attributes, geometry, a clock) goes through
//! [`Document`]. A browser host would back this with the DOM; headless hosts and
//! tests can use [`MemoryDocument`](crate::memory::MemoryDocument).
//!
//! Events flow the other way: the host forwards pointer, keyboard, resize, and
//! wheel input to [`ContextMenu::handle_event`](crate::controller::ContextMenu::handle_event)
//! and calls [`ContextMenu::poll`](crate::controller::ContextMenu::poll) when
//! timers may have elapsed. The only listeners the engine registers with the host
//! are the caller-supplied ones attached to items.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Rect;

use crate::types::{ElementId, Viewport};

/// A caller-supplied listener; receives the element it was registered on.
pub type Listener = Rc<dyn Fn(ElementId)>;

/// Options passed through to the host when registering a [`Listener`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ListenerOptions {
    /// Run during the capture phase.
    pub capture: bool,
    /// Remove after the first invocation.
    pub once: bool,
    /// The listener never prevents the default action.
    pub passive: bool,
}

/// Element tree, geometry, and clock operations provided by the host.
///
/// Element handles stay valid after [`detach`](Document::detach); a detached
/// element can be re-inserted. Inserting an element that already has a parent
/// moves it.
pub trait Document {
    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Deep-copy an element and its subtree; the copy is detached.
    fn clone_element(&mut self, element: ElementId) -> ElementId;

    /// Lower-case tag name, or `None` for unknown handles.
    fn tag_name(&self, element: ElementId) -> Option<String>;

    /// The document body.
    fn body(&self) -> ElementId;

    /// The document head.
    fn head(&self) -> ElementId;

    /// Parent of `element`, if attached.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Children of `element` in document order.
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Insert `child` before `reference`, or append when `reference` is `None`.
    fn insert_before(&mut self, parent: ElementId, child: ElementId, reference: Option<ElementId>);

    /// Remove `element` from its parent.
    fn detach(&mut self, element: ElementId);

    /// Whether `element` is currently part of the document.
    fn is_connected(&self, element: ElementId) -> bool;

    /// First connected element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// Set an attribute.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Add a class to the element's class list.
    fn add_class(&mut self, element: ElementId, class: &str);

    /// Replace the element's content with a text node.
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Replace the element's content with parsed markup.
    fn set_inner_html(&mut self, element: ElementId, html: &str);

    /// Set one inline style property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// On-screen box of `element` in rendered coordinates.
    fn bounding_rect(&self, element: ElementId) -> Rect;

    /// Current viewport metrics.
    fn viewport(&self) -> Viewport;

    /// Register a caller listener for the named event on `element`.
    fn add_event_listener(
        &mut self,
        element: ElementId,
        event: &str,
        listener: Listener,
        options: ListenerOptions,
    );

    /// Monotonic time used for debouncing.
    fn now(&self) -> Duration;
}
