// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element construction for panels and resolved items.

use crate::document::Document;
use crate::item::{ActionFn, Download, MenuDefinition, ResolvedBehavior, ResolvedItem};
use crate::types::{Attributes, ElementId, ItemClass};

/// What an item does when it is clicked or hovered.
#[derive(Clone)]
pub(crate) enum Behavior {
    /// Nothing beyond the sibling-close hover shared by every row.
    Inert,
    /// Run the trigger, then close the tree.
    Action(ActionFn),
    /// Close the tree and let the host follow the link.
    Link,
    /// Open a nested panel on hover.
    SubMenu {
        menu: MenuDefinition,
        attributes: Option<Attributes>,
    },
}

impl core::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Inert => f.write_str("Inert"),
            Self::Action(_) => f.write_str("Action(..)"),
            Self::Link => f.write_str("Link"),
            Self::SubMenu { menu, .. } => f
                .debug_struct("SubMenu")
                .field("items", &menu.len())
                .finish_non_exhaustive(),
        }
    }
}

/// A freshly built item element.
#[derive(Debug)]
pub(crate) struct BuiltItem {
    pub(crate) element: ElementId,
    pub(crate) classes: ItemClass,
    pub(crate) behavior: Behavior,
}

fn mark(doc: &mut dyn Document, element: ElementId, classes: &mut ItemClass, class: ItemClass) {
    *classes |= class;
    for name in class.names() {
        doc.add_class(element, name);
    }
}

/// Create an empty panel (`ul`) with its class and attributes.
pub(crate) fn build_panel(
    doc: &mut dyn Document,
    class: &str,
    attributes: Option<&Attributes>,
) -> ElementId {
    let panel = doc.create_element("ul");
    doc.add_class(panel, class);
    for (name, value) in attributes.into_iter().flatten() {
        doc.set_attribute(panel, name, value);
    }
    panel
}

/// Build the `li` for one resolved item.
///
/// Caller attributes go on first so the builder's own classes and `title` win.
/// Dividers carry only their class. Headings, and disabled rows of any
/// variant, get no click or submenu behavior.
pub(crate) fn build_item(doc: &mut dyn Document, item: ResolvedItem) -> BuiltItem {
    let li = doc.create_element("li");
    let mut classes = ItemClass::empty();

    if matches!(item.behavior, ResolvedBehavior::Divider) {
        mark(doc, li, &mut classes, ItemClass::DIVIDER);
        return BuiltItem {
            element: li,
            classes,
            behavior: Behavior::Inert,
        };
    }

    let interactive = item.is_interactive();
    let disabled = item.is_disabled();
    let ResolvedItem { content, behavior } = item;

    for (name, value) in &content.attributes {
        doc.set_attribute(li, name, value);
    }

    // Enabled links build their body straight into the hyperlink.
    let link = match &behavior {
        ResolvedBehavior::Anchor { .. } if interactive && !disabled => {
            Some(doc.create_element("a"))
        }
        _ => None,
    };
    let body = link.unwrap_or(li);

    if let Some(element) = content.element {
        doc.append_child(body, element);
    } else if let Some(html) = &content.html {
        doc.set_inner_html(body, html);
    } else {
        let span = doc.create_element("span");
        doc.set_text(span, content.text.as_deref().unwrap_or_default());
        doc.append_child(body, span);
    }
    doc.set_attribute(li, "title", content.tooltip.as_deref().unwrap_or_default());
    if let Some(style) = &content.style {
        doc.set_attribute(li, "style", style);
    }
    if let Some(icon) = &content.icon {
        let img = doc.create_element("img");
        doc.set_attribute(img, "src", icon);
        doc.append_child(body, img);
        mark(doc, li, &mut classes, ItemClass::ICON);
    }
    for (event, listener) in content.events {
        doc.add_event_listener(
            li,
            &event,
            listener.handler,
            listener.options.unwrap_or_default(),
        );
    }

    if !interactive {
        mark(doc, li, &mut classes, ItemClass::HEADING);
        return BuiltItem {
            element: li,
            classes,
            behavior: Behavior::Inert,
        };
    }

    if disabled {
        mark(doc, li, &mut classes, ItemClass::DISABLED);
        if matches!(behavior, ResolvedBehavior::SubMenu { .. }) {
            mark(doc, li, &mut classes, ItemClass::SUBMENU);
        }
        return BuiltItem {
            element: li,
            classes,
            behavior: Behavior::Inert,
        };
    }

    mark(doc, li, &mut classes, ItemClass::INTERACTIVE);
    let behavior = match behavior {
        ResolvedBehavior::Divider | ResolvedBehavior::Heading => Behavior::Inert,
        ResolvedBehavior::Action(action) => Behavior::Action(action),
        ResolvedBehavior::Anchor {
            href,
            target,
            download,
        } => {
            let a = link.unwrap_or_else(|| doc.create_element("a"));
            doc.set_attribute(a, "href", &href);
            if let Some(target) = &target {
                doc.set_attribute(a, "target", target);
            }
            match &download {
                Some(Download::Unnamed) => doc.set_attribute(a, "download", ""),
                Some(Download::Named(name)) => doc.set_attribute(a, "download", name),
                None => {}
            }
            doc.append_child(li, a);
            Behavior::Link
        }
        ResolvedBehavior::SubMenu { menu, attributes } => {
            mark(doc, li, &mut classes, ItemClass::SUBMENU);
            Behavior::SubMenu { menu, attributes }
        }
    };

    BuiltItem {
        element: li,
        classes,
        behavior,
    }
}
