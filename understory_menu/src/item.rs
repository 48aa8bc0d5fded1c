// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu definitions: item variants, their fields, and per-render resolution.
//!
//! ## Variants
//!
//! [`MenuItem`] is a closed set of variants. Build them with the constructors
//! ([`MenuItem::heading`], [`MenuItem::action`], [`MenuItem::link`],
//! [`MenuItem::submenu`], [`MenuItem::divider`]) and refine with the chained
//! setters, or convert a loose [`ItemFields`] bag whose present fields decide
//! the variant.
//!
//! ## Resolution
//!
//! Every field is a [`Value`]. [`MenuItem::resolve`] evaluates each field once
//! and returns a [`ResolvedItem`] snapshot; classification, the disabled check,
//! and element building all read that one snapshot.
//!
//! ```
//! use understory_menu::item::{ItemKind, MenuItem};
//!
//! let item = MenuItem::submenu("More", Vec::<MenuItem>::new());
//! let resolved = item.resolve();
//! assert_eq!(resolved.kind(), ItemKind::SubMenu);
//! // An empty nested definition disables the row.
//! assert!(resolved.is_disabled());
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::document::{Document, Listener, ListenerOptions};
use crate::types::{Attributes, ElementId};
use crate::value::Value;

/// Ordered list of items; order is rendering order.
pub type MenuDefinition = Vec<MenuItem>;

/// Trigger for an [`MenuItem::Action`]; receives the document and the clicked item element.
///
/// It runs while the menu is still mounted.
pub type ActionFn = Rc<dyn Fn(&mut dyn Document, ElementId)>;

/// A caller listener registered on an item element.
#[derive(Clone)]
pub struct ItemListener {
    /// The handler.
    pub handler: Listener,
    /// Registration options; `None` registers with defaults.
    pub options: Option<ListenerOptions>,
}

impl core::fmt::Debug for ItemListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemListener")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Event name → listener pairs, registered in order.
pub type EventMap = Vec<(String, ItemListener)>;

/// How a link should download its target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Download {
    /// Download with the browser-chosen file name (`download=""`).
    Unnamed,
    /// Download as the given file name.
    Named(String),
}

/// Fields shared by every variant except [`MenuItem::Divider`].
#[derive(Clone, Default)]
pub struct ItemContent {
    /// Plain text body, wrapped in a `span`.
    pub text: Option<Value<String>>,
    /// Markup body; replaces `text`.
    pub html: Option<Value<String>>,
    /// Caller-created element body; replaces `html` and `text`.
    pub element: Option<Value<ElementId>>,
    /// Written to the `title` attribute.
    pub tooltip: Option<Value<String>>,
    /// Icon image URL.
    pub icon: Option<Value<String>>,
    /// Inline style string.
    pub style: Option<Value<String>>,
    /// Attributes applied before anything else.
    pub attributes: Option<Value<Attributes>>,
    /// Caller listeners.
    pub events: Option<Value<EventMap>>,
    /// Render greyed out and inert.
    pub disabled: Option<Value<bool>>,
}

impl core::fmt::Debug for ItemContent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemContent")
            .field("text", &self.text)
            .field("html", &self.html)
            .field("element", &self.element)
            .field("tooltip", &self.tooltip)
            .field("icon", &self.icon)
            .field("style", &self.style)
            .field("attributes", &self.attributes)
            .field("events", &self.events)
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl ItemContent {
    /// Content with a text body.
    pub fn text(text: impl Into<Value<String>>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    fn resolve(&self) -> ResolvedContent {
        ResolvedContent {
            text: self.text.as_ref().map(Value::resolve),
            html: self.html.as_ref().map(Value::resolve),
            element: self.element.as_ref().map(Value::resolve),
            tooltip: self.tooltip.as_ref().map(Value::resolve),
            icon: self.icon.as_ref().map(Value::resolve),
            style: self.style.as_ref().map(Value::resolve),
            attributes: self
                .attributes
                .as_ref()
                .map(Value::resolve)
                .unwrap_or_default(),
            events: self.events.as_ref().map(Value::resolve).unwrap_or_default(),
            disabled: self.disabled.as_ref().is_some_and(Value::resolve),
        }
    }
}

/// Navigation target of a [`MenuItem::Anchor`].
#[derive(Clone, Debug)]
pub struct Link {
    /// Navigation target URL.
    pub href: Value<String>,
    /// Browsing context, e.g. `_blank`.
    pub target: Option<Value<String>>,
    /// Download directive.
    pub download: Option<Value<Download>>,
}

/// One row of a menu.
#[derive(Clone)]
pub enum MenuItem {
    /// Separator; carries no content.
    Divider,
    /// Display-only row.
    Heading(ItemContent),
    /// Row that runs a trigger on click, then closes the menu.
    Action {
        /// Row content.
        content: ItemContent,
        /// Click trigger.
        action: ActionFn,
    },
    /// Row wrapped in a hyperlink; closes the menu on click.
    Anchor {
        /// Row content.
        content: ItemContent,
        /// Navigation target.
        link: Link,
    },
    /// Row that opens a nested panel on hover.
    SubMenu {
        /// Row content.
        content: ItemContent,
        /// Nested definition.
        menu: Value<MenuDefinition>,
        /// Attributes for the nested panel.
        attributes: Option<Value<Attributes>>,
    },
}

impl core::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Divider => f.write_str("Divider"),
            Self::Heading(content) => f.debug_tuple("Heading").field(content).finish(),
            Self::Action { content, .. } => f
                .debug_struct("Action")
                .field("content", content)
                .finish_non_exhaustive(),
            Self::Anchor { content, link } => f
                .debug_struct("Anchor")
                .field("content", content)
                .field("link", link)
                .finish(),
            Self::SubMenu {
                content,
                menu,
                attributes,
            } => f
                .debug_struct("SubMenu")
                .field("content", content)
                .field("menu", menu)
                .field("attributes", attributes)
                .finish(),
        }
    }
}

/// Variant tag of a [`MenuItem`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ItemKind {
    /// See [`MenuItem::Divider`].
    Divider,
    /// See [`MenuItem::Heading`].
    Heading,
    /// See [`MenuItem::Action`].
    Action,
    /// See [`MenuItem::Anchor`].
    Anchor,
    /// See [`MenuItem::SubMenu`].
    SubMenu,
}

impl MenuItem {
    /// A separator row.
    pub fn divider() -> Self {
        Self::Divider
    }

    /// A display-only row.
    pub fn heading(text: impl Into<Value<String>>) -> Self {
        Self::Heading(ItemContent::text(text))
    }

    /// A row that runs `action` when clicked.
    pub fn action(
        text: impl Into<Value<String>>,
        action: impl Fn(&mut dyn Document, ElementId) + 'static,
    ) -> Self {
        Self::Action {
            content: ItemContent::text(text),
            action: Rc::new(action),
        }
    }

    /// A row that navigates to `href`.
    pub fn link(text: impl Into<Value<String>>, href: impl Into<Value<String>>) -> Self {
        Self::Anchor {
            content: ItemContent::text(text),
            link: Link {
                href: href.into(),
                target: None,
                download: None,
            },
        }
    }

    /// A row that opens `menu` beside itself.
    pub fn submenu(text: impl Into<Value<String>>, menu: impl Into<Value<MenuDefinition>>) -> Self {
        Self::SubMenu {
            content: ItemContent::text(text),
            menu: menu.into(),
            attributes: None,
        }
    }

    /// Variant tag.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Divider => ItemKind::Divider,
            Self::Heading(_) => ItemKind::Heading,
            Self::Action { .. } => ItemKind::Action,
            Self::Anchor { .. } => ItemKind::Anchor,
            Self::SubMenu { .. } => ItemKind::SubMenu,
        }
    }

    /// Shared content, `None` for dividers.
    pub fn content(&self) -> Option<&ItemContent> {
        match self {
            Self::Divider => None,
            Self::Heading(content)
            | Self::Action { content, .. }
            | Self::Anchor { content, .. }
            | Self::SubMenu { content, .. } => Some(content),
        }
    }

    /// Mutable shared content, `None` for dividers.
    pub fn content_mut(&mut self) -> Option<&mut ItemContent> {
        match self {
            Self::Divider => None,
            Self::Heading(content)
            | Self::Action { content, .. }
            | Self::Anchor { content, .. }
            | Self::SubMenu { content, .. } => Some(content),
        }
    }

    fn with_content(mut self, f: impl FnOnce(&mut ItemContent)) -> Self {
        if let Some(content) = self.content_mut() {
            f(content);
        }
        self
    }

    /// Set the `title` tooltip.
    pub fn tooltip(self, tooltip: impl Into<Value<String>>) -> Self {
        self.with_content(|c| c.tooltip = Some(tooltip.into()))
    }

    /// Set the icon URL.
    pub fn icon(self, icon: impl Into<Value<String>>) -> Self {
        self.with_content(|c| c.icon = Some(icon.into()))
    }

    /// Set the inline style string.
    pub fn style(self, style: impl Into<Value<String>>) -> Self {
        self.with_content(|c| c.style = Some(style.into()))
    }

    /// Use markup instead of text for the body.
    pub fn html(self, html: impl Into<Value<String>>) -> Self {
        self.with_content(|c| c.html = Some(html.into()))
    }

    /// Use a caller-created element as the body.
    pub fn element(self, element: impl Into<Value<ElementId>>) -> Self {
        self.with_content(|c| c.element = Some(element.into()))
    }

    /// Replace the attribute map.
    pub fn attributes(self, attributes: impl Into<Value<Attributes>>) -> Self {
        self.with_content(|c| c.attributes = Some(attributes.into()))
    }

    /// Set the disabled flag.
    pub fn disabled(self, disabled: impl Into<Value<bool>>) -> Self {
        self.with_content(|c| c.disabled = Some(disabled.into()))
    }

    /// Replace the listener map.
    pub fn events(self, events: impl Into<Value<EventMap>>) -> Self {
        self.with_content(|c| c.events = Some(events.into()))
    }

    /// Add a listener with default options.
    pub fn on(self, event: &str, handler: impl Fn(ElementId) + 'static) -> Self {
        self.push_listener(event, Rc::new(handler), None)
    }

    /// Add a listener with explicit options.
    pub fn on_with(
        self,
        event: &str,
        handler: impl Fn(ElementId) + 'static,
        options: ListenerOptions,
    ) -> Self {
        self.push_listener(event, Rc::new(handler), Some(options))
    }

    fn push_listener(self, event: &str, handler: Listener, options: Option<ListenerOptions>) -> Self {
        let entry = (String::from(event), ItemListener { handler, options });
        self.with_content(|c| {
            c.events = Some(match c.events.take() {
                None => Value::Literal(alloc::vec![entry]),
                Some(Value::Literal(mut events)) => {
                    events.push(entry);
                    Value::Literal(events)
                }
                Some(Value::Producer(produce)) => Value::producer(move || {
                    let mut events = produce();
                    events.push(entry.clone());
                    events
                }),
            });
        })
    }

    /// Set the link's browsing context. No effect on other variants.
    pub fn target(mut self, target: impl Into<Value<String>>) -> Self {
        if let Self::Anchor { link, .. } = &mut self {
            link.target = Some(target.into());
        }
        self
    }

    /// Set the link's download directive. No effect on other variants.
    pub fn download(mut self, download: impl Into<Value<Download>>) -> Self {
        if let Self::Anchor { link, .. } = &mut self {
            link.download = Some(download.into());
        }
        self
    }

    /// Set attributes for the nested panel. No effect on other variants.
    pub fn sub_menu_attributes(mut self, attrs: impl Into<Value<Attributes>>) -> Self {
        if let Self::SubMenu { attributes, .. } = &mut self {
            *attributes = Some(attrs.into());
        }
        self
    }

    /// Evaluate every field once for this render pass.
    pub fn resolve(&self) -> ResolvedItem {
        match self {
            Self::Divider => ResolvedItem {
                content: ResolvedContent::default(),
                behavior: ResolvedBehavior::Divider,
            },
            Self::Heading(content) => ResolvedItem {
                content: content.resolve(),
                behavior: ResolvedBehavior::Heading,
            },
            Self::Action { content, action } => ResolvedItem {
                content: content.resolve(),
                behavior: ResolvedBehavior::Action(Rc::clone(action)),
            },
            Self::Anchor { content, link } => ResolvedItem {
                content: content.resolve(),
                behavior: ResolvedBehavior::Anchor {
                    href: link.href.resolve(),
                    target: link.target.as_ref().map(Value::resolve),
                    download: link.download.as_ref().map(Value::resolve),
                },
            },
            Self::SubMenu {
                content,
                menu,
                attributes,
            } => ResolvedItem {
                content: content.resolve(),
                behavior: ResolvedBehavior::SubMenu {
                    menu: menu.resolve(),
                    attributes: attributes.as_ref().map(Value::resolve),
                },
            },
        }
    }
}

/// Loose field bag for callers that assemble items dynamically.
///
/// Converting into a [`MenuItem`] picks the variant from the present fields:
/// `is_divider` wins over everything, then `href`, then `action`, then
/// `sub_menu`, otherwise a heading. A bag with both `href` and `action` becomes
/// an anchor and the action is dropped.
#[derive(Clone, Default)]
pub struct ItemFields {
    /// Render as a divider; every other field is ignored.
    pub is_divider: bool,
    /// Shared content fields.
    pub content: ItemContent,
    /// Click trigger.
    pub action: Option<ActionFn>,
    /// Navigation target.
    pub href: Option<Value<String>>,
    /// Link browsing context.
    pub target: Option<Value<String>>,
    /// Link download directive.
    pub download: Option<Value<Download>>,
    /// Nested definition.
    pub sub_menu: Option<Value<MenuDefinition>>,
    /// Nested panel attributes.
    pub sub_menu_attributes: Option<Value<Attributes>>,
}

impl core::fmt::Debug for ItemFields {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemFields")
            .field("is_divider", &self.is_divider)
            .field("content", &self.content)
            .field("action", &self.action.is_some())
            .field("href", &self.href)
            .field("sub_menu", &self.sub_menu)
            .finish_non_exhaustive()
    }
}

impl From<ItemFields> for MenuItem {
    fn from(fields: ItemFields) -> Self {
        let ItemFields {
            is_divider,
            content,
            action,
            href,
            target,
            download,
            sub_menu,
            sub_menu_attributes,
        } = fields;
        if is_divider {
            return Self::Divider;
        }
        if let Some(href) = href {
            return Self::Anchor {
                content,
                link: Link {
                    href,
                    target,
                    download,
                },
            };
        }
        if let Some(action) = action {
            return Self::Action { content, action };
        }
        if let Some(menu) = sub_menu {
            return Self::SubMenu {
                content,
                menu,
                attributes: sub_menu_attributes,
            };
        }
        Self::Heading(content)
    }
}

/// Content fields after resolution.
#[derive(Clone, Debug, Default)]
pub struct ResolvedContent {
    /// Text body.
    pub text: Option<String>,
    /// Markup body.
    pub html: Option<String>,
    /// Element body.
    pub element: Option<ElementId>,
    /// Tooltip.
    pub tooltip: Option<String>,
    /// Icon URL.
    pub icon: Option<String>,
    /// Inline style.
    pub style: Option<String>,
    /// Attributes.
    pub attributes: Attributes,
    /// Listeners.
    pub events: EventMap,
    /// Disabled flag as given by the caller.
    pub disabled: bool,
}

impl ResolvedContent {
    /// Whether the body is caller-supplied markup or an element.
    pub fn has_custom_body(&self) -> bool {
        self.element.is_some() || self.html.is_some()
    }
}

/// Variant-specific data after resolution.
#[derive(Clone)]
pub enum ResolvedBehavior {
    /// Separator.
    Divider,
    /// Display-only.
    Heading,
    /// Click trigger.
    Action(ActionFn),
    /// Link target.
    Anchor {
        /// URL.
        href: String,
        /// Browsing context.
        target: Option<String>,
        /// Download directive.
        download: Option<Download>,
    },
    /// Nested panel.
    SubMenu {
        /// Nested definition; its own items resolve when that panel renders.
        menu: MenuDefinition,
        /// Nested panel attributes.
        attributes: Option<Attributes>,
    },
}

impl core::fmt::Debug for ResolvedBehavior {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Divider => f.write_str("Divider"),
            Self::Heading => f.write_str("Heading"),
            Self::Action(_) => f.write_str("Action(..)"),
            Self::Anchor {
                href,
                target,
                download,
            } => f
                .debug_struct("Anchor")
                .field("href", href)
                .field("target", target)
                .field("download", download)
                .finish(),
            Self::SubMenu { menu, attributes } => f
                .debug_struct("SubMenu")
                .field("items", &menu.len())
                .field("attributes", attributes)
                .finish(),
        }
    }
}

/// Snapshot of one item for a single render pass.
#[derive(Clone, Debug)]
pub struct ResolvedItem {
    /// Content fields.
    pub content: ResolvedContent,
    /// Variant data.
    pub behavior: ResolvedBehavior,
}

impl ResolvedItem {
    /// Variant tag.
    pub fn kind(&self) -> ItemKind {
        match self.behavior {
            ResolvedBehavior::Divider => ItemKind::Divider,
            ResolvedBehavior::Heading => ItemKind::Heading,
            ResolvedBehavior::Action(_) => ItemKind::Action,
            ResolvedBehavior::Anchor { .. } => ItemKind::Anchor,
            ResolvedBehavior::SubMenu { .. } => ItemKind::SubMenu,
        }
    }

    /// Actions, anchors, submenus, and rows with a custom body.
    ///
    /// A heading with a custom body only counts for styling; it gets no click behavior.
    pub fn is_interactive(&self) -> bool {
        match self.kind() {
            ItemKind::Divider => false,
            ItemKind::Action | ItemKind::Anchor | ItemKind::SubMenu => true,
            ItemKind::Heading => self.content.has_custom_body(),
        }
    }

    /// Disabled flag, or a submenu whose nested definition is empty.
    pub fn is_disabled(&self) -> bool {
        match &self.behavior {
            ResolvedBehavior::SubMenu { menu, .. } => self.content.disabled || menu.is_empty(),
            _ => self.content.disabled,
        }
    }
}
