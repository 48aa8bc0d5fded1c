// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu tree controller.
//!
//! [`ContextMenu`] owns every piece of mutable state: the target registry, the
//! open panel tree, the shared opening [`Direction`], pending hover and wheel
//! deadlines, and the stylesheet installer. Hosts drive it with two calls:
//!
//! - [`ContextMenu::handle_event`] for each forwarded [`Event`].
//! - [`ContextMenu::poll`] on a timer tick, which runs due hover actions and
//!   the wheel-settle close.
//!
//! ## Lifecycle
//!
//! A tree is either closed or open. Showing while open hides the current tree
//! first, so at most one top-level panel is ever mounted. Submenus are
//! mounted inside their parent item and torn down with it.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_menu::controller::ContextMenu;
//! use understory_menu::config::MenuConfig;
//! use understory_menu::item::MenuItem;
//! use understory_menu::memory::MemoryDocument;
//! use understory_menu::types::{Anchor, Event};
//!
//! let mut doc = MemoryDocument::new(Size::new(800.0, 600.0));
//! let mut menu = ContextMenu::new();
//! let panel = menu.show(
//!     &mut doc,
//!     vec![
//!         MenuItem::heading("Edit"),
//!         MenuItem::submenu("More", vec![MenuItem::heading("Nested")]),
//!     ],
//!     Anchor::Pointer(Point::new(10.0, 10.0)),
//!     MenuConfig::default(),
//! );
//!
//! // Rest the pointer on "More" long enough to open it.
//! let more = understory_menu::document::Document::children(&doc, panel)[1];
//! menu.handle_event(&mut doc, &Event::PointerEnter { target: more });
//! doc.advance(Duration::from_millis(150));
//! menu.poll(&mut doc);
//! assert!(menu.submenu_of(more).is_some());
//!
//! menu.handle_event(&mut doc, &Event::Resize);
//! assert!(!menu.is_open());
//! ```

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Rect;

use crate::build::{Behavior, build_item, build_panel};
use crate::config::{MenuConfig, Options};
use crate::document::Document;
use crate::hover::{Debouncer, TimerId};
use crate::item::MenuDefinition;
use crate::position::{measure, place_at, place_beside};
use crate::style::StyleInstaller;
use crate::types::{Anchor, Attributes, Direction, ElementId, Event, ItemClass, Key};
use crate::value::Value;

/// A registered context-menu trigger.
#[derive(Clone, Debug)]
pub(crate) struct Registration {
    pub(crate) element: ElementId,
    pub(crate) definition: Value<MenuDefinition>,
    pub(crate) config: MenuConfig,
}

#[derive(Debug)]
struct OpenMenu {
    panel: ElementId,
    config: MenuConfig,
}

#[derive(Debug)]
struct Panel {
    items: Vec<ElementId>,
    position: Rect,
}

#[derive(Debug)]
struct RenderedItem {
    panel: ElementId,
    classes: ItemClass,
    behavior: Behavior,
    submenu: Option<ElementId>,
    timer: Option<TimerId>,
}

/// Context-menu engine for one document.
#[derive(Debug)]
pub struct ContextMenu {
    options: Options,
    pub(crate) registry: BTreeMap<String, Registration>,
    open: Option<OpenMenu>,
    panels: BTreeMap<ElementId, Panel>,
    items: BTreeMap<ElementId, RenderedItem>,
    direction: Direction,
    hover: Debouncer<ElementId>,
    wheel: Debouncer<()>,
    pub(crate) style: StyleInstaller,
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextMenu {
    /// A controller with default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// A controller with explicit options.
    pub fn with_options(options: Options) -> Self {
        Self {
            hover: Debouncer::new(options.hover_delay),
            wheel: Debouncer::new(options.wheel_settle),
            style: StyleInstaller::new(options.stylesheet.clone()),
            options,
            registry: BTreeMap::new(),
            open: None,
            panels: BTreeMap::new(),
            items: BTreeMap::new(),
            direction: Direction::default(),
        }
    }

    /// Controller options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether a top-level panel is mounted.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The mounted top-level panel.
    pub fn open_panel(&self) -> Option<ElementId> {
        self.open.as_ref().map(|o| o.panel)
    }

    /// Opening direction shared by the panels of the current tree.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Where an open panel was placed, in layout units.
    pub fn panel_position(&self, panel: ElementId) -> Option<Rect> {
        self.panels.get(&panel).map(|p| p.position)
    }

    /// The open submenu panel owned by `item`.
    pub fn submenu_of(&self, item: ElementId) -> Option<ElementId> {
        self.items.get(&item)?.submenu
    }

    /// Classes of a rendered item.
    pub fn item_classes(&self, item: ElementId) -> Option<ItemClass> {
        self.items.get(&item).map(|r| r.classes)
    }

    /// Whether `selector` has a registration.
    pub fn is_attached(&self, selector: &str) -> bool {
        self.registry.contains_key(selector)
    }

    /// Earliest pending hover or wheel deadline, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.hover.next_deadline(), self.wheel.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Render `definition` as a new top-level panel placed at `anchor`.
    ///
    /// Any open tree is hidden first, running its hide hooks. Returns the panel element.
    pub fn show(
        &mut self,
        doc: &mut dyn Document,
        definition: MenuDefinition,
        anchor: Anchor,
        config: MenuConfig,
    ) -> ElementId {
        if self.open.is_some() {
            self.hide(doc);
        }
        let definition = match &config.on_before_show {
            Some(hook) => hook(definition, &anchor),
            None => definition,
        };
        self.style.install(doc);

        let panel = self.render_panel(doc, &definition, config.attributes.as_ref());
        let body = doc.body();
        doc.append_child(body, panel);
        self.place(doc, panel, anchor);
        log::debug!("showing context menu with {} items", definition.len());

        let on_show = config.on_show.clone();
        self.open = Some(OpenMenu { panel, config });
        if let Some(hook) = on_show {
            hook(doc, panel);
        }
        panel
    }

    /// Tear down the open tree. Does nothing (and runs no hooks) when closed.
    pub fn hide(&mut self, doc: &mut dyn Document) {
        let Some(open) = self.open.take() else {
            return;
        };
        if let Some(hook) = &open.config.on_before_hide {
            hook(doc, open.panel);
        }
        self.discard_panel(open.panel);
        doc.detach(open.panel);
        self.direction = Direction::default();
        self.wheel.clear();
        if let Some(hook) = &open.config.on_hide {
            hook(doc, open.panel);
        }
        log::debug!("context menu hidden");
    }

    /// Route a host event.
    ///
    /// Returns `true` when the host should suppress its default action, which
    /// happens only for context-menu events on a registered element.
    pub fn handle_event(&mut self, doc: &mut dyn Document, event: &Event) -> bool {
        match *event {
            Event::ContextMenu { target, position } => {
                let Some(reg) = self.registration_for(doc, target) else {
                    return false;
                };
                let definition = reg.definition.resolve();
                let config = reg.config.clone();
                self.show(doc, definition, Anchor::Pointer(position), config);
                true
            }
            Event::Click { target } => {
                self.click(doc, target);
                false
            }
            Event::PointerEnter { target } => {
                if let Some(item) = self.items.get_mut(&target) {
                    item.timer = Some(self.hover.schedule(doc.now(), target));
                }
                false
            }
            Event::PointerLeave { target } => {
                if let Some(timer) = self.items.get_mut(&target).and_then(|i| i.timer.take()) {
                    self.hover.cancel(timer);
                }
                false
            }
            Event::Resize | Event::KeyDown(Key::Escape) => {
                self.hide(doc);
                false
            }
            Event::Wheel | Event::Scroll => {
                if self.open.is_some() {
                    self.wheel.schedule(doc.now(), ());
                }
                false
            }
            Event::KeyDown(_) => false,
        }
    }

    /// Run everything whose deadline has passed on the document clock.
    pub fn poll(&mut self, doc: &mut dyn Document) {
        let now = doc.now();
        if !self.wheel.expire(now).is_empty() {
            log::trace!("wheel settled");
            self.hide(doc);
        }
        for item in self.hover.expire(now) {
            self.run_hover(doc, item);
        }
    }

    /// Innermost registered, still-connected element at or above `target`.
    fn registration_for(&self, doc: &dyn Document, target: ElementId) -> Option<&Registration> {
        let mut cur = Some(target);
        while let Some(el) = cur {
            if let Some(reg) = self.registry.values().find(|r| r.element == el) {
                if doc.is_connected(el) {
                    return Some(reg);
                }
            }
            cur = doc.parent(el);
        }
        None
    }

    fn click(&mut self, doc: &mut dyn Document, target: ElementId) {
        if self.open.is_none() {
            return;
        }
        let mut cur = Some(target);
        let item = loop {
            match cur {
                Some(el) if self.items.contains_key(&el) => break Some(el),
                Some(el) => cur = doc.parent(el),
                None => break None,
            }
        };
        let Some(item) = item else {
            self.hide(doc);
            return;
        };
        let action = match self.items.get(&item) {
            Some(r) if r.classes.contains(ItemClass::INTERACTIVE) => match &r.behavior {
                Behavior::Action(action) => Some(Rc::clone(action)),
                Behavior::Link => None,
                Behavior::SubMenu { .. } | Behavior::Inert => return,
            },
            _ => None,
        };
        if let Some(action) = action {
            action(doc, item);
        }
        self.hide(doc);
    }

    /// Close open sibling submenus, then open the item's own submenu if it has one.
    fn run_hover(&mut self, doc: &mut dyn Document, item: ElementId) {
        let Some(rendered) = self.items.get_mut(&item) else {
            return;
        };
        rendered.timer = None;
        let panel = rendered.panel;
        let wants_submenu =
            matches!(rendered.behavior, Behavior::SubMenu { .. }) && rendered.submenu.is_none();

        let siblings = self
            .panels
            .get(&panel)
            .map(|p| p.items.clone())
            .unwrap_or_default();
        for sibling in siblings {
            if sibling != item && self.submenu_of(sibling).is_some() {
                self.close_submenu(doc, sibling);
            }
        }
        if wants_submenu {
            self.open_submenu(doc, item);
        }
    }

    fn open_submenu(&mut self, doc: &mut dyn Document, item: ElementId) {
        let Some(Behavior::SubMenu { menu, attributes }) =
            self.items.get(&item).map(|r| r.behavior.clone())
        else {
            return;
        };
        let panel = self.render_panel(doc, &menu, attributes.as_ref());
        doc.append_child(item, panel);
        self.place(doc, panel, Anchor::Element(item));
        if let Some(rendered) = self.items.get_mut(&item) {
            rendered.submenu = Some(panel);
        }
        log::debug!("opened submenu with {} items", menu.len());
    }

    fn close_submenu(&mut self, doc: &mut dyn Document, item: ElementId) {
        let Some(panel) = self.items.get_mut(&item).and_then(|r| r.submenu.take()) else {
            return;
        };
        self.discard_panel(panel);
        doc.detach(panel);
        log::debug!("closed submenu");
    }

    fn render_panel(
        &mut self,
        doc: &mut dyn Document,
        definition: &MenuDefinition,
        attributes: Option<&Attributes>,
    ) -> ElementId {
        let panel = build_panel(doc, &self.options.panel_class, attributes);
        let mut rows = Vec::with_capacity(definition.len());
        for item in definition {
            let built = build_item(doc, item.resolve());
            doc.append_child(panel, built.element);
            rows.push(built.element);
            self.items.insert(
                built.element,
                RenderedItem {
                    panel,
                    classes: built.classes,
                    behavior: built.behavior,
                    submenu: None,
                    timer: None,
                },
            );
        }
        self.panels.insert(
            panel,
            Panel {
                items: rows,
                position: Rect::ZERO,
            },
        );
        panel
    }

    /// Forget `panel`, its items, their timers, and every nested panel.
    fn discard_panel(&mut self, panel: ElementId) {
        let Some(p) = self.panels.remove(&panel) else {
            return;
        };
        for item in p.items {
            let Some(rendered) = self.items.remove(&item) else {
                continue;
            };
            if let Some(timer) = rendered.timer {
                self.hover.cancel(timer);
            }
            if let Some(sub) = rendered.submenu {
                self.discard_panel(sub);
            }
        }
    }

    fn place(&mut self, doc: &mut dyn Document, panel: ElementId, anchor: Anchor) {
        let viewport = doc.viewport();
        let size = measure(doc, panel, &viewport);
        let bounds = viewport.bounds();
        let rect = match anchor {
            Anchor::Pointer(point) => place_at(
                viewport.to_layout_point(point),
                size,
                bounds,
                Direction::default(),
            ),
            Anchor::Element(item) => place_beside(
                viewport.to_layout_rect(doc.bounding_rect(item)),
                size,
                bounds,
                &mut self.direction,
                self.options.submenu_nudge,
            ),
        };
        doc.set_style(panel, "left", &format!("{}px", rect.x0));
        doc.set_style(panel, "top", &format!("{}px", rect.y0));
        doc.set_style(panel, "width", &format!("{}px", rect.width()));
        doc.set_style(panel, "height", &format!("{}px", rect.height()));
        if let Some(p) = self.panels.get_mut(&panel) {
            p.position = rect;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MenuItem;
    use crate::memory::MemoryDocument;
    use crate::types::{Horizontal, Viewport};
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use kurbo::{Point, Size, Vec2};

    const DELAY: Duration = Duration::from_millis(150);

    fn doc() -> MemoryDocument {
        MemoryDocument::new(Size::new(800.0, 600.0))
    }

    fn at(x: f64, y: f64) -> Anchor {
        Anchor::Pointer(Point::new(x, y))
    }

    fn panels(doc: &MemoryDocument) -> usize {
        doc.query_all_by_class("context-menu").len()
    }

    fn rest_on(menu: &mut ContextMenu, doc: &mut MemoryDocument, item: ElementId) {
        menu.handle_event(doc, &Event::PointerEnter { target: item });
        doc.advance(DELAY);
        menu.poll(doc);
    }

    #[test]
    fn show_then_hide_leaves_nothing() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::heading("a"), MenuItem::heading("b")],
            at(10.0, 20.0),
            MenuConfig::default(),
        );
        assert!(d.is_connected(panel));
        assert_eq!(menu.open_panel(), Some(panel));
        assert_eq!(
            menu.panel_position(panel),
            Some(Rect::new(10.0, 20.0, 130.0, 68.0))
        );
        assert_eq!(d.style(panel, "left"), Some("10px"));

        menu.hide(&mut d);
        assert!(!menu.is_open());
        assert_eq!(panels(&d), 0);
        assert_eq!(menu.direction(), Direction::default());
        assert_eq!(menu.panel_position(panel), None);
    }

    #[test]
    fn second_show_replaces_first() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let first = menu.show(
            &mut d,
            vec![MenuItem::heading("a")],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let second = menu.show(
            &mut d,
            vec![MenuItem::heading("b")],
            at(50.0, 50.0),
            MenuConfig::default(),
        );
        assert_ne!(first, second);
        assert!(!d.is_connected(first));
        assert_eq!(panels(&d), 1);
    }

    #[test]
    fn hooks_run_in_order_and_before_show_decides_content() {
        let mut d = doc();
        let order = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c, e) = (order.clone(), order.clone(), order.clone(), order.clone());
        let config = MenuConfig::default()
            .on_before_show(move |_, _| {
                a.borrow_mut().push("A");
                vec![MenuItem::heading("replaced")]
            })
            .on_show(move |doc, panel| {
                assert!(doc.is_connected(panel));
                b.borrow_mut().push("B");
            })
            .on_before_hide(move |doc, panel| {
                assert!(doc.is_connected(panel));
                c.borrow_mut().push("C");
            })
            .on_hide(move |doc, panel| {
                assert!(!doc.is_connected(panel));
                e.borrow_mut().push("D");
            });
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::heading("original"), MenuItem::divider()],
            at(0.0, 0.0),
            config,
        );
        let rows = d.children(panel);
        assert_eq!(rows.len(), 1);
        assert_eq!(d.inner_markup(rows[0]), "<span>replaced</span>");
        menu.hide(&mut d);
        assert_eq!(*order.borrow(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn hide_when_closed_runs_no_hooks() {
        let mut d = doc();
        let hits = Rc::new(Cell::new(0_u32));
        let h = hits.clone();
        let mut menu = ContextMenu::new();
        menu.show(
            &mut d,
            vec![MenuItem::heading("a")],
            at(0.0, 0.0),
            MenuConfig::default().on_hide(move |_, _| h.set(h.get() + 1)),
        );
        menu.hide(&mut d);
        menu.hide(&mut d);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn panel_attributes_and_stylesheet() {
        let mut d = doc();
        let mut attrs = Attributes::new();
        attrs.insert(String::from("id"), String::from("main"));
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::heading("a")],
            at(0.0, 0.0),
            MenuConfig::default().attributes(attrs),
        );
        assert_eq!(d.query_selector("#main"), Some(panel));
        let style = d.query_selector("style");
        assert!(style.is_some());
        assert_eq!(d.parent(style.unwrap()), Some(d.head()));
    }

    #[test]
    fn pointer_anchor_is_scaled_and_clamped() {
        let mut d = doc();
        d.set_viewport(Viewport {
            size: Size::new(800.0, 600.0),
            scale: Vec2::new(2.0, 2.0),
            offset: Vec2::ZERO,
        });
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::heading("a")],
            at(700.0, 100.0),
            MenuConfig::default(),
        );
        // Bounds are 400x300 layout units; 350 + 60 overflows, so it is pulled back.
        let placed = menu.panel_position(panel).unwrap();
        assert_eq!(placed.origin(), Point::new(340.0, 50.0));
    }

    #[test]
    fn hover_opens_submenu_and_flips_left() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![
                MenuItem::submenu(
                    "More",
                    vec![MenuItem::heading("x"), MenuItem::heading("y")],
                ),
                MenuItem::heading("b"),
            ],
            at(700.0, 10.0),
            MenuConfig::default(),
        );
        assert_eq!(
            menu.panel_position(panel),
            Some(Rect::new(680.0, 10.0, 800.0, 58.0))
        );
        let more = d.children(panel)[0];

        menu.handle_event(&mut d, &Event::PointerEnter { target: more });
        menu.poll(&mut d);
        assert_eq!(menu.submenu_of(more), None);
        d.advance(DELAY);
        menu.poll(&mut d);

        let sub = menu.submenu_of(more).unwrap();
        assert_eq!(d.parent(sub), Some(more));
        assert_eq!(
            menu.panel_position(sub),
            Some(Rect::new(560.0, 6.0, 680.0, 54.0))
        );
        assert_eq!(menu.direction().horizontal, Horizontal::Left);

        menu.hide(&mut d);
        assert_eq!(menu.direction(), Direction::default());
        assert_eq!(menu.panel_position(sub), None);
    }

    #[test]
    fn hide_cancels_pending_hover() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::submenu("More", vec![MenuItem::heading("x")])],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let more = d.children(panel)[0];
        menu.handle_event(&mut d, &Event::PointerEnter { target: more });
        assert_eq!(menu.next_deadline(), Some(DELAY));
        menu.hide(&mut d);
        assert_eq!(menu.next_deadline(), None);
        d.advance(DELAY * 2);
        menu.poll(&mut d);
        assert!(menu.submenu_of(more).is_none());
        assert!(!menu.is_open());
        assert_eq!(panels(&d), 0);
    }

    #[test]
    fn submenu_panel_gets_its_attributes() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let mut attrs = BTreeMap::new();
        attrs.insert(String::from("id"), String::from("recent"));
        attrs.insert(String::from("data-kind"), String::from("files"));
        let panel = menu.show(
            &mut d,
            vec![
                MenuItem::submenu("Recent", vec![MenuItem::heading("a.txt")])
                    .sub_menu_attributes(attrs),
            ],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let recent = d.children(panel)[0];
        rest_on(&mut menu, &mut d, recent);
        let sub = menu.submenu_of(recent).expect("submenu opens");
        assert_eq!(d.query_selector("#recent"), Some(sub));
        assert_eq!(d.attribute(sub, "data-kind"), Some("files"));
        assert!(d.has_class(sub, "context-menu"));
        assert_eq!(d.attribute(panel, "data-kind"), None);
    }

    #[test]
    fn custom_panel_class_replaces_the_default() {
        let mut d = doc();
        let mut menu = ContextMenu::with_options(Options {
            panel_class: String::from("popup"),
            ..Options::default()
        });
        let panel = menu.show(
            &mut d,
            vec![MenuItem::heading("x")],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        assert_eq!(d.classes(panel), ["popup"]);
        assert_eq!(panels(&d), 0);
        menu.hide(&mut d);
        assert!(d.query_all_by_class("popup").is_empty());
    }

    #[test]
    fn leaving_early_cancels_hover() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::submenu("More", vec![MenuItem::heading("x")])],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let more = d.children(panel)[0];
        menu.handle_event(&mut d, &Event::PointerEnter { target: more });
        d.advance(Duration::from_millis(100));
        menu.handle_event(&mut d, &Event::PointerLeave { target: more });
        d.advance(Duration::from_millis(500));
        menu.poll(&mut d);
        assert_eq!(menu.submenu_of(more), None);
        assert_eq!(menu.next_deadline(), None);
    }

    #[test]
    fn hovering_a_sibling_closes_open_submenu() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![
                MenuItem::submenu("One", vec![MenuItem::heading("x")]),
                MenuItem::submenu("Two", vec![MenuItem::heading("y")]),
                MenuItem::divider(),
            ],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let rows = d.children(panel);
        rest_on(&mut menu, &mut d, rows[0]);
        let one = menu.submenu_of(rows[0]).unwrap();

        // Re-hovering the owner keeps its submenu.
        rest_on(&mut menu, &mut d, rows[0]);
        assert_eq!(menu.submenu_of(rows[0]), Some(one));

        rest_on(&mut menu, &mut d, rows[1]);
        assert!(!d.is_connected(one));
        assert!(menu.submenu_of(rows[1]).is_some());

        // Dividers also close siblings.
        rest_on(&mut menu, &mut d, rows[2]);
        assert_eq!(menu.submenu_of(rows[1]), None);
        assert_eq!(panels(&d), 1);
    }

    #[test]
    fn disabled_submenu_never_opens() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::submenu("Empty", Vec::<MenuItem>::new())],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let row = d.children(panel)[0];
        rest_on(&mut menu, &mut d, row);
        assert_eq!(menu.submenu_of(row), None);
        assert_eq!(
            menu.item_classes(row),
            Some(ItemClass::DISABLED | ItemClass::SUBMENU)
        );
    }

    #[test]
    fn action_runs_before_teardown() {
        let mut d = doc();
        let mounted = Rc::new(Cell::new(false));
        let m = mounted.clone();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![MenuItem::action("Go", move |doc, _| {
                m.set(doc.query_selector(".context-menu").is_some());
            })],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let span = d.children(d.children(panel)[0])[0];
        assert!(!menu.handle_event(&mut d, &Event::Click { target: span }));
        assert!(mounted.get());
        assert!(!menu.is_open());
    }

    #[test]
    fn clicks_close_except_on_submenu_rows() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let panel = menu.show(
            &mut d,
            vec![
                MenuItem::submenu("More", vec![MenuItem::heading("x")]),
                MenuItem::heading("Title"),
                MenuItem::link("Docs", "#docs"),
            ],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let rows = d.children(panel);
        menu.handle_event(&mut d, &Event::Click { target: rows[0] });
        assert!(menu.is_open());
        menu.handle_event(&mut d, &Event::Click { target: rows[1] });
        assert!(!menu.is_open());

        let panel = menu.show(
            &mut d,
            vec![MenuItem::link("Docs", "#docs")],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let link = d.children(panel)[0];
        menu.handle_event(&mut d, &Event::Click { target: link });
        assert!(!menu.is_open());

        menu.show(
            &mut d,
            vec![MenuItem::heading("x")],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        let body = d.body();
        menu.handle_event(&mut d, &Event::Click { target: body });
        assert!(!menu.is_open());
    }

    #[test]
    fn escape_and_resize_close() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        let def = || vec![MenuItem::heading("x")];
        menu.show(&mut d, def(), at(0.0, 0.0), MenuConfig::default());
        menu.handle_event(&mut d, &Event::KeyDown(Key::Character('a')));
        assert!(menu.is_open());
        menu.handle_event(&mut d, &Event::KeyDown(Key::Escape));
        assert!(!menu.is_open());

        menu.show(&mut d, def(), at(0.0, 0.0), MenuConfig::default());
        menu.handle_event(&mut d, &Event::Resize);
        assert!(!menu.is_open());
    }

    #[test]
    fn wheel_closes_after_settling() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        menu.show(
            &mut d,
            vec![MenuItem::heading("x")],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        menu.handle_event(&mut d, &Event::Wheel);
        d.advance(Duration::from_millis(50));
        menu.handle_event(&mut d, &Event::Wheel);
        d.advance(Duration::from_millis(60));
        menu.poll(&mut d);
        assert!(menu.is_open());
        assert_eq!(menu.next_deadline(), Some(Duration::from_millis(150)));
        d.advance(Duration::from_millis(50));
        menu.poll(&mut d);
        assert!(!menu.is_open());
    }

    #[test]
    fn scroll_shares_the_wheel_settle_timer() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        menu.show(
            &mut d,
            vec![MenuItem::heading("x")],
            at(0.0, 0.0),
            MenuConfig::default(),
        );
        menu.handle_event(&mut d, &Event::Wheel);
        d.advance(Duration::from_millis(80));
        assert!(!menu.handle_event(&mut d, &Event::Scroll));
        d.advance(Duration::from_millis(80));
        menu.poll(&mut d);
        assert!(menu.is_open());
        d.advance(Duration::from_millis(20));
        menu.poll(&mut d);
        assert!(!menu.is_open());
        assert_eq!(panels(&d), 0);
    }

    #[test]
    fn wheel_while_closed_is_ignored() {
        let mut d = doc();
        let mut menu = ContextMenu::new();
        menu.handle_event(&mut d, &Event::Wheel);
        assert_eq!(menu.next_deadline(), None);
    }
}
