// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target registration: `attach`, `update`, `delete`, and the stylesheet nonce.
//!
//! Each operation has a `try_*` form that returns [`MenuError`] and a plain
//! form that logs the error and leaves state unchanged.

use alloc::string::String;

use crate::config::{ConfigPatch, MenuConfig};
use crate::controller::{ContextMenu, Registration};
use crate::document::Document;
use crate::error::MenuError;
use crate::item::MenuDefinition;
use crate::value::Value;

impl ContextMenu {
    /// Register a context menu on the element matching `selector`.
    ///
    /// A selector that is already registered is rejected before the document
    /// is queried.
    pub fn try_attach(
        &mut self,
        doc: &dyn Document,
        selector: &str,
        definition: impl Into<Value<MenuDefinition>>,
        config: MenuConfig,
    ) -> Result<(), MenuError> {
        if self.registry.contains_key(selector) {
            return Err(MenuError::AlreadyAttached(selector.into()));
        }
        let element = doc
            .query_selector(selector)
            .ok_or_else(|| MenuError::TargetNotFound(selector.into()))?;
        self.registry.insert(
            String::from(selector),
            Registration {
                element,
                definition: definition.into(),
                config,
            },
        );
        log::debug!("attached context menu to {selector}");
        Ok(())
    }

    /// [`try_attach`](Self::try_attach), logging any error.
    pub fn attach(
        &mut self,
        doc: &dyn Document,
        selector: &str,
        definition: impl Into<Value<MenuDefinition>>,
        config: MenuConfig,
    ) {
        if let Err(err) = self.try_attach(doc, selector, definition, config) {
            log::error!("{err}");
        }
    }

    /// Change an existing registration.
    ///
    /// `definition` replaces the stored one when given. `config` is merged
    /// field by field over the stored config. Without a prior registration this
    /// attaches instead, with an empty definition if none is given.
    pub fn try_update(
        &mut self,
        doc: &dyn Document,
        selector: &str,
        definition: Option<Value<MenuDefinition>>,
        config: impl Into<ConfigPatch>,
    ) -> Result<(), MenuError> {
        let patch = config.into();
        let Some(reg) = self.registry.get_mut(selector) else {
            let mut fresh = MenuConfig::default();
            fresh.merge(patch);
            return self.try_attach(doc, selector, definition.unwrap_or_default(), fresh);
        };
        if let Some(definition) = definition {
            reg.definition = definition;
        }
        reg.config.merge(patch);
        if let Some(element) = doc.query_selector(selector) {
            reg.element = element;
        }
        log::debug!("updated context menu on {selector}");
        Ok(())
    }

    /// [`try_update`](Self::try_update), logging any error.
    pub fn update(
        &mut self,
        doc: &dyn Document,
        selector: &str,
        definition: Option<Value<MenuDefinition>>,
        config: impl Into<ConfigPatch>,
    ) {
        if let Err(err) = self.try_update(doc, selector, definition, config) {
            log::error!("{err}");
        }
    }

    /// Remove the registration for `selector`.
    ///
    /// A registration whose element has left the document is removed as well,
    /// but reported as [`MenuError::TargetRemoved`].
    pub fn try_delete(&mut self, doc: &dyn Document, selector: &str) -> Result<(), MenuError> {
        let reg = self
            .registry
            .remove(selector)
            .ok_or_else(|| MenuError::NotAttached(selector.into()))?;
        if !doc.is_connected(reg.element) {
            return Err(MenuError::TargetRemoved(selector.into()));
        }
        log::debug!("deleted context menu from {selector}");
        Ok(())
    }

    /// [`try_delete`](Self::try_delete), logging any error.
    pub fn delete(&mut self, doc: &dyn Document, selector: &str) {
        if let Err(err) = self.try_delete(doc, selector) {
            log::error!("{err}");
        }
    }

    /// Set the content-security nonce for the stylesheet.
    ///
    /// Only possible before the first menu is shown.
    pub fn try_set_nonce(&mut self, nonce: &str) -> Result<(), MenuError> {
        self.style.set_nonce(nonce)
    }

    /// [`try_set_nonce`](Self::try_set_nonce), logging any error.
    pub fn set_nonce(&mut self, nonce: &str) {
        if let Err(err) = self.try_set_nonce(nonce) {
            log::error!("{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigPatch, MenuConfig, Patch};
    use crate::controller::ContextMenu;
    use crate::document::Document;
    use crate::error::MenuError;
    use crate::item::MenuItem;
    use crate::memory::MemoryDocument;
    use crate::types::{ElementId, Event};
    use crate::value::Value;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use kurbo::{Point, Size};

    fn doc() -> MemoryDocument {
        MemoryDocument::new(Size::new(800.0, 600.0))
    }

    fn right_click(menu: &mut ContextMenu, doc: &mut MemoryDocument, target: ElementId) -> bool {
        menu.handle_event(
            doc,
            &Event::ContextMenu {
                target,
                position: Point::new(5.0, 5.0),
            },
        )
    }

    fn rows(menu: &ContextMenu, doc: &MemoryDocument) -> usize {
        menu.open_panel().map_or(0, |p| doc.children(p).len())
    }

    #[test]
    fn end_to_end_attach_and_open() {
        let mut d = doc();
        let target = d.append_to_body("div", "t");
        let mut menu = ContextMenu::new();
        menu.attach(
            &d,
            "#t",
            vec![
                MenuItem::heading("Heading"),
                MenuItem::divider(),
                MenuItem::link("Link", "javascript:void"),
            ],
            MenuConfig::default(),
        );
        assert!(right_click(&mut menu, &mut d, target));

        let panel = menu.open_panel().unwrap();
        let items = d.children(panel);
        assert_eq!(items.len(), 3);
        assert_eq!(d.classes(items[0]), ["heading"]);
        assert_eq!(d.classes(items[1]), ["divider"]);
        assert_eq!(d.classes(items[2]), ["interactive"]);
        let a = d.children(items[2])[0];
        assert_eq!(d.tag_name(a).as_deref(), Some("a"));
        assert_eq!(d.attribute(a, "href"), Some("javascript:void"));
    }

    #[test]
    fn unregistered_targets_are_left_alone() {
        let mut d = doc();
        let other = d.append_to_body("div", "other");
        let mut menu = ContextMenu::new();
        assert!(!right_click(&mut menu, &mut d, other));
        assert!(!menu.is_open());
    }

    #[test]
    fn duplicate_attach_keeps_original() {
        let mut d = doc();
        let target = d.append_to_body("div", "t");
        let mut menu = ContextMenu::new();
        menu.attach(&d, "#t", vec![MenuItem::heading("a")], MenuConfig::default());
        let err = menu.try_attach(
            &d,
            "#t",
            vec![MenuItem::heading("b"), MenuItem::heading("c")],
            MenuConfig::default(),
        );
        assert_eq!(err, Err(MenuError::AlreadyAttached("#t".into())));
        right_click(&mut menu, &mut d, target);
        assert_eq!(rows(&menu, &d), 1);
    }

    #[test]
    fn attach_to_missing_target_fails() {
        let d = doc();
        let mut menu = ContextMenu::new();
        let err = menu.try_attach(&d, "#nope", Vec::<MenuItem>::new(), MenuConfig::default());
        assert_eq!(err, Err(MenuError::TargetNotFound("#nope".into())));
        assert!(!menu.is_attached("#nope"));
    }

    #[test]
    fn producer_definitions_resolve_per_open() {
        let mut d = doc();
        let target = d.append_to_body("div", "t");
        let count = Rc::new(Cell::new(0_usize));
        let c = count.clone();
        let mut menu = ContextMenu::new();
        menu.attach(
            &d,
            "#t",
            Value::producer(move || {
                c.set(c.get() + 1);
                (0..c.get())
                    .map(|_| MenuItem::heading("row"))
                    .collect::<Vec<_>>()
            }),
            MenuConfig::default(),
        );
        right_click(&mut menu, &mut d, target);
        assert_eq!(rows(&menu, &d), 1);
        right_click(&mut menu, &mut d, target);
        assert_eq!(rows(&menu, &d), 2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn innermost_registration_wins() {
        let mut d = doc();
        let outer = d.append_to_body("div", "outer");
        let inner = d.create_element("div");
        d.set_attribute(inner, "id", "inner");
        d.append_child(outer, inner);
        let leaf = d.create_element("span");
        d.append_child(inner, leaf);

        let mut menu = ContextMenu::new();
        menu.attach(&d, "#outer", vec![MenuItem::heading("o")], MenuConfig::default());
        menu.attach(
            &d,
            "#inner",
            vec![MenuItem::heading("i"), MenuItem::heading("j")],
            MenuConfig::default(),
        );
        assert!(right_click(&mut menu, &mut d, leaf));
        assert_eq!(rows(&menu, &d), 2);
    }

    #[test]
    fn update_merges_config_and_replaces_definition() {
        let mut d = doc();
        let target = d.append_to_body("div", "t");
        let shows = Rc::new(Cell::new(0_u32));
        let hides = Rc::new(Cell::new(0_u32));
        let (s, h) = (shows.clone(), hides.clone());
        let mut menu = ContextMenu::new();
        menu.attach(
            &d,
            "#t",
            vec![MenuItem::heading("a")],
            MenuConfig::default()
                .on_show(move |_, _| s.set(s.get() + 1))
                .on_hide(move |_, _| h.set(h.get() + 1)),
        );
        menu.update(
            &d,
            "#t",
            Some(vec![MenuItem::heading("a"), MenuItem::heading("b")].into()),
            ConfigPatch {
                on_hide: Patch::Clear,
                ..ConfigPatch::default()
            },
        );
        right_click(&mut menu, &mut d, target);
        assert_eq!(rows(&menu, &d), 2);
        menu.hide(&mut d);
        assert_eq!(shows.get(), 1);
        assert_eq!(hides.get(), 0);
    }

    #[test]
    fn update_without_registration_attaches() {
        let mut d = doc();
        let target = d.append_to_body("div", "t");
        let mut menu = ContextMenu::new();
        menu.try_update(
            &d,
            "#t",
            Some(vec![MenuItem::heading("a")].into()),
            MenuConfig::default(),
        )
        .unwrap();
        assert!(menu.is_attached("#t"));
        right_click(&mut menu, &mut d, target);
        assert_eq!(rows(&menu, &d), 1);
    }

    #[test]
    fn delete_reports_missing_and_removed_targets() {
        let mut d = doc();
        let target = d.append_to_body("div", "t");
        let mut menu = ContextMenu::new();
        assert_eq!(
            menu.try_delete(&d, "#t"),
            Err(MenuError::NotAttached("#t".into()))
        );

        menu.attach(&d, "#t", vec![MenuItem::heading("a")], MenuConfig::default());
        menu.try_delete(&d, "#t").unwrap();
        assert!(!right_click(&mut menu, &mut d, target));

        menu.attach(&d, "#t", vec![MenuItem::heading("a")], MenuConfig::default());
        d.detach(target);
        assert_eq!(
            menu.try_delete(&d, "#t"),
            Err(MenuError::TargetRemoved("#t".into()))
        );
        assert!(!menu.is_attached("#t"));
    }

    #[test]
    fn nonce_applies_until_first_show() {
        let mut d = doc();
        let target = d.append_to_body("div", "t");
        let mut menu = ContextMenu::new();
        menu.set_nonce("n0nce");
        menu.attach(&d, "#t", vec![MenuItem::heading("a")], MenuConfig::default());
        right_click(&mut menu, &mut d, target);

        let style = d.query_selector("style").unwrap();
        assert_eq!(d.attribute(style, "nonce"), Some("n0nce"));
        assert_eq!(menu.try_set_nonce("late"), Err(MenuError::NonceTooLate));
        menu.set_nonce("late");
        assert_eq!(d.attribute(style, "nonce"), Some("n0nce"));
    }
}
