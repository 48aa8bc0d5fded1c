// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-menu lifecycle configuration and controller-wide options.
//!
//! ## Hooks
//!
//! [`MenuConfig`] carries four optional hooks that run around the top-level
//! panel's lifetime, in this order:
//!
//! 1. `on_before_show(definition, anchor)` returns the definition to render.
//! 2. The panel is built, positioned, and mounted.
//! 3. `on_show(doc, panel)`.
//! 4. Later, `on_before_hide(doc, panel)`, the panel is detached, then `on_hide(doc, panel)`.
//!
//! Submenu panels open and close without running hooks.
//!
//! ## Updates
//!
//! [`ConfigPatch`] describes a change to an existing [`MenuConfig`]: each field
//! keeps, replaces, or clears the current value.

use alloc::rc::Rc;
use alloc::string::String;
use core::time::Duration;

use crate::document::Document;
use crate::item::MenuDefinition;
use crate::style::DEFAULT_STYLESHEET;
use crate::types::{Anchor, Attributes, ElementId};

/// Transform a definition right before it renders.
pub type BeforeShowHook = Rc<dyn Fn(MenuDefinition, &Anchor) -> MenuDefinition>;

/// Observe the top-level panel element.
pub type PanelHook = Rc<dyn Fn(&mut dyn Document, ElementId)>;

/// Lifecycle hooks and panel attributes for one menu.
#[derive(Clone, Default)]
pub struct MenuConfig {
    /// Runs before building; its return value is rendered.
    pub on_before_show: Option<BeforeShowHook>,
    /// Runs after the panel is mounted and positioned.
    pub on_show: Option<PanelHook>,
    /// Runs before the panel is detached.
    pub on_before_hide: Option<PanelHook>,
    /// Runs after the panel is detached.
    pub on_hide: Option<PanelHook>,
    /// Attributes applied to the top-level panel.
    pub attributes: Option<Attributes>,
}

impl core::fmt::Debug for MenuConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuConfig")
            .field("on_before_show", &self.on_before_show.is_some())
            .field("on_show", &self.on_show.is_some())
            .field("on_before_hide", &self.on_before_hide.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl MenuConfig {
    /// Set the before-show hook.
    pub fn on_before_show(
        mut self,
        f: impl Fn(MenuDefinition, &Anchor) -> MenuDefinition + 'static,
    ) -> Self {
        self.on_before_show = Some(Rc::new(f));
        self
    }

    /// Set the show hook.
    pub fn on_show(mut self, f: impl Fn(&mut dyn Document, ElementId) + 'static) -> Self {
        self.on_show = Some(Rc::new(f));
        self
    }

    /// Set the before-hide hook.
    pub fn on_before_hide(mut self, f: impl Fn(&mut dyn Document, ElementId) + 'static) -> Self {
        self.on_before_hide = Some(Rc::new(f));
        self
    }

    /// Set the hide hook.
    pub fn on_hide(mut self, f: impl Fn(&mut dyn Document, ElementId) + 'static) -> Self {
        self.on_hide = Some(Rc::new(f));
        self
    }

    /// Set the top-level panel attributes.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Apply `patch` field by field.
    pub fn merge(&mut self, patch: ConfigPatch) {
        patch.on_before_show.apply(&mut self.on_before_show);
        patch.on_show.apply(&mut self.on_show);
        patch.on_before_hide.apply(&mut self.on_before_hide);
        patch.on_hide.apply(&mut self.on_hide);
        patch.attributes.apply(&mut self.attributes);
    }
}

/// A change to one optional configuration field.
#[derive(Clone, Debug)]
pub enum Patch<T> {
    /// Leave the field as it is.
    Keep,
    /// Replace the field.
    Set(T),
    /// Remove the field.
    Clear,
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    /// Write this change into `slot`.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(v) => *slot = Some(v),
            Self::Clear => *slot = None,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    /// `Some` replaces, `None` keeps.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Keep,
        }
    }
}

/// Field-wise update for a [`MenuConfig`].
#[derive(Clone, Default)]
pub struct ConfigPatch {
    /// Change to `on_before_show`.
    pub on_before_show: Patch<BeforeShowHook>,
    /// Change to `on_show`.
    pub on_show: Patch<PanelHook>,
    /// Change to `on_before_hide`.
    pub on_before_hide: Patch<PanelHook>,
    /// Change to `on_hide`.
    pub on_hide: Patch<PanelHook>,
    /// Change to `attributes`.
    pub attributes: Patch<Attributes>,
}

impl core::fmt::Debug for ConfigPatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fn state<T>(p: &Patch<T>) -> &'static str {
            match p {
                Patch::Keep => "Keep",
                Patch::Set(_) => "Set",
                Patch::Clear => "Clear",
            }
        }
        f.debug_struct("ConfigPatch")
            .field("on_before_show", &state(&self.on_before_show))
            .field("on_show", &state(&self.on_show))
            .field("on_before_hide", &state(&self.on_before_hide))
            .field("on_hide", &state(&self.on_hide))
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl From<MenuConfig> for ConfigPatch {
    /// Fields present in `config` replace; absent fields keep.
    fn from(config: MenuConfig) -> Self {
        Self {
            on_before_show: config.on_before_show.into(),
            on_show: config.on_show.into(),
            on_before_hide: config.on_before_hide.into(),
            on_hide: config.on_hide.into(),
            attributes: config.attributes.into(),
        }
    }
}

/// Controller-wide tunables.
#[derive(Clone, Debug)]
pub struct Options {
    /// How long the pointer must rest on an item before its hover action runs.
    pub hover_delay: Duration,
    /// Idle time after the last wheel event before the menu closes.
    pub wheel_settle: Duration,
    /// Vertical offset that lines a submenu's first row up with its parent row.
    pub submenu_nudge: f64,
    /// Class added to every panel element.
    ///
    /// [`DEFAULT_STYLESHEET`] selects `.context-menu`, so a different class
    /// needs a [`stylesheet`](Self::stylesheet) written against it.
    pub panel_class: String,
    /// Stylesheet installed before the first menu shows.
    pub stylesheet: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hover_delay: Duration::from_millis(150),
            wheel_settle: Duration::from_millis(100),
            submenu_nudge: 4.0,
            panel_class: String::from("context-menu"),
            stylesheet: String::from(DEFAULT_STYLESHEET),
        }
    }
}
