// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: a host-agnostic, `no_std` context menu engine.
//!
//! ## Overview
//!
//! This crate turns declarative menu definitions into element trees inside a
//! host document, positions them against the viewport, opens nested submenus
//! on debounced hover, and runs lifecycle hooks around the top-level panel.
//! It does not own a real DOM or a layout engine.
//! Instead, the host implements [`Document`](crate::document::Document) and forwards
//! [`Event`](crate::types::Event)s and timer ticks to a [`ContextMenu`](crate::controller::ContextMenu).
//!
//! ## Definitions
//!
//! A [`MenuDefinition`](crate::item::MenuDefinition) is an ordered list of
//! [`MenuItem`](crate::item::MenuItem)s: dividers, headings, actions, links, and submenus.
//! Every field is a [`Value`](crate::value::Value), either a literal or a producer that
//! is evaluated once each time the menu renders.
//!
//! ## Placement
//!
//! Top-level panels open at the pointer and are clamped into the visual viewport.
//! Submenus open beside their parent row. When a submenu would overflow, the
//! opening direction flips and stays flipped for deeper panels until the tree closes.
//! See [`position`](crate::position).
//!
//! ## Closing
//!
//! The open tree closes on a click outside any interactive row, after an
//! action or link row is clicked, on Escape, on window resize, and once the
//! wheel or page scroll has been idle for a short settle delay.
//!
//! ## Workflow
//!
//! 1) Register menus with [`ContextMenu::attach`](crate::controller::ContextMenu::attach), keyed by selector.
//! 2) Forward host events with [`ContextMenu::handle_event`](crate::controller::ContextMenu::handle_event);
//!    a `true` result means the host should suppress its native context menu.
//! 3) Call [`ContextMenu::poll`](crate::controller::ContextMenu::poll) on every timer tick
//!    (or sleep until [`ContextMenu::next_deadline`](crate::controller::ContextMenu::next_deadline)).
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_menu::config::MenuConfig;
//! use understory_menu::controller::ContextMenu;
//! use understory_menu::item::MenuItem;
//! use understory_menu::memory::MemoryDocument;
//! use understory_menu::types::Event;
//!
//! let mut doc = MemoryDocument::new(Size::new(1024.0, 768.0));
//! let canvas = doc.append_to_body("div", "canvas");
//!
//! let mut menu = ContextMenu::new();
//! menu.attach(
//!     &doc,
//!     "#canvas",
//!     vec![
//!         MenuItem::heading("Canvas"),
//!         MenuItem::divider(),
//!         MenuItem::action("Clear", |_, _| {}),
//!         MenuItem::link("Help", "https://example.com/help").target("_blank"),
//!     ],
//!     MenuConfig::default(),
//! );
//!
//! let prevent_default = menu.handle_event(
//!     &mut doc,
//!     &Event::ContextMenu { target: canvas, position: Point::new(40.0, 40.0) },
//! );
//! assert!(prevent_default);
//! assert!(menu.is_open());
//! ```
//!
//! Usage errors (a duplicate `attach`, a missing target, a late nonce) never panic:
//! the plain operations log them through the `log` facade and do nothing, while the
//! `try_*` forms return a [`MenuError`](crate::error::MenuError).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod build;
mod registry;

pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod hover;
pub mod item;
pub mod memory;
pub mod position;
pub mod style;
pub mod types;
pub mod value;

pub use config::{ConfigPatch, MenuConfig, Options, Patch};
pub use controller::ContextMenu;
pub use document::Document;
pub use error::MenuError;
pub use item::{MenuDefinition, MenuItem};
pub use types::{Anchor, ElementId, Event};
pub use value::Value;
