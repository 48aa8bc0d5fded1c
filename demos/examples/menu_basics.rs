// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Show a menu at the pointer, click an action, and print the lifecycle.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_menu_demos --example menu_basics`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Size};
use understory_menu::config::MenuConfig;
use understory_menu::controller::ContextMenu;
use understory_menu::document::Document;
use understory_menu::item::{Download, MenuItem};
use understory_menu::memory::MemoryDocument;
use understory_menu::types::{Anchor, Event};

fn main() {
    env_logger::init();

    let mut doc = MemoryDocument::new(Size::new(1024.0, 768.0));
    let mut menu = ContextMenu::new();

    let copies = Rc::new(Cell::new(0_u32));
    let c = copies.clone();
    let definition = vec![
        MenuItem::heading("Selection").tooltip("Actions for the current selection"),
        MenuItem::divider(),
        MenuItem::action("Copy", move |_, _| c.set(c.get() + 1)).icon("copy.svg"),
        MenuItem::action("Paste", |_, _| {}).disabled(true),
        MenuItem::link("Export", "/export.csv").download(Download::Unnamed),
    ];

    let config = MenuConfig::default()
        .on_before_show(|definition, anchor| {
            println!("before show at {anchor:?}: {} items", definition.len());
            definition
        })
        .on_show(|_, panel| println!("shown: {panel:?}"))
        .on_hide(|_, panel| println!("hidden: {panel:?}"));

    let panel = menu.show(
        &mut doc,
        definition,
        Anchor::Pointer(Point::new(980.0, 40.0)),
        config,
    );
    println!("placed at {:?}", menu.panel_position(panel));
    println!("{}", doc.outer_markup(panel));

    let copy = doc.children(panel)[2];
    menu.handle_event(&mut doc, &Event::Click { target: copy });
    println!("copies: {}, open: {}", copies.get(), menu.is_open());
}
