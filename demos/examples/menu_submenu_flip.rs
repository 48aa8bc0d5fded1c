// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested submenus near the right edge flip to open leftward.
//!
//! The pointer rests on each parent row for the hover delay, then the
//! example prints where every panel landed and the shared direction.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_menu_demos --example menu_submenu_flip`

use std::time::Duration;

use kurbo::{Point, Size};
use understory_menu::config::MenuConfig;
use understory_menu::controller::ContextMenu;
use understory_menu::document::Document;
use understory_menu::item::MenuItem;
use understory_menu::memory::MemoryDocument;
use understory_menu::types::{Anchor, ElementId, Event};

fn rest_on(menu: &mut ContextMenu, doc: &mut MemoryDocument, item: ElementId) {
    menu.handle_event(doc, &Event::PointerEnter { target: item });
    doc.advance(menu.options().hover_delay);
    menu.poll(doc);
}

fn main() {
    env_logger::init();

    let mut doc = MemoryDocument::new(Size::new(640.0, 480.0));
    let mut menu = ContextMenu::new();

    let deepest = vec![MenuItem::heading("Leaf A"), MenuItem::heading("Leaf B")];
    let middle = vec![
        MenuItem::heading("Middle"),
        MenuItem::submenu("Deeper", deepest),
    ];
    let root = vec![
        MenuItem::submenu("Open", middle),
        MenuItem::action("Close", |_, _| {}),
    ];

    let panel = menu.show(
        &mut doc,
        root,
        Anchor::Pointer(Point::new(420.0, 30.0)),
        MenuConfig::default(),
    );
    println!("root    {:?}", menu.panel_position(panel));

    let open = doc.children(panel)[0];
    rest_on(&mut menu, &mut doc, open);
    let Some(sub) = menu.submenu_of(open) else {
        return;
    };
    println!("submenu {:?} {:?}", menu.panel_position(sub), menu.direction());

    let deeper = doc.children(sub)[1];
    rest_on(&mut menu, &mut doc, deeper);
    if let Some(leaf) = menu.submenu_of(deeper) {
        println!("leaf    {:?} {:?}", menu.panel_position(leaf), menu.direction());
    }

    // A quick sweep across the root rows opens nothing.
    for row in doc.children(panel) {
        menu.handle_event(&mut doc, &Event::PointerEnter { target: row });
        doc.advance(Duration::from_millis(40));
        menu.handle_event(&mut doc, &Event::PointerLeave { target: row });
    }
    menu.poll(&mut doc);
    println!("after sweep, submenu still open: {}", menu.submenu_of(open).is_some());

    menu.handle_event(&mut doc, &Event::Resize);
    println!("after resize: open={} {:?}", menu.is_open(), menu.direction());
}
