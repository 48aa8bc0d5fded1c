// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attach, update, and delete menus on document targets.
//!
//! Usage errors are logged, so run with logging enabled to see them.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_menu_demos --example menu_registry`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Size};
use understory_menu::config::{ConfigPatch, MenuConfig, Patch};
use understory_menu::controller::ContextMenu;
use understory_menu::document::Document;
use understory_menu::item::MenuItem;
use understory_menu::memory::MemoryDocument;
use understory_menu::types::{ElementId, Event};
use understory_menu::value::Value;

fn right_click(menu: &mut ContextMenu, doc: &mut MemoryDocument, target: ElementId) -> bool {
    menu.handle_event(
        doc,
        &Event::ContextMenu {
            target,
            position: Point::new(100.0, 100.0),
        },
    )
}

fn main() {
    env_logger::init();

    let mut doc = MemoryDocument::new(Size::new(800.0, 600.0));
    let list = doc.append_to_body("ul", "files");
    let row = doc.create_element("li");
    doc.append_child(list, row);

    let mut menu = ContextMenu::new();
    menu.set_nonce("r4nd0m");

    // The definition is produced fresh on every open.
    let opens = Rc::new(Cell::new(0_u32));
    let o = opens.clone();
    menu.attach(
        &doc,
        "#files",
        Value::producer(move || {
            o.set(o.get() + 1);
            vec![
                MenuItem::heading(format!("Opened {} times", o.get())),
                MenuItem::action("Rename", |_, item| println!("rename via {item:?}")),
            ]
        }),
        MenuConfig::default().on_show(|_, _| println!("files menu shown")),
    );

    // Duplicate and missing targets are logged and ignored.
    menu.attach(&doc, "#files", Vec::<MenuItem>::new(), MenuConfig::default());
    menu.attach(&doc, "#missing", Vec::<MenuItem>::new(), MenuConfig::default());

    println!("prevent default: {}", right_click(&mut menu, &mut doc, row));
    println!("prevent default: {}", right_click(&mut menu, &mut doc, row));
    if let Some(panel) = menu.open_panel() {
        println!("{}", doc.outer_markup(panel));
    }

    // Drop the show hook and swap in a static definition.
    menu.update(
        &doc,
        "#files",
        Some(vec![MenuItem::heading("Static")].into()),
        ConfigPatch {
            on_show: Patch::Clear,
            ..ConfigPatch::default()
        },
    );
    right_click(&mut menu, &mut doc, row);
    menu.hide(&mut doc);

    // Too late: the stylesheet is already installed.
    menu.set_nonce("other");

    doc.detach(list);
    menu.delete(&doc, "#files");
    println!("still attached: {}", menu.is_attached("#files"));
}
