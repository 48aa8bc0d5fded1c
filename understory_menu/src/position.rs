// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel placement: measuring, edge clamping, and direction flipping.
//!
//! ## Overview
//!
//! All geometry here is in layout units; convert host measurements with
//! [`Viewport::to_layout_rect`](crate::types::Viewport::to_layout_rect) first.
//!
//! - [`place_at`] puts a panel at a pointer location.
//! - [`place_beside`] puts a submenu panel flush against its parent item and
//!   flips the shared [`Direction`] when the preferred side would overflow.
//! - [`clamp_axis`] is the one-dimensional rule both use.
//!
//! ## Flipping
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_menu::position::place_beside;
//! use understory_menu::types::{Direction, Horizontal};
//!
//! let bounds = Rect::new(0.0, 0.0, 300.0, 600.0);
//! let item = Rect::new(150.0, 100.0, 250.0, 124.0);
//! let mut dir = Direction::default();
//! let placed = place_beside(item, Size::new(100.0, 48.0), bounds, &mut dir, 4.0);
//! // 250 + 100 overflows 300, so the panel opens to the left of the item.
//! assert_eq!(placed.x0, 50.0);
//! assert_eq!(dir.horizontal, Horizontal::Left);
//! ```

use kurbo::{Point, Rect, Size};

use crate::document::Document;
use crate::types::{Direction, ElementId, Horizontal, Vertical, Viewport};

/// Clamp one axis of a panel against `[near, far]`.
///
/// Moving positively (right/down), a far edge past `far` is pulled back to
/// `far - size`. Moving negatively (left/up), a near edge before `near` is
/// pushed to `near`. Other cases are left alone.
pub fn clamp_axis(pos: f64, size: f64, positive: bool, near: f64, far: f64) -> f64 {
    if positive && pos + size > far {
        far - size
    } else if !positive && pos < near {
        near
    } else {
        pos
    }
}

/// Place a panel of `size` at `point`, clamped to `bounds` using the current direction.
pub fn place_at(point: Point, size: Size, bounds: Rect, direction: Direction) -> Rect {
    let x = clamp_axis(
        point.x,
        size.width,
        direction.horizontal == Horizontal::Right,
        bounds.x0,
        bounds.x1,
    );
    let y = clamp_axis(
        point.y,
        size.height,
        direction.vertical == Vertical::Down,
        bounds.y0,
        bounds.y1,
    );
    Rect::from_origin_size((x, y), size)
}

/// Place a panel of `size` beside `anchor` (its parent item), updating `direction`.
///
/// The panel sits against the anchor's trailing edge and is nudged vertically
/// by `nudge` so its first row lines up with the anchor row. A horizontal
/// collision flips the horizontal direction and recomputes from the opposite
/// edge; a vertical collision flips the vertical direction and keeps the
/// clamped value. Both axes are clamped once more with the final directions.
/// On viewports narrower than two panels the result may still overlap the anchor.
pub fn place_beside(
    anchor: Rect,
    size: Size,
    bounds: Rect,
    direction: &mut Direction,
    nudge: f64,
) -> Rect {
    let x_for = |h: Horizontal| match h {
        Horizontal::Right => anchor.x1,
        Horizontal::Left => anchor.x0 - size.width,
    };
    let y_for = |v: Vertical| match v {
        Vertical::Down => anchor.y0 - nudge,
        Vertical::Up => anchor.y1 - size.height + nudge,
    };

    let mut x = x_for(direction.horizontal);
    let right = direction.horizontal == Horizontal::Right;
    if clamp_axis(x, size.width, right, bounds.x0, bounds.x1) != x {
        direction.horizontal = direction.horizontal.flipped();
        log::debug!("submenu flipped horizontally to {:?}", direction.horizontal);
        x = x_for(direction.horizontal);
    }

    let mut y = y_for(direction.vertical);
    let down = direction.vertical == Vertical::Down;
    let clamped = clamp_axis(y, size.height, down, bounds.y0, bounds.y1);
    if clamped != y {
        direction.vertical = direction.vertical.flipped();
        log::debug!("submenu flipped vertically to {:?}", direction.vertical);
        y = clamped;
    }

    let x = clamp_axis(
        x,
        size.width,
        direction.horizontal == Horizontal::Right,
        bounds.x0,
        bounds.x1,
    );
    let y = clamp_axis(
        y,
        size.height,
        direction.vertical == Vertical::Down,
        bounds.y0,
        bounds.y1,
    );
    Rect::from_origin_size((x, y), size)
}

/// Natural size of `panel` in layout units, rounded up to whole pixels.
///
/// A hidden deep copy is mounted in the body, measured, and detached, so the
/// real panel never shows up unpositioned.
pub fn measure(doc: &mut dyn Document, panel: ElementId, viewport: &Viewport) -> Size {
    let probe = doc.clone_element(panel);
    doc.set_style(probe, "visibility", "hidden");
    let body = doc.body();
    doc.append_child(body, probe);
    let rendered = doc.bounding_rect(probe).size();
    doc.detach(probe);
    viewport.to_layout_size(rendered).ceil()
}
