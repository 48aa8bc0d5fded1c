// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: element handles, anchors, direction state, viewport metrics, class markers, and host events.

use alloc::collections::BTreeMap;
use alloc::string::String;
use kurbo::{Point, Rect, Size, Vec2};

/// Handle to an element owned by the host [`Document`](crate::document::Document).
///
/// The host allocates these; the menu engine only stores and compares them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a host-side identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-side identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Attribute name → value map applied to items and panels.
pub type Attributes = BTreeMap<String, String>;

/// What a panel is positioned against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// Open beside an element (submenus open beside their parent item).
    Element(ElementId),
    /// Open at a pointer location, in rendered (client) coordinates.
    Pointer(Point),
}

/// Preferred horizontal opening direction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Horizontal {
    /// Open toward the right of the anchor.
    #[default]
    Right,
    /// Open toward the left of the anchor.
    Left,
}

impl Horizontal {
    /// The opposite direction.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }
}

/// Preferred vertical opening direction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Vertical {
    /// Open downward from the anchor.
    #[default]
    Down,
    /// Open upward from the anchor.
    Up,
}

impl Vertical {
    /// The opposite direction.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }
}

/// Direction state shared by every panel in one open menu tree.
///
/// Defaults to right/down and is reset whenever the top-level panel hides.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Direction {
    /// Which edge of the anchor new panels open from.
    pub horizontal: Horizontal,
    /// Whether new panels grow down or up.
    pub vertical: Vertical,
}

/// Viewport metrics reported by the host.
///
/// `scale` is the page-level scale factor (rendered size ÷ layout size) and
/// `offset` is the visual viewport offset (pinch-zoom panning), both per axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Rendered viewport size.
    pub size: Size,
    /// Page scale (rendered ÷ layout) per axis.
    pub scale: Vec2,
    /// Visual viewport offset in layout units.
    pub offset: Vec2,
}

impl Viewport {
    /// An unscaled viewport of the given size.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            scale: Vec2::new(1.0, 1.0),
            offset: Vec2::ZERO,
        }
    }

    /// Scale factors with degenerate values (zero, negative, NaN) replaced by `1.0`.
    pub fn effective_scale(&self) -> Vec2 {
        let fix = |s: f64| if s.is_finite() && s > 0.0 { s } else { 1.0 };
        Vec2::new(fix(self.scale.x), fix(self.scale.y))
    }

    /// The region panels must stay inside, in layout units.
    pub fn bounds(&self) -> Rect {
        let s = self.effective_scale();
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.offset.x + self.size.width / s.x,
            self.offset.y + self.size.height / s.y,
        )
    }

    /// Convert a rendered point into layout units.
    pub fn to_layout_point(&self, p: Point) -> Point {
        let s = self.effective_scale();
        Point::new(p.x / s.x, p.y / s.y)
    }

    /// Convert a rendered rectangle into layout units.
    pub fn to_layout_rect(&self, r: Rect) -> Rect {
        let s = self.effective_scale();
        Rect::new(r.x0 / s.x, r.y0 / s.y, r.x1 / s.x, r.y1 / s.y)
    }

    /// Convert a rendered size into layout units.
    pub fn to_layout_size(&self, size: Size) -> Size {
        let s = self.effective_scale();
        Size::new(size.width / s.x, size.height / s.y)
    }
}

bitflags::bitflags! {
    /// Classes the builder writes onto rendered items.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemClass: u8 {
        /// Separator row.
        const DIVIDER     = 0b0000_0001;
        /// Bold, non-interactive row.
        const HEADING     = 0b0000_0010;
        /// Clickable or hoverable row.
        const INTERACTIVE = 0b0000_0100;
        /// Greyed-out row.
        const DISABLED    = 0b0000_1000;
        /// Row that owns a nested panel.
        const SUBMENU     = 0b0001_0000;
        /// Row with a leading icon.
        const ICON        = 0b0010_0000;
    }
}

const CLASS_NAMES: [(ItemClass, &str); 6] = [
    (ItemClass::DIVIDER, "divider"),
    (ItemClass::HEADING, "heading"),
    (ItemClass::INTERACTIVE, "interactive"),
    (ItemClass::DISABLED, "disabled"),
    (ItemClass::SUBMENU, "submenu"),
    (ItemClass::ICON, "icon"),
];

impl ItemClass {
    /// Document class name for a single flag, `None` for empty or combined sets.
    pub fn name(self) -> Option<&'static str> {
        CLASS_NAMES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, name)| *name)
    }

    /// Class names for every flag in the set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        CLASS_NAMES
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }
}

/// A key press forwarded by the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    /// The Escape key.
    Escape,
    /// A printable character.
    Character(char),
    /// Any other key.
    Other,
}

/// Host events routed into [`ContextMenu::handle_event`](crate::controller::ContextMenu::handle_event).
///
/// Pointer enter/leave follow non-bubbling semantics: moving into a descendant
/// (such as an item's open submenu) does not leave the item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Secondary-button press on `target` at `position` (rendered coordinates).
    ContextMenu {
        /// Innermost element under the pointer.
        target: ElementId,
        /// Pointer position.
        position: Point,
    },
    /// Primary click on `target`.
    Click {
        /// Innermost element under the pointer.
        target: ElementId,
    },
    /// Pointer entered `target`.
    PointerEnter {
        /// Element that was entered.
        target: ElementId,
    },
    /// Pointer left `target`.
    PointerLeave {
        /// Element that was left.
        target: ElementId,
    },
    /// The window was resized.
    Resize,
    /// A wheel step.
    Wheel,
    /// The page or a scroll container scrolled.
    ///
    /// Restarts the same settle timer as [`Event::Wheel`].
    Scroll,
    /// A key went down at window level.
    KeyDown(Key),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn class_names_follow_flag_order() {
        let names: Vec<_> = (ItemClass::SUBMENU | ItemClass::DISABLED).names().collect();
        assert_eq!(names, ["disabled", "submenu"]);
        assert_eq!(ItemClass::DIVIDER.name(), Some("divider"));
        assert_eq!((ItemClass::ICON | ItemClass::HEADING).name(), None);
    }

    #[test]
    fn bounds_account_for_scale_and_offset() {
        let vp = Viewport {
            size: Size::new(800.0, 600.0),
            scale: Vec2::new(2.0, 2.0),
            offset: Vec2::new(10.0, 20.0),
        };
        assert_eq!(vp.bounds(), Rect::new(10.0, 20.0, 410.0, 320.0));
        assert_eq!(vp.to_layout_point(Point::new(100.0, 50.0)), Point::new(50.0, 25.0));
    }

    #[test]
    fn degenerate_scale_falls_back_to_one() {
        let vp = Viewport {
            size: Size::new(100.0, 100.0),
            scale: Vec2::new(0.0, f64::NAN),
            offset: Vec2::ZERO,
        };
        assert_eq!(vp.effective_scale(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn direction_flips() {
        let d = Direction::default();
        assert_eq!(d.horizontal.flipped(), Horizontal::Left);
        assert_eq!(d.vertical.flipped(), Vertical::Up);
        assert_eq!(d.horizontal.flipped().flipped(), Horizontal::Right);
    }
}
