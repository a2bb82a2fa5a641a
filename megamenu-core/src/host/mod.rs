//! Host document abstraction.
//!
//! The runtime never builds markup. It only reads and mutates class lists,
//! data attributes and inline styles on elements that the host page already
//! rendered. [Host] is that surface; a browser binding implements it over the
//! live DOM, and [memory::Document] implements it in memory for tests and
//! headless simulation.

use kurbo::Rect;
use nalgebra::Vector2;
use std::time::Duration;

pub mod memory;

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Create a new element handle from a raw host index.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Class names and attribute keys the runtime reads or writes.
pub mod markers {
    /// A mega-menu item block.
    pub const ITEM: &str = "wp-block-megamenu-item";
    /// The dropdown panel owned by an item.
    pub const DROPDOWN: &str = "wp-block-megamenu-item__dropdown";
    /// The inner content wrapper of a dropdown panel.
    pub const DROPDOWN_CONTENT: &str = "wp-block-megamenu-item__dropdown-content";
    /// The link/button of an item, used as the click target.
    pub const LINK: &str = "wp-block-megamenu-item__link";
    /// Any entry that owns a nested list.
    pub const HAS_CHILDREN: &str = "has-children";

    /// Opened item, opened root panel, opened hamburger.
    pub const OPENED: &str = "is-opened";
    /// Visible dropdown panel.
    pub const ACTIVE: &str = "is-active";
    /// Pointer left an item and a hover-intent close is pending.
    pub const LEFT: &str = "is-left";
    /// Root element is in compact mode.
    pub const MOBILE: &str = "is-mobile";
    /// Root element finished mounting.
    pub const INITIALIZED: &str = "is-initialized";
    /// Hidden toggle button.
    pub const HIDDEN: &str = "is-hidden";
    /// Prefix shared by all hamburger icon state markers.
    pub const STATE_PREFIX: &str = "is-state";
    /// Body scroll is locked.
    pub const NO_SCROLL: &str = "no-scroll";
    /// Nested dropdown opens towards the left.
    pub const TO_LEFT: &str = "toleft";

    /// Root class enabling compact mode.
    pub const COLLAPSIBLE: &str = "is-collapsible";
    /// Root class enabling full-width dropdowns.
    pub const FULL_WIDTH_DROPDOWN: &str = "has-full-width-dropdown";
    /// Legacy root class forcing the click activator.
    pub const ACTIVATOR_CLICK: &str = "activator-click";

    /// `data-activator`
    pub const DATA_ACTIVATOR: &str = "activator";
    /// `data-responsive-breakpoint`
    pub const DATA_BREAKPOINT: &str = "responsive-breakpoint";
    /// `data-dropdown-width`
    pub const DATA_DROPDOWN_WIDTH: &str = "dropdown-width";
    /// `data-dropdown-content-width`
    pub const DATA_DROPDOWN_CONTENT_WIDTH: &str = "dropdown-content-width";
    /// `data-menu-align`
    pub const DATA_MENU_ALIGN: &str = "menu-align";
    /// `data-level`, mirrors the current navigation depth.
    pub const DATA_LEVEL: &str = "level";
    /// `data-scroll-top`, the offset recorded by the scroll lock.
    pub const DATA_SCROLL_TOP: &str = "scroll-top";
}

/// The document surface the runtime works against.
///
/// All lengths are CSS pixels. `now` must be monotonic; only differences
/// between two readings are meaningful.
pub trait Host {
    /// Check whether an element carries a class.
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Add a class to an element. Adding a present class is a no-op.
    fn add_class(&mut self, element: ElementId, class: &str);

    /// Remove a class from an element. Removing a missing class is a no-op.
    fn remove_class(&mut self, element: ElementId, class: &str);

    /// All classes of an element, in document order.
    fn classes(&self, element: ElementId) -> Vec<String>;

    /// Read a `data-*` attribute (key without the `data-` prefix).
    fn data(&self, element: ElementId, key: &str) -> Option<String>;

    /// Write a `data-*` attribute.
    fn set_data(&mut self, element: ElementId, key: &str, value: &str);

    /// Remove a `data-*` attribute.
    fn remove_data(&mut self, element: ElementId, key: &str);

    /// Set an inline style property (kebab-case name).
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Remove an inline style property.
    fn remove_style(&mut self, element: ElementId, property: &str);

    /// Read an inline style property.
    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Viewport-relative bounding box of an element.
    fn bounding_box(&self, element: ElementId) -> Rect;

    /// Direct children of an element, in document order.
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /// The element immediately following this one.
    fn next_sibling(&self, element: ElementId) -> Option<ElementId>;

    /// The document body.
    fn body(&self) -> ElementId;

    /// Viewport size (the body client width is `x`).
    fn viewport_size(&self) -> Vector2<f64>;

    /// Full scrollable width of the body.
    fn body_scroll_width(&self) -> f64;

    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;

    /// Scroll the window vertically.
    fn scroll_to(&mut self, y: f64);

    /// Whether the device reports touch input.
    fn is_touch_capable(&self) -> bool;

    /// Monotonic time since an arbitrary host epoch.
    fn now(&self) -> Duration;

    /// Depth-first search below `element` (excluding it) for the first element
    /// carrying `class`.
    fn find_descendant(&self, element: ElementId, class: &str) -> Option<ElementId> {
        for child in self.children(element) {
            if self.has_class(child, class) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant(child, class) {
                return Some(found);
            }
        }
        None
    }

    /// Every element below `element` (excluding it) carrying `class`, in
    /// document order.
    fn find_descendants(&self, element: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(element).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if self.has_class(current, class) {
                found.push(current);
            }
            stack.extend(self.children(current).into_iter().rev());
        }
        found
    }
}
