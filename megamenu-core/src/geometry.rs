// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dropdown placement.
//!
//! [compute_placement] is pure and works on plain rectangles so it can be
//! tested without a document. [apply_placement] and [clear_placement] write
//! the result as inline styles on a host element.

use crate::host::{ElementId, Host};
use bitflags::bitflags;
use kurbo::Rect;

/// Horizontal placement of a dropdown panel, relative to its static position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Offset of the left edge.
    pub left: Option<f64>,
    /// Offset of the right edge (right-aligned panels).
    pub right: Option<f64>,
    /// Explicit width (full-width panels).
    pub width: Option<f64>,
    /// Width cap.
    pub max_width: f64,
}

bitflags! {
    /// Inline geometry properties written by [apply_placement].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlacementKeys: u8 {
        /// `left`
        const LEFT = 1 << 0;
        /// `right`
        const RIGHT = 1 << 1;
        /// `width`
        const WIDTH = 1 << 2;
        /// `max-width`
        const MAX_WIDTH = 1 << 3;
    }
}

impl PlacementKeys {
    /// CSS property names of the selected keys.
    pub fn properties(self) -> impl Iterator<Item = &'static str> {
        [
            (Self::LEFT, "left"),
            (Self::RIGHT, "right"),
            (Self::WIDTH, "width"),
            (Self::MAX_WIDTH, "max-width"),
        ]
        .into_iter()
        .filter(move |(key, _)| self.contains(*key))
        .map(|(_, name)| name)
    }
}

/// Compute where a dropdown panel goes.
///
/// With `fit` the panel is shifted to the container origin and spans
/// `max_width`. Otherwise it is right-aligned when its right edge passes
/// `max_width`, left-aligned when its left edge is negative, and centered on
/// the trigger in every other case.
pub fn compute_placement(
    trigger: Rect,
    dropdown: Rect,
    container: Rect,
    max_width: f64,
    fit: bool,
) -> Placement {
    if fit {
        return Placement {
            left: Some(-container.x0),
            right: None,
            width: Some(max_width),
            max_width,
        };
    }

    let center = trigger.width() / 2.0 - dropdown.width() / 2.0;

    if dropdown.x1 > max_width {
        Placement {
            right: Some(-(max_width - container.x1)),
            max_width,
            ..Default::default()
        }
    } else if dropdown.x0 < 0.0 {
        Placement {
            left: Some(-(max_width - container.x0)),
            max_width,
            ..Default::default()
        }
    } else {
        Placement {
            left: Some(-center),
            max_width,
            ..Default::default()
        }
    }
}

/// The smallest non-zero width of the two, or 0 when both are 0.
pub fn lowest_width(body_width: f64, max_width: f64) -> f64 {
    match (body_width > 0.0, max_width > 0.0) {
        (true, true) => body_width.min(max_width),
        (true, false) => body_width,
        (false, true) => max_width,
        (false, false) => 0.0,
    }
}

/// Whether a nested dropdown reaches past `boundary_right` and should open
/// towards the left instead.
pub fn overflows_right(dropdown: Rect, boundary_right: f64) -> bool {
    dropdown.x1 >= boundary_right
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Write a placement as inline styles.
///
/// Position keys missing from the placement are removed, so switching from a
/// right-aligned to a centered panel does not leave a stale `right`.
pub fn apply_placement(host: &mut dyn Host, element: ElementId, placement: &Placement) {
    let entries = [
        ("left", placement.left),
        ("right", placement.right),
        ("width", placement.width),
    ];
    for (property, value) in entries {
        match value {
            Some(value) => host.set_style(element, property, &px(value)),
            None => host.remove_style(element, property),
        }
    }
    host.set_style(element, "max-width", &px(placement.max_width));
}

/// Remove a subset of the inline geometry.
pub fn clear_placement(host: &mut dyn Host, element: ElementId, keys: PlacementKeys) {
    for property in keys.properties() {
        host.remove_style(element, property);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::Document;

    fn container() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 60.0)
    }

    #[test]
    fn test_fit_aligns_to_container_origin() {
        let placement = compute_placement(
            Rect::new(300.0, 0.0, 380.0, 40.0),
            Rect::new(10.0, 40.0, 500.0, 300.0),
            Rect::new(120.0, 0.0, 1120.0, 60.0),
            1280.0,
            true,
        );
        assert_eq!(placement.left, Some(-120.0));
        assert_eq!(placement.width, Some(1280.0));
        assert_eq!(placement.max_width, 1280.0);
        assert_eq!(placement.right, None);
    }

    #[test]
    fn test_right_edge_overflow_right_aligns() {
        let placement = compute_placement(
            Rect::new(700.0, 0.0, 760.0, 40.0),
            Rect::new(600.0, 40.0, 900.0, 300.0),
            container(),
            800.0,
            false,
        );
        assert_eq!(placement.right, Some(200.0));
        assert_eq!(placement.left, None);
        assert_eq!(placement.max_width, 800.0);
    }

    #[test]
    fn test_negative_left_edge_left_aligns() {
        let placement = compute_placement(
            Rect::new(10.0, 0.0, 70.0, 40.0),
            Rect::new(-50.0, 40.0, 250.0, 300.0),
            container(),
            800.0,
            false,
        );
        assert_eq!(placement.left, Some(-800.0));
        assert_eq!(placement.right, None);
    }

    #[test]
    fn test_centered_on_trigger() {
        let trigger = Rect::new(200.0, 0.0, 300.0, 40.0);
        let dropdown = Rect::new(100.0, 40.0, 400.0, 300.0);
        let placement = compute_placement(trigger, dropdown, container(), 800.0, false);
        assert_eq!(placement.left, Some(-(100.0 / 2.0 - 300.0 / 2.0)));
        assert_eq!(placement.width, None);
    }

    #[test]
    fn test_lowest_width_ignores_zero() {
        assert_eq!(lowest_width(1280.0, 0.0), 1280.0);
        assert_eq!(lowest_width(1280.0, 900.0), 900.0);
        assert_eq!(lowest_width(0.0, 900.0), 900.0);
        assert_eq!(lowest_width(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_apply_then_clear() {
        let mut doc = Document::default();
        let el = doc.create_element(doc.body(), &[]);
        doc.set_style(el, "right", "12px");

        apply_placement(
            &mut doc,
            el,
            &Placement {
                left: Some(-120.0),
                right: None,
                width: Some(1280.5),
                max_width: 1280.5,
            },
        );
        assert_eq!(doc.style(el, "left").as_deref(), Some("-120px"));
        assert_eq!(doc.style(el, "width").as_deref(), Some("1280.5px"));
        assert_eq!(doc.style(el, "max-width").as_deref(), Some("1280.5px"));
        assert_eq!(doc.style(el, "right"), None);

        clear_placement(
            &mut doc,
            el,
            PlacementKeys::LEFT | PlacementKeys::WIDTH | PlacementKeys::MAX_WIDTH,
        );
        assert_eq!(doc.style(el, "left"), None);
        assert_eq!(doc.style(el, "width"), None);
        assert_eq!(doc.style(el, "max-width"), None);
    }
}
