// SPDX-License-Identifier: MIT OR Apache-2.0
//! Contains [MenuItemNode], one interactive entry of the menu tree.

use crate::geometry::{apply_placement, compute_placement};
use crate::host::{markers, ElementId, Host};
use crate::timer::{TimerHandle, TimerKey, TimerQueue};
use crate::tree::NodeId;
use kurbo::Rect;
use std::time::Duration;

/// An entry with a dropdown panel.
#[derive(Debug, Clone)]
pub struct MenuItemNode {
    element: ElementId,
    dropdown: Option<ElementId>,
    button: ElementId,
    parent: Option<NodeId>,
    depth: usize,
    is_open: bool,
    pending_close: Option<TimerHandle>,
}

impl MenuItemNode {
    /// Wrap an element of the host document.
    pub fn new(
        element: ElementId,
        dropdown: Option<ElementId>,
        button: ElementId,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        Self {
            element,
            dropdown,
            button,
            parent,
            depth,
            is_open: false,
            pending_close: None,
        }
    }

    /// The item element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The dropdown panel, if the host rendered one.
    pub fn dropdown(&self) -> Option<ElementId> {
        self.dropdown
    }

    /// The element receiving clicks.
    pub fn button(&self) -> ElementId {
        self.button
    }

    /// Parent node in the collected tree.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Depth among collected nodes (0 for top level).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Only nodes with a dropdown can open.
    pub fn has_children(&self) -> bool {
        self.dropdown.is_some()
    }

    /// Open the dropdown. Returns `false` for leaf nodes, which never open.
    pub fn open(&mut self, host: &mut dyn Host) -> bool {
        let Some(dropdown) = self.dropdown else {
            log::debug!("Ignoring open of {:?}: no dropdown panel", self.element);
            return false;
        };
        self.is_open = true;
        host.add_class(self.element, markers::OPENED);
        host.add_class(dropdown, markers::ACTIVE);
        host.remove_class(self.element, markers::LEFT);
        true
    }

    /// Close the dropdown. Returns `false` if it was already closed.
    pub fn close(&mut self, host: &mut dyn Host) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        host.remove_class(self.element, markers::OPENED);
        if let Some(dropdown) = self.dropdown {
            host.remove_class(dropdown, markers::ACTIVE);
        }
        true
    }

    /// Measure and place the dropdown against `container`.
    pub fn update_dropdown_position(
        &self,
        host: &mut dyn Host,
        container: Rect,
        max_width: f64,
        fit: bool,
    ) {
        let Some(dropdown) = self.dropdown else { return };
        let placement = compute_placement(
            host.bounding_box(self.element),
            host.bounding_box(dropdown),
            container,
            max_width,
            fit,
        );
        apply_placement(host, dropdown, &placement);
    }

    /// Flag the pointer as gone from this item.
    pub fn mark_left(&self, host: &mut dyn Host) {
        host.add_class(self.element, markers::LEFT);
    }

    /// Whether the pointer left and did not come back.
    pub fn is_left(&self, host: &dyn Host) -> bool {
        host.has_class(self.element, markers::LEFT)
    }

    /// Schedule the hover-intent close.
    pub fn schedule_close(
        &mut self,
        timers: &mut TimerQueue,
        key: TimerKey,
        now: Duration,
        delay: Duration,
    ) {
        self.pending_close = Some(timers.schedule(key, now, delay));
    }

    /// Cancel the hover-intent close and clear the left marker.
    pub fn cancel_close(&mut self, host: &mut dyn Host, timers: &mut TimerQueue) {
        if let Some(handle) = self.pending_close.take() {
            timers.cancel(handle);
        }
        host.remove_class(self.element, markers::LEFT);
    }

    /// Forget the timer handle once it fired.
    pub(crate) fn take_pending_close(&mut self) -> Option<TimerHandle> {
        self.pending_close.take()
    }

    /// Whether a hover-intent close is scheduled.
    pub fn has_pending_close(&self, timers: &TimerQueue) -> bool {
        self.pending_close.is_some_and(|h| timers.is_pending(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::Document;

    fn setup() -> (Document, MenuItemNode) {
        let mut doc = Document::default();
        let el = doc.create_element_at(
            doc.body(),
            &[markers::ITEM, markers::HAS_CHILDREN],
            Rect::new(200.0, 0.0, 300.0, 40.0),
        );
        let drop = doc.create_element_at(
            el,
            &[markers::DROPDOWN],
            Rect::new(100.0, 40.0, 400.0, 300.0),
        );
        (doc, MenuItemNode::new(el, Some(drop), el, None, 0))
    }

    #[test]
    fn test_open_close_markers() {
        let (mut doc, mut node) = setup();
        let drop = node.dropdown().unwrap();
        doc.add_class(node.element(), markers::LEFT);

        assert!(node.open(&mut doc));
        assert!(node.is_open());
        assert!(doc.has_class(node.element(), markers::OPENED));
        assert!(doc.has_class(drop, markers::ACTIVE));
        assert!(!doc.has_class(node.element(), markers::LEFT));

        assert!(node.close(&mut doc));
        assert!(!doc.has_class(node.element(), markers::OPENED));
        assert!(!doc.has_class(drop, markers::ACTIVE));
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut doc, mut node) = setup();
        let before = doc.classes(node.element());
        assert!(!node.close(&mut doc));
        assert_eq!(doc.classes(node.element()), before);
    }

    #[test]
    fn test_leaf_never_opens() {
        let mut doc = Document::default();
        let el = doc.create_element(doc.body(), &[markers::ITEM]);
        let mut leaf = MenuItemNode::new(el, None, el, None, 0);
        assert!(!leaf.has_children());
        assert!(!leaf.open(&mut doc));
        assert!(!leaf.is_open());
        leaf.update_dropdown_position(&mut doc, Rect::new(0.0, 0.0, 1000.0, 40.0), 800.0, false);
        assert_eq!(doc.style(el, "left"), None);
    }

    #[test]
    fn test_update_dropdown_position_centers() {
        let (mut doc, node) = setup();
        node.update_dropdown_position(&mut doc, Rect::new(0.0, 0.0, 1000.0, 40.0), 800.0, false);
        let drop = node.dropdown().unwrap();
        assert_eq!(doc.style(drop, "left").as_deref(), Some("100px"));
        assert_eq!(doc.style(drop, "max-width").as_deref(), Some("800px"));
    }

    #[test]
    fn test_cancel_close_clears_marker_and_timer() {
        let (mut doc, mut node) = setup();
        let mut timers = TimerQueue::new();
        let key = TimerKey::HoverIntent { node: 0, generation: 0 };
        node.mark_left(&mut doc);
        node.schedule_close(&mut timers, key, Duration::ZERO, Duration::from_millis(500));
        assert!(node.has_pending_close(&timers));

        node.cancel_close(&mut doc, &mut timers);
        assert!(!node.has_pending_close(&timers));
        assert!(!node.is_left(&doc));
        assert!(timers.is_empty());
    }
}
