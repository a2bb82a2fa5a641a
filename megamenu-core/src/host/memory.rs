//! In-memory document.
//!
//! A small element arena with class lists, data attributes, inline styles and
//! fixed bounding boxes. Time only moves when [Document::advance] is called,
//! which makes hover-intent timing fully deterministic.

use super::{ElementId, Host};
use indexmap::{IndexMap, IndexSet};
use kurbo::Rect;
use nalgebra::Vector2;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: IndexSet<String>,
    data: IndexMap<String, String>,
    styles: IndexMap<String, String>,
    rect: Rect,
}

/// A headless document implementing [Host].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    body: ElementId,
    viewport: Vector2<f64>,
    scroll_width: Option<f64>,
    scroll_y: f64,
    touch: bool,
    clock: Duration,
}

impl Document {
    /// Create an empty document with the given viewport size.
    pub fn new(viewport: Vector2<f64>) -> Self {
        let body = Node {
            rect: Rect::new(0.0, 0.0, viewport.x, viewport.y),
            ..Default::default()
        };
        Self {
            nodes: vec![body],
            body: ElementId(0),
            viewport,
            scroll_width: None,
            scroll_y: 0.0,
            touch: false,
            clock: Duration::ZERO,
        }
    }

    /// Append a new element with the given classes under `parent`.
    pub fn create_element(&mut self, parent: ElementId, classes: &[&str]) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent: Some(parent),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        });
        self.node_mut(parent).children.push(id);
        id
    }

    /// Builder-style variant of [Document::create_element] that also sets the
    /// bounding box.
    pub fn create_element_at(
        &mut self,
        parent: ElementId,
        classes: &[&str],
        rect: Rect,
    ) -> ElementId {
        let id = self.create_element(parent, classes);
        self.set_bounding_box(id, rect);
        id
    }

    /// Set the bounding box an element reports.
    pub fn set_bounding_box(&mut self, element: ElementId, rect: Rect) {
        self.node_mut(element).rect = rect;
    }

    /// Resize the viewport. The body scroll width follows unless it was
    /// overridden.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport.x = width;
        let height = self.viewport.y;
        self.node_mut(self.body).rect = Rect::new(0.0, 0.0, width, height);
    }

    /// Override the body scroll width (defaults to the viewport width).
    pub fn set_body_scroll_width(&mut self, width: f64) {
        self.scroll_width = Some(width);
    }

    /// Toggle touch capability.
    pub fn set_touch_capable(&mut self, touch: bool) {
        self.touch = touch;
    }

    /// Move the clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    /// Parent of an element, if any.
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|n| n.parent)
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.0 as usize)
    }

    fn node_mut(&mut self, element: ElementId) -> &mut Node {
        // Handles are only minted by this document.
        &mut self.nodes[element.0 as usize]
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vector2::new(1280.0, 800.0))
    }
}

impl Host for Document {
    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element).is_some_and(|n| n.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.node_mut(element).classes.insert(class.to_string());
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        self.node_mut(element).classes.shift_remove(class);
    }

    fn classes(&self, element: ElementId) -> Vec<String> {
        self.node(element)
            .map(|n| n.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn data(&self, element: ElementId, key: &str) -> Option<String> {
        self.node(element).and_then(|n| n.data.get(key).cloned())
    }

    fn set_data(&mut self, element: ElementId, key: &str, value: &str) {
        self.node_mut(element)
            .data
            .insert(key.to_string(), value.to_string());
    }

    fn remove_data(&mut self, element: ElementId, key: &str) {
        self.node_mut(element).data.shift_remove(key);
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        self.node_mut(element)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn remove_style(&mut self, element: ElementId, property: &str) {
        self.node_mut(element).styles.shift_remove(property);
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.node(element).and_then(|n| n.styles.get(property).cloned())
    }

    fn bounding_box(&self, element: ElementId) -> Rect {
        self.node(element).map(|n| n.rect).unwrap_or(Rect::ZERO)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn next_sibling(&self, element: ElementId) -> Option<ElementId> {
        let parent = self.parent(element)?;
        let siblings = &self.node(parent)?.children;
        let index = siblings.iter().position(|&c| c == element)?;
        siblings.get(index + 1).copied()
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn viewport_size(&self) -> Vector2<f64> {
        self.viewport
    }

    fn body_scroll_width(&self) -> f64 {
        self.scroll_width.unwrap_or(self.viewport.x)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    fn is_touch_capable(&self) -> bool {
        self.touch
    }

    fn now(&self) -> Duration {
        self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::markers;

    #[test]
    fn test_descendant_queries_follow_document_order() {
        let mut doc = Document::default();
        let body = doc.body();
        let root = doc.create_element(body, &["wp-block-megamenu"]);
        let a = doc.create_element(root, &[markers::ITEM]);
        let a_drop = doc.create_element(a, &[markers::DROPDOWN]);
        let nested = doc.create_element(a_drop, &[markers::ITEM]);
        let b = doc.create_element(root, &[markers::ITEM]);

        assert_eq!(doc.find_descendants(root, markers::ITEM), vec![a, nested, b]);
        assert_eq!(doc.find_descendant(a, markers::DROPDOWN), Some(a_drop));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.next_sibling(b), None);
    }

    #[test]
    fn test_class_list_is_a_set() {
        let mut doc = Document::default();
        let el = doc.create_element(doc.body(), &[]);
        doc.add_class(el, "is-opened");
        doc.add_class(el, "is-opened");
        assert_eq!(doc.classes(el), vec!["is-opened".to_string()]);
        doc.remove_class(el, "is-opened");
        doc.remove_class(el, "is-opened");
        assert!(doc.classes(el).is_empty());
    }
}
