//! Arena of interactive nodes collected from the host document.
//!
//! The hierarchy is read once per collection pass; afterwards the controller
//! works on indices and parent links only.

use crate::host::{markers, ElementId, Host};
use crate::item::MenuItemNode;
use std::ops::{Index, IndexMut};

/// Index of a node in a [MenuTree].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Which entries become interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectScope {
    /// Top-level mega-menu items with children (expanded mode).
    TopLevel,
    /// Every entry with children, at every depth (compact mode).
    AllDepths,
}

/// Class of the nested list rendered by plain navigation entries.
const SUBMENU: &str = "wp-block-navigation__submenu-container";

/// The collected nodes, in document order.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    nodes: Vec<MenuItemNode>,
}

impl MenuTree {
    /// Walk the subtree of `root` and collect interactive nodes.
    pub fn collect(host: &dyn Host, root: ElementId, scope: CollectScope) -> Self {
        let mut tree = Self::default();
        tree.walk(host, root, None, scope);
        log::debug!("Collected {} menu nodes ({:?})", tree.nodes.len(), scope);
        tree
    }

    fn walk(
        &mut self,
        host: &dyn Host,
        element: ElementId,
        parent: Option<NodeId>,
        scope: CollectScope,
    ) {
        for child in host.children(element) {
            if is_candidate(host, child, parent, scope) {
                let depth = parent.map_or(0, |p| self.nodes[p.0].depth() + 1);
                let id = NodeId(self.nodes.len());
                self.nodes.push(MenuItemNode::new(
                    child,
                    own_panel(host, child),
                    host.find_descendant(child, markers::LINK).unwrap_or(child),
                    parent,
                    depth,
                ));
                if scope == CollectScope::AllDepths {
                    self.walk(host, child, Some(id), scope);
                }
            } else {
                self.walk(host, child, parent, scope);
            }
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look a node up.
    pub fn get(&self, id: NodeId) -> Option<&MenuItemNode> {
        self.nodes.get(id.0)
    }

    /// Look a node up mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuItemNode> {
        self.nodes.get_mut(id.0)
    }

    /// Iterate over nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MenuItemNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Iterate over nodes mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut MenuItemNode)> {
        self.nodes.iter_mut().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Find the node wrapping an element (the item or its button).
    pub fn find_by_element(&self, element: ElementId) -> Option<NodeId> {
        self.iter()
            .find(|(_, n)| n.element() == element || n.button() == element)
            .map(|(id, _)| id)
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get(node).and_then(|n| n.parent());
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent());
        }
        false
    }
}

impl Index<NodeId> for MenuTree {
    type Output = MenuItemNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for MenuTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}

fn is_candidate(
    host: &dyn Host,
    element: ElementId,
    parent: Option<NodeId>,
    scope: CollectScope,
) -> bool {
    if !host.has_class(element, markers::HAS_CHILDREN) {
        return false;
    }
    match scope {
        CollectScope::TopLevel => parent.is_none() && host.has_class(element, markers::ITEM),
        CollectScope::AllDepths => true,
    }
}

fn is_panel(host: &dyn Host, element: ElementId) -> bool {
    host.has_class(element, markers::DROPDOWN) || host.has_class(element, SUBMENU)
}

/// The panel belonging to `element`, not descending into nested entries.
fn own_panel(host: &dyn Host, element: ElementId) -> Option<ElementId> {
    for child in host.children(element) {
        if is_panel(host, child) {
            return Some(child);
        }
        if host.has_class(child, markers::HAS_CHILDREN) {
            continue;
        }
        if let Some(found) = own_panel(host, child) {
            return Some(found);
        }
    }
    None
}

/// Panels nested inside `panel` (sub-dropdowns of a top-level dropdown).
pub fn nested_panels(host: &dyn Host, panel: ElementId) -> Vec<ElementId> {
    let mut found = host.find_descendants(panel, markers::DROPDOWN);
    found.extend(host.find_descendants(panel, SUBMENU));
    found.sort();
    found.dedup();
    found
}
