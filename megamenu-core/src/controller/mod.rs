//! The mega-menu state machine.
//!
//! [MegaMenuController] owns the collected nodes, the open path and the
//! responsive mode. Every transition takes `&mut self` and the host document,
//! runs to completion, and leaves `current_level == open_path.len()` with
//! exactly the nodes on the path open.

pub mod events;

pub use events::{Bindings, EventResponse, MenuEvent};

use crate::config::{Activator, MenuTreeConfig, Timings};
use crate::geometry::{clear_placement, lowest_width, overflows_right, PlacementKeys};
use crate::hamburger::ToggleControl;
use crate::host::{markers, ElementId, Host};
use crate::responsive::{is_compact, resolve_activator, Mode};
use crate::scroll_lock::ScrollLockManager;
use crate::timer::{TimerKey, TimerQueue};
use crate::tree::{nested_panels, CollectScope, MenuTree, NodeId};
use std::time::Duration;

/// An entry of the open path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenEntry {
    /// The whole compact-mode panel, opened by the toggle button.
    RootPanel,
    /// An opened node.
    Item(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Mounted,
    Disposed,
}

/// Root state machine of one menu instance.
pub struct MegaMenuController {
    root: ElementId,
    config: MenuTreeConfig,
    timings: Timings,
    hamburger: ToggleControl,
    scroll_lock: Box<dyn ScrollLockManager>,
    items: MenuTree,
    generation: u64,
    mode: Mode,
    current_level: usize,
    open_path: Vec<OpenEntry>,
    timers: TimerQueue,
    bindings: Bindings,
    lifecycle: Lifecycle,
}

impl MegaMenuController {
    /// Prepare a controller for the menu rooted at `root`.
    ///
    /// The configuration is read right away; nothing is mutated until
    /// [MegaMenuController::mount].
    pub fn new(host: &dyn Host, root: ElementId, scroll_lock: Box<dyn ScrollLockManager>) -> Self {
        let config = MenuTreeConfig::from_host(host, root);
        let mode = detect_mode(&config, host);
        Self {
            root,
            hamburger: ToggleControl::new(host.next_sibling(root)),
            config,
            timings: Timings::default(),
            scroll_lock,
            items: MenuTree::default(),
            generation: 0,
            mode,
            current_level: 0,
            open_path: Vec::new(),
            timers: TimerQueue::new(),
            bindings: Bindings::none(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Override the default delays.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Collect nodes, lay out dropdowns and bind handlers.
    ///
    /// A root without children is left untouched.
    pub fn mount(&mut self, host: &mut dyn Host) {
        if self.lifecycle != Lifecycle::Uninitialized {
            log::debug!("Ignoring mount of {:?}: already {:?}", self.root, self.lifecycle);
            return;
        }
        if host.children(self.root).is_empty() {
            log::debug!("Menu {:?} has no content, skipping mount", self.root);
            return;
        }

        self.mode = detect_mode(&self.config, host);
        self.collect(host);
        self.apply_mode_markers(host);
        self.apply_content_width(host);
        self.update_controls(host);
        self.bind(host);
        self.set_level(host, 0);
        host.add_class(self.root, markers::INITIALIZED);
        self.lifecycle = Lifecycle::Mounted;

        log::info!(
            "Mounted menu {:?}: {} nodes, {:?} mode, {:?} activator",
            self.root,
            self.items.len(),
            self.mode,
            self.bindings.activator
        );
    }

    /// Handle a viewport resize. Not debounced.
    pub fn resize(&mut self, host: &mut dyn Host) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        let mode = detect_mode(&self.config, host);
        if mode != self.mode {
            log::info!("Menu {:?} switching from {:?} to {:?}", self.root, self.mode, mode);
            self.close_all(host);
            self.timers.clear();
            self.mode = mode;
            self.collect(host);
            self.apply_mode_markers(host);
        }
        self.update_controls(host);
        self.bind(host);
        self.debug_check();
    }

    /// Open a node, closing whatever is open at its depth or deeper.
    ///
    /// Returns `true` if the node was opened by this call.
    pub fn open_item(&mut self, host: &mut dyn Host, id: NodeId) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            return false;
        }
        let Some(node) = self.items.get_mut(id) else {
            return false;
        };
        if !node.has_children() {
            return false;
        }
        node.cancel_close(host, &mut self.timers);
        if node.is_open() {
            return false;
        }

        self.truncate_to_ancestors_of(host, id);

        if !self.mode.is_compact() {
            let (container, max_width) = self.layout_bounds(host);
            self.items[id].update_dropdown_position(
                host,
                container,
                max_width,
                self.config.full_width_dropdown,
            );
        }

        self.items[id].open(host);
        self.open_path.push(OpenEntry::Item(id));
        self.set_level(host, self.open_path.len());

        if self.config.full_width_dropdown && !self.mode.is_compact() {
            self.timers
                .schedule(TimerKey::LayoutSettle, host.now(), self.timings.layout_settle);
        }

        log::debug!("Opened {:?}, level {}", id, self.current_level);
        self.debug_check();
        true
    }

    /// Close a node. If it is on the open path, everything opened after it
    /// closes too.
    pub fn close_item(&mut self, host: &mut dyn Host, id: NodeId) {
        if self.items.get(id).is_none() {
            return;
        }
        match self.open_path.iter().position(|e| *e == OpenEntry::Item(id)) {
            Some(position) => {
                while self.open_path.len() > position {
                    self.pop_entry(host);
                }
                self.set_level(host, self.open_path.len());
                log::debug!("Closed {:?}, level {}", id, self.current_level);
            },
            None => {
                self.items[id].close(host);
            },
        }
        self.debug_check();
    }

    /// Step back one level.
    ///
    /// In compact mode this only happens when `force` is set (the toggle
    /// button); an empty path falls back to [MegaMenuController::close_all].
    pub fn close_last_opened(&mut self, host: &mut dyn Host, force: bool) {
        if self.mode.is_compact() && !force {
            return;
        }
        if self.open_path.is_empty() {
            log::warn!("No open menu found, closing everything");
            self.close_all(host);
            return;
        }
        self.pop_entry(host);
        self.set_level(host, self.open_path.len());
        self.debug_check();
    }

    /// Close every node and the root panel, reset the level to 0.
    pub fn close_all(&mut self, host: &mut dyn Host) {
        while !self.open_path.is_empty() {
            self.pop_entry(host);
        }
        for (_, node) in self.items.iter_mut() {
            node.cancel_close(host, &mut self.timers);
            node.close(host);
        }
        self.close_root_panel(host);
        self.set_level(host, 0);
    }

    /// Toggle button behaviour: open the root panel, or step back a level.
    pub fn toggle_root(&mut self, host: &mut dyn Host) {
        if !self.mode.is_compact() {
            log::debug!("Ignoring toggle outside compact mode");
            return;
        }
        if self.current_level == 0 {
            host.add_class(self.root, markers::OPENED);
            self.scroll_lock.lock(host);
            self.open_path.push(OpenEntry::RootPanel);
            self.set_level(host, 1);
            self.debug_check();
        } else {
            self.close_last_opened(host, true);
        }
    }

    /// Run every timer due at the host's current time.
    ///
    /// Returns the number of timers that fired.
    pub fn tick(&mut self, host: &mut dyn Host) -> usize {
        if self.lifecycle != Lifecycle::Mounted {
            return 0;
        }
        let due = self.timers.take_due(host.now());
        for key in &due {
            match *key {
                TimerKey::HoverIntent { node, generation } => {
                    self.expire_hover_intent(host, NodeId(node), generation)
                },
                TimerKey::LayoutSettle => {
                    if !self.mode.is_compact() {
                        self.update_controls(host);
                    }
                },
            }
        }
        due.len()
    }

    /// Drop every timer and binding. Later events are ignored.
    pub fn dispose(&mut self) {
        self.timers.clear();
        self.bindings = Bindings::none();
        self.lifecycle = Lifecycle::Disposed;
        log::debug!("Disposed menu {:?}", self.root);
    }

    /// Pointer left a node: start its hover-intent close.
    pub(crate) fn leave_item(&mut self, host: &mut dyn Host, id: NodeId) {
        if self.mode.is_compact() || self.bindings.activator != Some(Activator::Hover) {
            return;
        }
        let now = host.now();
        let key = TimerKey::HoverIntent {
            node: id.0,
            generation: self.generation,
        };
        let delay = self.timings.hover_intent;
        let Some(node) = self.items.get_mut(id) else {
            return;
        };
        if !node.is_open() {
            return;
        }
        node.mark_left(host);
        node.schedule_close(&mut self.timers, key, now, delay);
    }

    fn expire_hover_intent(&mut self, host: &mut dyn Host, id: NodeId, generation: u64) {
        if generation != self.generation {
            log::debug!("Dropping stale hover-intent timer for {:?}", id);
            return;
        }
        let Some(node) = self.items.get_mut(id) else {
            return;
        };
        node.take_pending_close();
        if !node.is_left(host) {
            return;
        }
        host.remove_class(node.element(), markers::LEFT);
        if node.is_open() {
            self.close_item(host, id);
        }
    }

    fn pop_entry(&mut self, host: &mut dyn Host) {
        match self.open_path.pop() {
            Some(OpenEntry::Item(id)) => {
                let node = &mut self.items[id];
                node.cancel_close(host, &mut self.timers);
                node.close(host);
            },
            Some(OpenEntry::RootPanel) => self.close_root_panel(host),
            None => {},
        }
    }

    fn truncate_to_ancestors_of(&mut self, host: &mut dyn Host, id: NodeId) {
        while let Some(&OpenEntry::Item(top)) = self.open_path.last() {
            if self.items.is_ancestor(top, id) {
                break;
            }
            self.pop_entry(host);
        }
    }

    fn close_root_panel(&mut self, host: &mut dyn Host) {
        host.remove_class(self.root, markers::OPENED);
        self.scroll_lock.unlock(host);
    }

    fn set_level(&mut self, host: &mut dyn Host, level: usize) {
        self.current_level = level;
        self.hamburger.set_icon_state(host, level);
        host.set_data(self.root, markers::DATA_LEVEL, &level.to_string());
    }

    fn collect(&mut self, host: &dyn Host) {
        let scope = if self.mode.is_compact() {
            CollectScope::AllDepths
        } else {
            CollectScope::TopLevel
        };
        self.generation += 1;
        self.items = MenuTree::collect(host, self.root, scope);
    }

    fn bind(&mut self, host: &dyn Host) {
        let activator = resolve_activator(
            host.is_touch_capable(),
            self.mode,
            self.config.activator,
        );
        self.bindings = Bindings::for_activator(activator, self.mode.is_compact());
    }

    fn apply_mode_markers(&mut self, host: &mut dyn Host) {
        let compact = self.mode.is_compact();
        self.hamburger
            .set_visible(host, compact && self.config.collapse_on_mobile);
        if compact {
            host.add_class(self.root, markers::MOBILE);
        } else {
            host.remove_class(self.root, markers::MOBILE);
            host.remove_class(self.root, markers::OPENED);
        }
    }

    fn apply_content_width(&self, host: &mut dyn Host) {
        let Some(width) = self.config.dropdown_content_width.as_deref() else {
            return;
        };
        for content in host.find_descendants(self.root, markers::DROPDOWN_CONTENT) {
            host.set_style(content, "max-width", width);
        }
    }

    fn layout_bounds(&self, host: &dyn Host) -> (kurbo::Rect, f64) {
        let max_width = lowest_width(
            host.body_scroll_width(),
            f64::from(self.config.dropdown_max_width_px),
        );
        (host.bounding_box(self.root), max_width)
    }

    /// Place every dropdown (expanded) or strip inline geometry (compact).
    fn update_controls(&mut self, host: &mut dyn Host) {
        if self.items.is_empty() {
            return;
        }
        let dropdowns: Vec<ElementId> = self
            .items
            .iter()
            .filter_map(|(_, n)| n.dropdown())
            .collect();

        if self.mode.is_compact() {
            for dropdown in dropdowns {
                clear_placement(host, dropdown, PlacementKeys::all());
                for nested in nested_panels(host, dropdown) {
                    host.remove_class(nested, markers::TO_LEFT);
                }
            }
            return;
        }

        let (container, max_width) = self.layout_bounds(host);
        for (_, node) in self.items.iter() {
            node.update_dropdown_position(
                host,
                container,
                max_width,
                self.config.full_width_dropdown,
            );
        }

        let viewport = host.viewport_size().x;
        for dropdown in dropdowns {
            let panel = host.bounding_box(dropdown);
            let boundary = if panel.width() > 0.0 { panel.x1 } else { viewport };
            for nested in nested_panels(host, dropdown) {
                host.remove_class(nested, markers::TO_LEFT);
                if overflows_right(host.bounding_box(nested), boundary) {
                    host.add_class(nested, markers::TO_LEFT);
                }
            }
        }
    }

    /// Whether the level and open flags agree with the open path.
    pub fn invariants_hold(&self) -> bool {
        if self.current_level != self.open_path.len() {
            return false;
        }
        let on_path = |id: NodeId| self.open_path.contains(&OpenEntry::Item(id));
        let flags_match = self.items.iter().all(|(id, n)| n.is_open() == on_path(id));
        let open_have_children = self.items.iter().all(|(_, n)| !n.is_open() || n.has_children());
        let mut depths: Vec<usize> = self
            .items
            .iter()
            .filter(|(_, n)| n.is_open())
            .map(|(_, n)| n.depth())
            .collect();
        let open_count = depths.len();
        depths.sort_unstable();
        depths.dedup();
        flags_match && open_have_children && depths.len() == open_count
    }

    fn debug_check(&self) {
        debug_assert!(self.invariants_hold(), "menu state invariants violated");
    }

    /// Current layout mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Depth of the open path.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// The open path, outermost first.
    pub fn open_path(&self) -> &[OpenEntry] {
        &self.open_path
    }

    /// Collected nodes.
    pub fn items(&self) -> &MenuTree {
        &self.items
    }

    /// The toggle button.
    pub fn hamburger(&self) -> &ToggleControl {
        &self.hamburger
    }

    /// Configuration read at construction.
    pub fn config(&self) -> &MenuTreeConfig {
        &self.config
    }

    /// Listeners the host should keep attached.
    pub fn bindings(&self) -> Bindings {
        self.bindings
    }

    /// Whether the compact root panel is open.
    pub fn is_root_open(&self) -> bool {
        self.open_path.first() == Some(&OpenEntry::RootPanel)
    }

    /// Whether the body scroll lock is held.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    /// Whether [MegaMenuController::mount] completed.
    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Earliest pending timer, for scheduling the next [MegaMenuController::tick].
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether `id` has a hover-intent close pending.
    pub fn has_pending_close(&self, id: NodeId) -> bool {
        self.items
            .get(id)
            .is_some_and(|n| n.has_pending_close(&self.timers))
    }

    /// Find the node wrapping an element.
    pub fn node_for(&self, element: ElementId) -> Option<NodeId> {
        self.items.find_by_element(element)
    }
}

fn detect_mode(config: &MenuTreeConfig, host: &dyn Host) -> Mode {
    if config.collapse_on_mobile && is_compact(config.breakpoint(), host.viewport_size().x) {
        Mode::Compact
    } else {
        Mode::Expanded
    }
}
