//! Event routing.
//!
//! The host forwards raw input to [MegaMenuController::handle_event]; which
//! inputs matter at any moment is described by [Bindings], recomputed on every
//! mount and resize.

use super::{Lifecycle, MegaMenuController};
use crate::config::Activator;
use crate::host::{ElementId, Host};

/// Input forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Pointer entered an element.
    PointerEnter(ElementId),
    /// Pointer left an element.
    PointerLeave(ElementId),
    /// Click or tap on an element.
    Click(ElementId),
    /// Click on the toggle button.
    ToggleClick,
    /// The viewport was resized.
    Resize,
}

/// What the host should do with the native event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Call `preventDefault` (suppress link navigation).
    pub prevent_default: bool,
    /// Call `stopImmediatePropagation` (keep parents from seeing it).
    pub stop_propagation: bool,
}

impl EventResponse {
    /// Let the event continue untouched.
    pub const IGNORED: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// The controller handled the event.
    pub const CONSUMED: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}

/// Listeners the host should keep attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bindings {
    /// Activator resolved for the current mode and device.
    pub activator: Option<Activator>,
    /// Pointer-enter on items opens them.
    pub pointer_enter: bool,
    /// Pointer-leave on items starts the hover-intent close. Only bound for
    /// the hover activator in expanded mode.
    pub pointer_leave: bool,
    /// Clicks on item buttons open them.
    pub click: bool,
    /// Clicks on the toggle button.
    pub toggle: bool,
    /// Viewport resize notifications.
    pub resize: bool,
}

impl Bindings {
    /// Nothing bound.
    pub fn none() -> Self {
        Self::default()
    }

    pub(super) fn for_activator(activator: Activator, compact: bool) -> Self {
        Self {
            activator: Some(activator),
            pointer_enter: activator == Activator::Hover,
            pointer_leave: activator == Activator::Hover && !compact,
            click: true,
            toggle: true,
            resize: true,
        }
    }
}

impl MegaMenuController {
    /// Dispatch a host event.
    pub fn handle_event(&mut self, host: &mut dyn Host, event: MenuEvent) -> EventResponse {
        if self.lifecycle != Lifecycle::Mounted {
            return EventResponse::IGNORED;
        }

        match event {
            MenuEvent::PointerEnter(element) => {
                if !self.bindings.pointer_enter {
                    return EventResponse::IGNORED;
                }
                if let Some(id) = self.items.find_by_element(element) {
                    self.open_item(host, id);
                }
                EventResponse::IGNORED
            },
            MenuEvent::PointerLeave(element) => {
                if !self.bindings.pointer_leave {
                    return EventResponse::IGNORED;
                }
                if let Some(id) = self.items.find_by_element(element) {
                    self.leave_item(host, id);
                }
                EventResponse::IGNORED
            },
            MenuEvent::Click(element) => {
                if !self.bindings.click {
                    return EventResponse::IGNORED;
                }
                match self.items.find_by_element(element) {
                    Some(id) if self.items[id].has_children() => {
                        self.open_item(host, id);
                        EventResponse::CONSUMED
                    },
                    _ => EventResponse::IGNORED,
                }
            },
            MenuEvent::ToggleClick => {
                if self.bindings.toggle {
                    self.toggle_root(host);
                }
                EventResponse::IGNORED
            },
            MenuEvent::Resize => {
                if self.bindings.resize {
                    self.resize(host);
                }
                EventResponse::IGNORED
            },
        }
    }
}
