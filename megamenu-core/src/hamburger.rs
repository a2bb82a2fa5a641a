//! Compact-mode toggle button.

use crate::host::{markers, ElementId, Host};

/// Icon shown by the toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconState {
    /// Nothing open.
    #[default]
    Closed,
    /// One level open.
    Back,
    /// Two or more levels open.
    Open,
}

impl IconState {
    /// Map a navigation depth to an icon.
    pub fn from_level(level: usize) -> Self {
        match level {
            0 => IconState::Closed,
            1 => IconState::Back,
            _ => IconState::Open,
        }
    }

    /// Class marker applied to the toggle element.
    pub fn marker(self) -> &'static str {
        match self {
            IconState::Closed => "is-state-close",
            IconState::Back => "is-state-back",
            IconState::Open => "is-state-open",
        }
    }
}

/// The toggle ("hamburger") button next to the menu root.
#[derive(Debug, Clone)]
pub struct ToggleControl {
    element: Option<ElementId>,
    visible: bool,
    icon: IconState,
}

impl ToggleControl {
    /// Wrap the element following the menu root. A missing element leaves
    /// every operation a no-op.
    pub fn new(element: Option<ElementId>) -> Self {
        if element.is_none() {
            log::warn!("Menu toggle element not found");
        }
        Self {
            element,
            visible: false,
            icon: IconState::Closed,
        }
    }

    /// The wrapped element.
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Show or hide the button.
    pub fn set_visible(&mut self, host: &mut dyn Host, show: bool) {
        self.visible = show;
        let Some(el) = self.element else { return };
        if show {
            host.remove_class(el, markers::HIDDEN);
        } else {
            host.add_class(el, markers::HIDDEN);
        }
    }

    /// Whether the button is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reflect the navigation depth in the icon. Exactly one state marker is
    /// present afterwards.
    pub fn set_icon_state(&mut self, host: &mut dyn Host, level: usize) {
        let state = IconState::from_level(level);
        self.icon = state;
        let Some(el) = self.element else { return };
        let wanted = state.marker();
        for class in host.classes(el) {
            if class.starts_with(markers::STATE_PREFIX) && class != wanted {
                host.remove_class(el, &class);
            }
        }
        host.add_class(el, wanted);
    }

    /// Current icon.
    pub fn icon_state(&self) -> IconState {
        self.icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::Document;

    #[test]
    fn test_single_state_marker() {
        let mut doc = Document::default();
        let el = doc.create_element(doc.body(), &["wp-block-megamenu__toggle", "is-state-open"]);
        let mut toggle = ToggleControl::new(Some(el));

        for (level, marker) in [
            (0, "is-state-close"),
            (1, "is-state-back"),
            (2, "is-state-open"),
            (5, "is-state-open"),
            (0, "is-state-close"),
        ] {
            toggle.set_icon_state(&mut doc, level);
            let states: Vec<String> = doc
                .classes(el)
                .into_iter()
                .filter(|c| c.starts_with("is-state"))
                .collect();
            assert_eq!(states, vec![marker.to_string()]);
        }
        assert_eq!(toggle.icon_state(), IconState::Closed);
    }

    #[test]
    fn test_visibility() {
        let mut doc = Document::default();
        let el = doc.create_element(doc.body(), &[]);
        let mut toggle = ToggleControl::new(Some(el));
        toggle.set_visible(&mut doc, false);
        assert!(doc.has_class(el, "is-hidden"));
        toggle.set_visible(&mut doc, true);
        assert!(!doc.has_class(el, "is-hidden"));
        assert!(toggle.is_visible());
    }

    #[test]
    fn test_missing_element_is_harmless() {
        let mut doc = Document::default();
        let mut toggle = ToggleControl::new(None);
        toggle.set_visible(&mut doc, true);
        toggle.set_icon_state(&mut doc, 2);
        assert_eq!(toggle.icon_state(), IconState::Open);
    }
}
