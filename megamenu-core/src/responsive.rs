//! Responsive mode detection and activator resolution.

use crate::config::Activator;

/// Layout mode of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Desktop layout: top-level items visible, dropdowns float below.
    #[default]
    Expanded,
    /// Mobile layout: menu collapsed behind the toggle button.
    Compact,
}

impl Mode {
    /// Derive the mode from the breakpoint and the viewport width.
    pub fn detect(breakpoint_px: Option<u32>, viewport_width_px: f64) -> Self {
        if is_compact(breakpoint_px, viewport_width_px) {
            Mode::Compact
        } else {
            Mode::Expanded
        }
    }

    /// Whether this is [Mode::Compact].
    pub fn is_compact(self) -> bool {
        self == Mode::Compact
    }
}

/// `true` when a breakpoint is set (non-zero) and the viewport is narrower.
pub fn is_compact(breakpoint_px: Option<u32>, viewport_width_px: f64) -> bool {
    match breakpoint_px {
        None | Some(0) => false,
        Some(breakpoint) => viewport_width_px < f64::from(breakpoint),
    }
}

/// Resolve the activator actually used for binding handlers.
///
/// | touch | mode     | result     |
/// |-------|----------|------------|
/// | yes   | any      | click      |
/// | no    | compact  | click      |
/// | no    | expanded | configured |
pub fn resolve_activator(touch_capable: bool, mode: Mode, configured: Activator) -> Activator {
    match (touch_capable, mode) {
        (true, _) => Activator::Click,
        (false, Mode::Compact) => Activator::Click,
        (false, Mode::Expanded) => configured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_boundary() {
        assert!(is_compact(Some(768), 767.0));
        assert!(!is_compact(Some(768), 768.0));
        assert!(!is_compact(Some(768), 1024.0));
    }

    #[test]
    fn test_zero_or_unset_never_compact() {
        for width in [0.0, 100.0, 5000.0] {
            assert!(!is_compact(Some(0), width));
            assert!(!is_compact(None, width));
        }
        assert_eq!(Mode::detect(Some(0), 10.0), Mode::Expanded);
        assert_eq!(Mode::detect(Some(900), 600.0), Mode::Compact);
    }

    #[test]
    fn test_activator_table() {
        use Activator::*;
        assert_eq!(resolve_activator(true, Mode::Expanded, Hover), Click);
        assert_eq!(resolve_activator(false, Mode::Compact, Hover), Click);
        assert_eq!(resolve_activator(false, Mode::Expanded, Hover), Hover);
        assert_eq!(resolve_activator(false, Mode::Expanded, Click), Click);
    }
}
