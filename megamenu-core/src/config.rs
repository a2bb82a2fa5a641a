//! Contains the [MenuTreeConfig] read from the menu root element and the
//! [Timings] used by the controller.

use crate::error::ConfigError;
use crate::host::{markers, ElementId, Host};
use std::time::Duration;

/// Delay between the pointer leaving an item and its dropdown closing.
pub const HOVER_INTENT_DELAY_MS: u64 = 500;

/// Delay before measuring full-width dropdowns again after they opened.
pub const LAYOUT_SETTLE_DELAY_MS: u64 = 250;

/// Input that opens a dropdown in expanded mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activator {
    /// Open on pointer enter, close after the hover-intent delay.
    #[default]
    Hover,
    /// Open on click.
    Click,
}

impl Activator {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim() {
            "hover" => Ok(Self::Hover),
            "click" => Ok(Self::Click),
            other => Err(ConfigError::InvalidActivator(other.to_string())),
        }
    }
}

/// Horizontal alignment of the menu. Only the toggle placement depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuAlign {
    /// Left aligned (default).
    #[default]
    Left,
    /// Right aligned.
    Right,
}

/// Configuration supplied by the host page at mount time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuTreeConfig {
    /// Preferred activator for expanded mode.
    pub activator: Activator,
    /// Compact mode applies below this viewport width. 0 disables it.
    pub responsive_breakpoint_px: u32,
    /// Whether compact mode applies at all.
    pub collapse_on_mobile: bool,
    /// Maximum dropdown width. 0 means no cap.
    pub dropdown_max_width_px: u32,
    /// Dropdowns always span the full menu/viewport width.
    pub full_width_dropdown: bool,
    /// Menu alignment.
    pub menu_align: MenuAlign,
    /// Optional CSS length applied as `max-width` on dropdown contents.
    pub dropdown_content_width: Option<String>,
}

impl MenuTreeConfig {
    /// Read the configuration from the root element.
    ///
    /// Malformed values never fail the mount: they are logged and replaced by
    /// their defaults.
    pub fn from_host(host: &dyn Host, root: ElementId) -> Self {
        let activator = if host.has_class(root, markers::ACTIVATOR_CLICK) {
            Activator::Click
        } else {
            host.data(root, markers::DATA_ACTIVATOR)
                .map(|value| {
                    Activator::parse(&value).unwrap_or_else(|e| {
                        log::warn!("{}, falling back to hover", e);
                        Activator::Hover
                    })
                })
                .unwrap_or_default()
        };

        let menu_align = match host.data(root, markers::DATA_MENU_ALIGN).as_deref() {
            Some("right") => MenuAlign::Right,
            _ => MenuAlign::Left,
        };

        Self {
            activator,
            responsive_breakpoint_px: read_px(host, root, markers::DATA_BREAKPOINT),
            collapse_on_mobile: host.has_class(root, markers::COLLAPSIBLE),
            dropdown_max_width_px: read_px(host, root, markers::DATA_DROPDOWN_WIDTH),
            full_width_dropdown: host.has_class(root, markers::FULL_WIDTH_DROPDOWN),
            menu_align,
            dropdown_content_width: host
                .data(root, markers::DATA_DROPDOWN_CONTENT_WIDTH)
                .filter(|w| !w.trim().is_empty()),
        }
    }

    /// The breakpoint as seen by the mode detector (`None` when disabled).
    pub fn breakpoint(&self) -> Option<u32> {
        Some(self.responsive_breakpoint_px).filter(|&b| b > 0)
    }
}

/// Parse a non-negative pixel count from a data attribute value.
///
/// Empty strings read as 0 and a trailing `px` is accepted.
pub fn parse_px(key: &str, value: &str) -> Result<u32, ConfigError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    if number.is_empty() {
        return Ok(0);
    }
    let parsed: f64 = number.parse().map_err(|_| ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: parsed,
        });
    }
    Ok(parsed.round() as u32)
}

fn read_px(host: &dyn Host, root: ElementId, key: &str) -> u32 {
    match host.data(root, key) {
        Some(value) => parse_px(key, &value).unwrap_or_else(|e| {
            log::warn!("{}, using 0", e);
            0
        }),
        None => 0,
    }
}

/// Timing constants of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay before a left item closes.
    pub hover_intent: Duration,
    /// Delay before full-width dropdowns are measured again.
    pub layout_settle: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            hover_intent: Duration::from_millis(HOVER_INTENT_DELAY_MS),
            layout_settle: Duration::from_millis(LAYOUT_SETTLE_DELAY_MS),
        }
    }
}
