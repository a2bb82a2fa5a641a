#![warn(missing_docs)]

//! Responsive multi-level mega-menu navigation for host documents.

pub use kurbo as geom;
pub use nalgebra as math;

pub use megamenu_core as core;
#[cfg(feature = "settings")]
pub use megamenu_services as services;

/// A "prelude" for hosts embedding the menu runtime.
///
/// ```rust
/// use megamenu::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::{Activator, MenuTreeConfig, Timings};
    pub use crate::core::controller::{
        Bindings, EventResponse, MegaMenuController, MenuEvent, OpenEntry,
    };
    pub use crate::core::hamburger::IconState;
    pub use crate::core::host::memory::Document;
    pub use crate::core::host::{markers, ElementId, Host};
    pub use crate::core::responsive::Mode;
    pub use crate::core::scroll_lock::{BodyScrollLock, ScrollLockManager};
    pub use crate::core::tree::NodeId;

    #[cfg(feature = "settings")]
    pub use crate::services::SettingsRegistry;

    // Math
    pub use kurbo::Rect;
    pub use nalgebra::Vector2;
}
