#![warn(missing_docs)]

//! Core runtime for megamenu => See `megamenu` crate.
//!
//! Contains the menu state machine, dropdown geometry and the host document
//! abstraction it runs against.

/// Contains the [Host](host::Host) trait and the in-memory document.
pub mod host;

/// Contains the [MenuTreeConfig](config::MenuTreeConfig) read from the host page.
pub mod config;

/// Contains configuration errors.
pub mod error;

/// Contains dropdown placement maths.
pub mod geometry;

/// Contains responsive mode detection.
pub mod responsive;

/// Contains the toggle button.
pub mod hamburger;

/// Contains the body scroll lock.
pub mod scroll_lock;

/// Contains cancellable deadlines for hover intent and layout refreshes.
pub mod timer;

/// Contains [MenuItemNode](item::MenuItemNode).
pub mod item;

/// Contains the arena of collected menu nodes.
pub mod tree;

/// Contains the [MegaMenuController](controller::MegaMenuController) state machine.
pub mod controller;

pub use controller::{EventResponse, MegaMenuController, MenuEvent, OpenEntry};
