//! Context-menu registry shared by every trigger site in the UI.
//!
//! A logical menu is identified by a [`MenuKey`]; registering a key yields a
//! [`MenuHandle`] bound to one display cell per key for the lifetime of the
//! process, so multiple trigger sites for the same menu always show
//! synchronized position, visibility, and payload.

mod definition;
mod registry;

pub use definition::{MenuDefinition, MenuGroup, MenuItem, MenuSource};
pub use registry::{MenuDisplay, MenuHandle, MenuKey, MenuPosition, MenuRegistry, PointerEvent};
