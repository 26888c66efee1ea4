//! egui application split into state, controller, and renderer.
//!
//! State is plain data consumed by the renderer; the controller owns it and
//! applies store results and task events; the ui module draws panels and the
//! registered context menus.

pub mod controller;
pub mod state;
pub mod ui;
