//! Library exports for reuse in integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Shared egui UI modules.
pub mod egui_app;
/// Tracing setup.
pub mod logging;
/// Context-menu registry and definitions.
pub mod menu;
/// SQLite store for baskets, folders, and file metadata.
pub mod store;
/// Forest builder for parent-referencing records.
pub mod tree;
