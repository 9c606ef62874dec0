//! Library exports for the verse player and its tests.
/// Application directory helpers.
pub mod app_dirs;
/// Verse catalog and persisted playback settings.
pub mod catalog;
/// User commands and hotkeys.
pub mod commands;
/// `config.toml` loading and saving.
pub mod config;
/// egui desktop shell.
pub mod egui_app;
/// Tracing setup.
pub mod logging;
/// Catalog navigation and session ownership.
pub mod navigation;
/// Audio transport and the play-beginning fade.
pub mod playback;
