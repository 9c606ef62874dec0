//! Desktop shell: controller, window state and the egui renderer.

pub mod controller;
pub mod images;
pub mod startup;
pub mod state;
pub mod ui;

pub use controller::PlayerController;
pub use startup::{DesktopController, StartupError, build_controller};
pub use ui::{AyatApp, MIN_VIEWPORT_SIZE};
