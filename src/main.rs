//! Entry point for the egui verse player.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use ayat::config;
use ayat::egui_app::{AyatApp, MIN_VIEWPORT_SIZE, build_controller};
use ayat::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let startup = config::load_or_default()
        .map_err(|err| err.to_string())
        .and_then(|config| {
            let repaint = config.position_interval();
            build_controller(&config)
                .map(|controller| (controller, repaint))
                .map_err(|err| err.to_string())
        });
    if let Err(err) = &startup {
        tracing::error!("Startup failed: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("Ayat")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(960.0, 720.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Ayat",
        native_options,
        Box::new(move |_cc| match startup {
            Ok((controller, repaint)) => Ok(Box::new(AyatApp::new(controller, repaint))),
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start Ayat");
                ui.label(&self.message);
            });
        });
    }
}
