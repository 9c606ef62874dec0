//! egui renderer for the verse player window.

use std::time::Duration;

use eframe::egui::{self, Color32, Frame, Margin, RichText, load::SizedTexture};

use crate::commands::{self, Command};

use super::images::VerseImageCache;
use super::startup::DesktopController;

/// Smallest window size that keeps the controls readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(640.0, 480.0);
const IDLE_REPAINT: Duration = Duration::from_millis(500);

/// Renders the player using the shared controller state.
pub struct AyatApp {
    controller: DesktopController,
    images: VerseImageCache,
    repaint_interval: Duration,
    visuals_set: bool,
}

impl AyatApp {
    pub fn new(controller: DesktopController, repaint_interval: Duration) -> Self {
        Self {
            controller,
            images: VerseImageCache::default(),
            repaint_interval,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn process_hotkeys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            if let egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } = event
                && let Some(command) = commands::command_for_key(key, modifiers)
            {
                self.controller.handle(command);
            }
        }
    }

    fn render_selectors(&self, ctx: &egui::Context, pending: &mut Vec<Command>) {
        egui::TopBottomPanel::top("selectors")
            .frame(Frame::new().inner_margin(Margin::symmetric(8, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let current = self.controller.current_surah();
                    let current_number = current.map(|surah| surah.number);
                    let selected = current
                        .map(|surah| format!("{}. {}", surah.number, surah.name))
                        .unwrap_or_default();
                    ui.label("Surah");
                    egui::ComboBox::from_id_salt("surah_select")
                        .width(200.0)
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for surah in self.controller.surahs() {
                                let label = format!("{}. {}", surah.number, surah.name);
                                if ui
                                    .selectable_label(current_number == Some(surah.number), label)
                                    .clicked()
                                {
                                    pending.push(Command::SelectSurah(surah.number));
                                }
                            }
                        });

                    let verse = self.controller.sequencer().current_verse();
                    ui.label("Ayah");
                    egui::ComboBox::from_id_salt("aya_select")
                        .width(80.0)
                        .selected_text(verse.aya_number.to_string())
                        .show_ui(ui, |ui| {
                            let Some(surah) = current else {
                                return;
                            };
                            for aya in &surah.aya_numbers {
                                if ui
                                    .selectable_label(*aya == verse.aya_number, aya.to_string())
                                    .clicked()
                                {
                                    pending.push(Command::SelectAya {
                                        sura: surah.number,
                                        aya: *aya,
                                    });
                                }
                            }
                        });
                });
            });
    }

    fn render_controls(&self, ctx: &egui::Context, pending: &mut Vec<Command>) {
        egui::TopBottomPanel::bottom("controls")
            .frame(Frame::new().inner_margin(Margin::symmetric(8, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (text, command) in [
                        ("⏮ Previous", Command::Previous),
                        ("▶ Play", Command::Play),
                        ("⏸ Pause", Command::Pause),
                        ("Next ⏭", Command::Next),
                    ] {
                        if command_button(ui, text, command) {
                            pending.push(command);
                        }
                    }
                    ui.separator();

                    let mut preview = self.controller.preview_mode();
                    if ui
                        .checkbox(&mut preview, "Play beginning of aya")
                        .on_hover_text("P")
                        .changed()
                    {
                        pending.push(Command::TogglePreview);
                    }
                    ui.separator();

                    if command_button(ui, "−", Command::SpeedDown) {
                        pending.push(Command::SpeedDown);
                    }
                    ui.label(self.controller.speed_label());
                    if command_button(ui, "+", Command::SpeedUp) {
                        pending.push(Command::SpeedUp);
                    }
                });
            });
    }

    fn render_status(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(Color32::from_rgb(0, 0, 0))
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.status();
                ui.horizontal(|ui| {
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).strong());
                    ui.separator();
                    ui.label(status.text.as_str());
                    if let Some(notice) = &status.notice {
                        ui.separator();
                        ui.label(RichText::new(notice).color(Color32::from_rgb(200, 128, 96)));
                    }
                    if let Some(error) = self.images.error() {
                        ui.separator();
                        ui.label(RichText::new(error).color(Color32::from_rgb(200, 128, 96)));
                    }
                });
            });
    }

    fn render_verse(&mut self, ctx: &egui::Context) {
        let path = self
            .controller
            .sequencer()
            .current_verse()
            .image_path
            .clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            ui.centered_and_justified(|ui| match self.images.texture_for(ctx, &path) {
                Some(texture) => {
                    ui.add(
                        egui::Image::from_texture(SizedTexture::from_handle(texture))
                            .max_size(available)
                            .maintain_aspect_ratio(true),
                    );
                }
                None => {
                    ui.label(path.display().to_string());
                }
            });
        });
    }
}

/// Button with the command's hotkey as tooltip. Returns true when clicked.
fn command_button(ui: &mut egui::Ui, text: &str, command: Command) -> bool {
    let mut response = ui.button(text);
    if let Some(gesture) = commands::gesture_for(command) {
        response = response.on_hover_text(gesture.label());
    }
    response.clicked()
}

impl eframe::App for AyatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.process_hotkeys(ctx);
        let playing = self.controller.tick();

        let mut pending = Vec::new();
        self.render_selectors(ctx, &mut pending);
        self.render_status(ctx);
        self.render_controls(ctx, &mut pending);
        self.render_verse(ctx);
        for command in pending {
            self.controller.handle(command);
        }

        ctx.request_repaint_after(if playing {
            self.repaint_interval
        } else {
            IDLE_REPAINT
        });
    }
}
