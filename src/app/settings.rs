//! Settings sidebar: animation speed, loop length, trail length, marker tolerance

use eframe::egui;
use crate::core::clock::{DEFAULT_ANIMATION_SPEED, DEFAULT_LOOP_LENGTH};
use crate::core::config::DEFAULT_TRAIL_LENGTH;
use crate::theme::colors;
use super::TripsApp;

impl TripsApp {
    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        let width = ctx.screen_rect().width() * 0.18;
        let mut clock_changed = false;

        egui::SidePanel::left("settings")
            .default_width(width)
            .min_width(240.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, colors::TEXT_MUTED.gamma_multiply(0.6)))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Clock:").color(colors::TEXT_MUTED));

                    let loop_secs = self.config.loop_length / self.config.animation_speed;
                    ui.label(
                        egui::RichText::new(format!(
                            "Speed: {:.0} min/s ({:.0}s loop)",
                            self.config.animation_speed, loop_secs
                        ))
                        .color(colors::TEXT_MUTED),
                    );
                    let full_width = ui.available_width();
                    ui.spacing_mut().slider_width = full_width;
                    let speed = ui.add(
                        egui::Slider::new(&mut self.config.animation_speed, 1.0..=120.0)
                            .logarithmic(true)
                            .clamping(egui::SliderClamping::Always)
                            .show_value(false),
                    );
                    if speed.double_clicked() {
                        self.config.animation_speed = DEFAULT_ANIMATION_SPEED;
                    }
                    clock_changed |= speed.changed() || speed.double_clicked();

                    ui.label(
                        egui::RichText::new(format!("Loop length: {:.0} min", self.config.loop_length))
                            .color(colors::TEXT_MUTED),
                    );
                    let length = ui.add(
                        egui::Slider::new(&mut self.config.loop_length, 60.0..=1440.0)
                            .step_by(30.0)
                            .clamping(egui::SliderClamping::Always)
                            .show_value(false),
                    );
                    if length.double_clicked() {
                        self.config.loop_length = DEFAULT_LOOP_LENGTH;
                    }
                    clock_changed |= length.changed() || length.double_clicked();
                });

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Layers:").color(colors::TEXT_MUTED));

                    ui.label(
                        egui::RichText::new(format!("Trail length: {:.1} min", self.config.trail_length))
                            .color(colors::TEXT_MUTED),
                    );
                    let trail = ui.add(
                        egui::Slider::new(&mut self.config.trail_length, 0.0..=30.0)
                            .clamping(egui::SliderClamping::Always)
                            .show_value(false),
                    );
                    if trail.double_clicked() {
                        self.config.trail_length = DEFAULT_TRAIL_LENGTH;
                    }

                    ui.label(
                        egui::RichText::new(format!(
                            "Single-time markers: ±{:.1} min",
                            self.config.instant_tolerance
                        ))
                        .color(colors::TEXT_MUTED),
                    );
                    ui.add(
                        egui::Slider::new(&mut self.config.instant_tolerance, 0.0..=10.0)
                            .clamping(egui::SliderClamping::Always)
                            .show_value(false),
                    );
                    if self.config.instant_tolerance == 0.0 {
                        ui.label(
                            egui::RichText::new("  Exact match: rarely visible")
                                .color(colors::TEXT_MUTED)
                                .small(),
                        );
                    }
                });
            });

        if clock_changed {
            self.apply_clock_settings();
        }
    }
}
