//! Header bar with the simulated clock, counters and controls

use eframe::egui;
use crate::theme::colors;
use crate::time::now_seconds;
use super::TripsApp;

impl TripsApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        let (clock, trails, markers) = match &self.frame {
            Some(frame) => (frame.time.to_string(), frame.trails.len(), frame.markers.len()),
            None => ("--:--".to_string(), 0, 0),
        };

        ui.horizontal(|ui| {
            let settings_text = if self.show_settings { "Settings <<<" } else { "Settings >>>" };
            if ui.button(egui::RichText::new(settings_text)).clicked() {
                self.show_settings = !self.show_settings;
            }
            if ui.button(egui::RichText::new("Reset view")).clicked() {
                self.reset_view = true;
            }

            ui.add_space(10.0);

            ui.label(
                egui::RichText::new(format!("TIME : {}", clock))
                    .color(colors::CLOCK)
                    .monospace()
                    .strong(),
            );

            if let Some((first, last)) = self.trip_range {
                ui.label(
                    egui::RichText::new(format!("trips {}-{}", first, last))
                        .color(colors::TEXT_SECONDARY)
                        .monospace(),
                );
            }

            // RIGHT: stats (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(&self.config.basemap.style)
                        .color(colors::TEXT_MUTED)
                        .monospace(),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{} markers", markers))
                        .color(colors::TEXT_MUTED)
                        .monospace(),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{} trails", trails))
                        .color(colors::TEXT_MUTED)
                        .monospace(),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(colors::TEXT_SECONDARY)
                        .monospace(),
                );
            });
        });
    }
}

/// Frame rate over the last 60 frames
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
        }
    }

    pub fn tick(&mut self) {
        self.push(now_seconds());
    }

    fn push(&mut self, at_secs: f64) {
        self.frames.push(at_secs);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
