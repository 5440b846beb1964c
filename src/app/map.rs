//! Map panel: draws the frame's layer descriptors in Web Mercator space

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points, Polygon};

use crate::core::layers::{LayerDescriptor, TrailDescriptor};
use crate::core::view::{inverse_mercator, mercator};
use crate::theme::rgb_alpha;
use super::TripsApp;

impl TripsApp {
    pub(crate) fn render_map(&mut self, ui: &mut egui::Ui) {
        let layers = match &self.frame {
            Some(frame) => frame.layers(&self.config.theme, &self.config.ground),
            None => Vec::new(),
        };

        let size = ui.available_size();
        let view = self.config.view;
        let (min, max) = view.plot_bounds(size.x as f64, size.y as f64);
        let meters_per_px = view.meters_per_px();

        let mut plot = Plot::new("map")
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_background(false)
            .include_x(min[0])
            .include_x(max[0])
            .include_y(min[1])
            .include_y(max[1])
            .label_formatter(|_name, value| {
                let [lng, lat] = inverse_mercator([value.x, value.y]);
                format!("{:.5}, {:.5}", lng, lat)
            });
        if self.reset_view {
            plot = plot.reset();
            self.reset_view = false;
        }

        plot.show(ui, |plot_ui| {
            for layer in &layers {
                match layer {
                    LayerDescriptor::Polygon {
                        polygon,
                        fill_color,
                        stroked,
                        ..
                    } => {
                        let points: PlotPoints = polygon.iter().map(|&p| mercator(p)).collect();
                        let [r, g, b, a] = *fill_color;
                        let stroke = if *stroked {
                            egui::Stroke::new(1.0, egui::Color32::from_rgb(r, g, b))
                        } else {
                            egui::Stroke::NONE
                        };
                        plot_ui.polygon(
                            Polygon::new(points)
                                .fill_color(egui::Color32::from_rgba_unmultiplied(r, g, b, a))
                                .stroke(stroke),
                        );
                    }
                    LayerDescriptor::Trips {
                        trails,
                        opacity,
                        width_min_px,
                        ..
                    } => {
                        for trail in trails {
                            draw_trail(plot_ui, trail, *opacity, *width_min_px);
                        }
                    }
                    LayerDescriptor::Scatterplot {
                        positions,
                        color,
                        radius_m,
                        opacity,
                        radius_min_px,
                        radius_max_px,
                        ..
                    } => {
                        if positions.is_empty() {
                            continue;
                        }
                        let radius_px =
                            ((*radius_m as f64 / meters_per_px) as f32).clamp(*radius_min_px, *radius_max_px);
                        let points: PlotPoints = positions.iter().map(|&p| mercator(p)).collect();
                        plot_ui.points(
                            Points::new(points)
                                .radius(radius_px)
                                .color(rgb_alpha(*color, *opacity))
                                .filled(true),
                        );
                    }
                }
            }
        });
    }
}

/// One line per segment so the alpha can fade from tail to head, plus a
/// dot at the vehicle position
fn draw_trail(plot_ui: &mut egui_plot::PlotUi, trail: &TrailDescriptor, opacity: f32, width: f32) {
    for pair in trail.trail.points.windows(2) {
        let fade = (pair[0].fade + pair[1].fade) / 2.0;
        let segment: PlotPoints = pair.iter().map(|p| mercator(p.position)).collect();
        plot_ui.line(
            Line::new(segment)
                .color(rgb_alpha(trail.color, opacity * fade))
                .width(width),
        );
    }
    if let Some(head) = trail.trail.head() {
        plot_ui.points(
            Points::new(vec![mercator(head)])
                .radius(width / 2.0)
                .color(rgb_alpha(trail.color, opacity))
                .filled(true),
        );
    }
}
