//! egui map app
//!
//! Runs on both native and WASM. eframe owns the draw loop; the app asks it
//! for the next repaint through the animation loop and rebuilds the frame
//! from the latest simulated time on every update.

mod header;
mod map;
mod settings;

use eframe::egui;
use tracing::{error, info};

use crate::core::{
    compose_frame, AnimationLoop, Config, Dataset, DatasetError, Frame, FrameScheduler, FrameSettings,
    SimulatedTime,
};
use crate::theme::{colors, map_background, map_visuals};
use crate::time::epoch_seconds;

/// eframe repaint requests as a frame scheduler.
///
/// egui coalesces repaint requests, so there is nothing to withdraw on
/// cancel; the loop simply stops asking.
pub struct RepaintScheduler {
    ctx: egui::Context,
}

impl FrameScheduler for RepaintScheduler {
    type Handle = ();

    fn request_frame(&mut self) {
        self.ctx.request_repaint();
    }

    fn cancel_frame(&mut self, _handle: ()) {}
}

pub struct TripsApp {
    pub(crate) config: Config,
    pub(crate) dataset: Dataset,
    /// Load failure shown instead of the map
    pub(crate) load_error: Option<String>,
    pub(crate) animation: AnimationLoop<RepaintScheduler>,
    /// Latest composed frame
    pub(crate) frame: Option<Frame>,
    /// First and last trip timestamp in the dataset
    pub(crate) trip_range: Option<(SimulatedTime, SimulatedTime)>,
    pub(crate) fps_counter: header::FpsCounter,
    pub(crate) show_settings: bool,
    /// Snap the camera back to the configured view on the next paint
    pub(crate) reset_view: bool,
}

impl TripsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, dataset: Result<Dataset, DatasetError>) -> Self {
        cc.egui_ctx.set_visuals(map_visuals(&config.theme));

        let (dataset, load_error) = match dataset {
            Ok(dataset) => (dataset, None),
            Err(e) => {
                error!(error = %e, "Dataset load failed");
                (Dataset::default(), Some(e.to_string()))
            }
        };

        // Config was validated by the caller; fall back to defaults if not
        let clock = config.clock().unwrap_or_default();
        info!(
            loop_secs = clock.loop_duration_secs(),
            trips = dataset.trips.len(),
            markers = dataset.markers.len(),
            style = %config.basemap.style,
            token_set = config.basemap.access_token.is_some(),
            "Map app started"
        );

        let trip_range = dataset
            .trip_time_range()
            .map(|(first, last)| (SimulatedTime(first), SimulatedTime(last)));

        let scheduler = RepaintScheduler {
            ctx: cc.egui_ctx.clone(),
        };

        Self {
            config,
            dataset,
            load_error,
            animation: AnimationLoop::new(clock, scheduler),
            frame: None,
            trip_range,
            fps_counter: header::FpsCounter::new(),
            show_settings: false,
            reset_view: false,
        }
    }

    /// Rebuild the clock after a settings change
    pub(crate) fn apply_clock_settings(&mut self) {
        match self.config.clock() {
            Ok(clock) => {
                info!(
                    loop_length = clock.loop_length(),
                    animation_speed = clock.animation_speed(),
                    "Clock reconfigured"
                );
                self.animation.set_clock(clock);
            }
            Err(e) => error!(error = %e, "Rejected clock settings"),
        }
    }
}

impl eframe::App for TripsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.fps_counter.tick();

        if let Some(time) = self.animation.on_frame(epoch_seconds()) {
            let settings = FrameSettings::from(&self.config);
            self.frame = Some(compose_frame(&self.dataset, time, settings));
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(4.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        // Settings sidebar (must be shown before CentralPanel)
        if self.show_settings {
            self.render_settings(ctx);
        }

        let load_error = self.load_error.clone();
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(map_background(&self.config.theme)))
            .show(ctx, |ui| match load_error {
                Some(message) => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(format!("Failed to load datasets: {}", message))
                                .color(colors::CLOCK),
                        );
                    });
                }
                None => self.render_map(ui),
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.animation.cancel();
    }
}
