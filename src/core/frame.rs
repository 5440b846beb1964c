//! Per-frame composition
//!
//! `compose_frame` is the render function: it takes the latest simulated
//! time and returns everything the surface draws for that frame.

use serde::Serialize;
use tracing::trace;

use super::clock::SimulatedTime;
use super::config::Config;
use super::dataset::Dataset;
use super::filter::visible_positions;
use super::layers::{
    Effects, LayerDescriptor, TrailDescriptor, MARKER_COLOR, MARKER_OPACITY, MARKER_RADIUS_M,
    MARKER_RADIUS_MAX_PX, MARKER_RADIUS_MIN_PX, TRIPS_OPACITY, TRIPS_WIDTH_MIN_PX,
};
use super::records::LngLat;
use super::theme::Theme;
use super::trail::{active_trails, Trail};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSettings {
    pub trail_length: f64,
    pub instant_tolerance: f64,
}

impl From<&Config> for FrameSettings {
    fn from(config: &Config) -> Self {
        Self {
            trail_length: config.trail_length,
            instant_tolerance: config.instant_tolerance,
        }
    }
}

/// Drawable content of one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub time: SimulatedTime,
    pub trails: Vec<Trail>,
    pub markers: Vec<LngLat>,
    pub settings: FrameSettings,
}

pub fn compose_frame(dataset: &Dataset, time: SimulatedTime, settings: FrameSettings) -> Frame {
    let trails = active_trails(&dataset.trips, time, settings.trail_length);
    let markers = visible_positions(&dataset.markers, time, settings.instant_tolerance);
    trace!(time = time.minutes(), trails = trails.len(), markers = markers.len(), "Frame composed");
    Frame {
        time,
        trails,
        markers,
        settings,
    }
}

impl Frame {
    /// Layers bottom to top: ground, trips, markers
    pub fn layers(&self, theme: &Theme, ground: &[LngLat]) -> Vec<LayerDescriptor> {
        let trails = self
            .trails
            .iter()
            .map(|trail| TrailDescriptor {
                color: theme.trail_color(trail.vendor),
                trail: trail.clone(),
            })
            .collect();

        vec![
            LayerDescriptor::Polygon {
                id: "ground",
                polygon: ground.to_vec(),
                stroked: false,
                fill_color: [0, 0, 0, 0],
            },
            LayerDescriptor::Trips {
                id: "trips",
                trails,
                opacity: TRIPS_OPACITY,
                width_min_px: TRIPS_WIDTH_MIN_PX,
                rounded: true,
                trail_length: self.settings.trail_length,
                current_time: self.time.minutes(),
                shadow_enabled: false,
            },
            LayerDescriptor::Scatterplot {
                id: "scatterplot",
                positions: self.markers.clone(),
                color: MARKER_COLOR,
                radius_m: MARKER_RADIUS_M,
                opacity: MARKER_OPACITY,
                pickable: false,
                radius_min_px: MARKER_RADIUS_MIN_PX,
                radius_max_px: MARKER_RADIUS_MAX_PX,
            },
        ]
    }
}

/// Serializable picture of one frame, written by the CLI
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub time: f64,
    pub clock: String,
    pub map_style: String,
    pub effects: Effects,
    pub layers: Vec<LayerDescriptor>,
}

impl Snapshot {
    pub fn new(frame: &Frame, config: &Config) -> Self {
        let theme = &config.theme;
        Self {
            time: frame.time.minutes(),
            clock: frame.time.to_string(),
            map_style: config.basemap.style.clone(),
            effects: Effects {
                ambient_light: theme.ambient_light.clone(),
                point_light: theme.point_light.clone(),
                material: theme.material.clone(),
            },
            layers: frame.layers(theme, &config.ground),
        }
    }
}
