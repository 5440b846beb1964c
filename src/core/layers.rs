//! Layer descriptors handed to the rendering surface
//!
//! Plain serializable data: the surface decides how to draw each layer.

use serde::Serialize;

use super::records::LngLat;
use super::theme::{AmbientLight, Material, PointLight, Rgb};
use super::trail::Trail;

/// Trips layer settings
pub const TRIPS_OPACITY: f32 = 0.3;
pub const TRIPS_WIDTH_MIN_PX: f32 = 5.0;

/// Scatter layer settings
pub const MARKER_COLOR: Rgb = [255, 255, 255];
pub const MARKER_RADIUS_M: f32 = 25.0;
pub const MARKER_OPACITY: f32 = 0.9;
pub const MARKER_RADIUS_MIN_PX: f32 = 3.0;
pub const MARKER_RADIUS_MAX_PX: f32 = 30.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum LayerDescriptor {
    /// Ground plane under everything else, only needed for shadows
    Polygon {
        id: &'static str,
        polygon: Vec<LngLat>,
        stroked: bool,
        fill_color: [u8; 4],
    },
    Trips {
        id: &'static str,
        trails: Vec<TrailDescriptor>,
        opacity: f32,
        width_min_px: f32,
        rounded: bool,
        trail_length: f64,
        current_time: f64,
        shadow_enabled: bool,
    },
    Scatterplot {
        id: &'static str,
        positions: Vec<LngLat>,
        color: Rgb,
        radius_m: f32,
        opacity: f32,
        pickable: bool,
        radius_min_px: f32,
        radius_max_px: f32,
    },
}

impl LayerDescriptor {
    pub fn id(&self) -> &'static str {
        match self {
            LayerDescriptor::Polygon { id, .. }
            | LayerDescriptor::Trips { id, .. }
            | LayerDescriptor::Scatterplot { id, .. } => id,
        }
    }
}

/// One trail with its resolved color
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrailDescriptor {
    pub color: Rgb,
    #[serde(flatten)]
    pub trail: Trail,
}

/// Scene-wide lighting applied by the surface
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Effects {
    pub ambient_light: AmbientLight,
    pub point_light: PointLight,
    pub material: Material,
}
