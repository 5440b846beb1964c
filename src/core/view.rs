//! Camera pose and Web Mercator projection

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::records::LngLat;

/// World width in pixels at zoom 0 (512 px tiles)
pub const WORLD_SIZE_PX: f64 = 512.0;
/// Web Mercator latitude limit
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Equatorial circumference in meters
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;

/// Initial camera for the map surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        // Seoul City Hall
        Self {
            longitude: 126.9779692,
            latitude: 37.566535,
            zoom: 9.5,
            pitch: 30.0,
            bearing: 0.0,
        }
    }
}

impl ViewState {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::out_of_range("view.longitude", self.longitude, "-180..=180"));
        }
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.latitude) {
            return Err(ConfigError::out_of_range("view.latitude", self.latitude, "-85.05..=85.05"));
        }
        if !(0.0..=24.0).contains(&self.zoom) {
            return Err(ConfigError::out_of_range("view.zoom", self.zoom, "0..=24"));
        }
        if !(0.0..=85.0).contains(&self.pitch) {
            return Err(ConfigError::out_of_range("view.pitch", self.pitch, "0..=85"));
        }
        if !self.bearing.is_finite() {
            return Err(ConfigError::out_of_range("view.bearing", self.bearing, "finite"));
        }
        Ok(())
    }

    /// Projected map units per screen pixel at this zoom
    pub fn units_per_px(&self) -> f64 {
        360.0 / (WORLD_SIZE_PX * 2f64.powf(self.zoom))
    }

    /// Ground meters covered by one screen pixel at the camera center
    pub fn meters_per_px(&self) -> f64 {
        EARTH_CIRCUMFERENCE_M * self.latitude.to_radians().cos() / (WORLD_SIZE_PX * 2f64.powf(self.zoom))
    }

    /// Projected rectangle `(min, max)` visible in a `width_px` x `height_px`
    /// viewport looking straight down at the camera center.
    pub fn plot_bounds(&self, width_px: f64, height_px: f64) -> ([f64; 2], [f64; 2]) {
        let [cx, cy] = mercator([self.longitude, self.latitude]);
        let half_w = width_px.max(1.0) * self.units_per_px() / 2.0;
        let half_h = height_px.max(1.0) * self.units_per_px() / 2.0;
        ([cx - half_w, cy - half_h], [cx + half_w, cy + half_h])
    }
}

/// Web Mercator with both axes in degree-like units: x is longitude, y is
/// the Mercator-stretched latitude. Equal scale on both axes.
pub fn mercator(p: LngLat) -> [f64; 2] {
    let lat = p[1].clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln().to_degrees();
    [p[0], y]
}

/// Inverse of [`mercator`]
pub fn inverse_mercator(xy: [f64; 2]) -> LngLat {
    let lat = (2.0 * xy[1].to_radians().exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    [xy[0], lat]
}
