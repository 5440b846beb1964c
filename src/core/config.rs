//! Runtime configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! A handful of settings can be overridden from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clock::{AnimationClock, DEFAULT_ANIMATION_SPEED, DEFAULT_LOOP_LENGTH, DEFAULT_START_OFFSET};
use super::dataset::LoadPolicy;
use super::error::ConfigError;
use super::records::LngLat;
use super::theme::Theme;
use super::view::ViewState;

pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/spear5306/ckzcz5m8w002814o2coz02sjc";
/// Simulated minutes of trail behind each vehicle
pub const DEFAULT_TRAIL_LENGTH: f64 = 2.0;
pub const DEFAULT_FRAME_RATE: f64 = 60.0;

/// Basemap style and access credential, handed to the rendering surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basemap {
    pub style: String,
    /// Never serialized back out
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
}

impl Default for Basemap {
    fn default() -> Self {
        Self {
            style: DEFAULT_MAP_STYLE.to_string(),
            access_token: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated minutes per loop
    pub loop_length: f64,
    /// Simulated minutes per real second
    pub animation_speed: f64,
    /// Simulated minute the loop starts at
    pub start_offset: f64,
    pub trail_length: f64,
    /// Half-width in minutes added around single-timestamp markers
    pub instant_tolerance: f64,
    /// Headless frame rate
    pub frame_rate: f64,
    pub view: ViewState,
    pub basemap: Basemap,
    pub theme: Theme,
    /// Ground polygon drawn under the trails
    pub ground: Vec<LngLat>,
    /// `None` uses the bundled dataset
    pub trips_path: Option<PathBuf>,
    pub markers_path: Option<PathBuf>,
    /// Skip invalid records instead of failing the load
    pub lenient: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loop_length: DEFAULT_LOOP_LENGTH,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            start_offset: DEFAULT_START_OFFSET,
            trail_length: DEFAULT_TRAIL_LENGTH,
            instant_tolerance: 0.0,
            frame_rate: DEFAULT_FRAME_RATE,
            view: ViewState::default(),
            basemap: Basemap::default(),
            theme: Theme::default(),
            ground: default_ground(),
            trips_path: None,
            markers_path: None,
            lenient: false,
        }
    }
}

/// Square of roughly 2 km around the default camera center
fn default_ground() -> Vec<LngLat> {
    let [lng, lat] = [126.9779692, 37.566535];
    vec![
        [lng - 0.01, lat - 0.01],
        [lng + 0.01, lat - 0.01],
        [lng + 0.01, lat + 0.01],
        [lng - 0.01, lat + 0.01],
    ]
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |var: &'static str| -> Result<Option<f64>, ConfigError> {
            match lookup(var) {
                Some(value) => value
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| ConfigError::BadEnv { var, value }),
                None => Ok(None),
            }
        };

        if let Some(v) = number("TRIPS_LOOP_LENGTH")? {
            self.loop_length = v;
        }
        if let Some(v) = number("TRIPS_ANIMATION_SPEED")? {
            self.animation_speed = v;
        }
        if let Some(v) = number("TRIPS_TRAIL_LENGTH")? {
            self.trail_length = v;
        }
        if let Some(path) = lookup("TRIPS_DATA") {
            self.trips_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("TRIPS_MARKERS") {
            self.markers_path = Some(PathBuf::from(path));
        }
        if let Some(token) = lookup("MAPBOX_TOKEN").filter(|t| !t.is_empty()) {
            self.basemap.access_token = Some(token);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clock()?;
        if !(self.trail_length.is_finite() && self.trail_length >= 0.0) {
            return Err(ConfigError::out_of_range("trail_length", self.trail_length, ">= 0"));
        }
        if !(self.instant_tolerance.is_finite() && self.instant_tolerance >= 0.0) {
            return Err(ConfigError::out_of_range("instant_tolerance", self.instant_tolerance, ">= 0"));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0 && self.frame_rate <= 240.0) {
            return Err(ConfigError::out_of_range("frame_rate", self.frame_rate, "0 < fps <= 240"));
        }
        self.view.validate()
    }

    pub fn clock(&self) -> Result<AnimationClock, ConfigError> {
        AnimationClock::new(self.loop_length, self.animation_speed, self.start_offset)
    }

    pub fn load_policy(&self) -> LoadPolicy {
        if self.lenient {
            LoadPolicy::Lenient
        } else {
            LoadPolicy::Strict
        }
    }
}
