//! Platform-agnostic core - shared between the egui app and the CLI

pub mod animation;
pub mod clock;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod frame;
pub mod layers;
pub mod records;
pub mod theme;
pub mod trail;
pub mod view;

pub use animation::{AnimationLoop, FrameScheduler};
pub use clock::{AnimationClock, SimulatedTime};
pub use config::{Basemap, Config};
pub use dataset::{Dataset, LoadPolicy, LoadReport};
pub use error::{ConfigError, DatasetError};
pub use filter::{visible_markers, visible_positions};
pub use frame::{compose_frame, Frame, FrameSettings, Snapshot};
pub use layers::LayerDescriptor;
pub use records::{LngLat, MarkerRecord, MarkerWindow, TripRecord};
pub use theme::Theme;
pub use trail::{active_trails, trail_at, Trail, TrailPoint};
pub use view::{mercator, ViewState};
