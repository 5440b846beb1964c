//! Marker visibility filter

use super::clock::SimulatedTime;
use super::records::{LngLat, MarkerRecord};

/// Markers whose window contains `time`, in input order.
///
/// Recomputed from scratch on every call. `instant_tolerance` widens
/// single-timestamp windows; `0.0` keeps them exact.
pub fn visible_markers(markers: &[MarkerRecord], time: SimulatedTime, instant_tolerance: f64) -> Vec<&MarkerRecord> {
    let now = time.minutes();
    markers
        .iter()
        .filter(|m| m.window.contains(now, instant_tolerance))
        .collect()
}

/// Positions of the visible markers, as handed to the scatter layer
pub fn visible_positions(markers: &[MarkerRecord], time: SimulatedTime, instant_tolerance: f64) -> Vec<LngLat> {
    visible_markers(markers, time, instant_tolerance)
        .into_iter()
        .map(|m| m.position)
        .collect()
}
