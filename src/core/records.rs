//! Trip and marker records
//!
//! `Raw*` types mirror the JSON layout of the bundled datasets. They are
//! converted into the validated record types once at load time, so the
//! per-frame code never sees a record that breaks an invariant.

use serde::{Deserialize, Serialize};

/// `[longitude, latitude]` in degrees
pub type LngLat = [f64; 2];

/// Trip as stored in the dataset file
#[derive(Clone, Debug, Deserialize)]
pub struct RawTrip {
    #[serde(default)]
    pub vendor: Option<u32>,
    #[serde(default)]
    pub path: Option<Vec<LngLat>>,
    #[serde(default)]
    pub timestamps: Option<Vec<f64>>,
}

/// Marker as stored in the dataset file
#[derive(Clone, Debug, Deserialize)]
pub struct RawMarker {
    #[serde(default)]
    pub path: Option<LngLat>,
    #[serde(default)]
    pub timestamp: Option<Vec<f64>>,
}

/// A vehicle trip: positions with one timestamp per vertex.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripRecord {
    pub vendor: u32,
    path: Vec<LngLat>,
    timestamps: Vec<f64>,
}

impl TripRecord {
    /// Build a trip, checking that `path` and `timestamps` line up.
    pub fn new(vendor: u32, path: Vec<LngLat>, timestamps: Vec<f64>) -> Result<Self, String> {
        if path.is_empty() {
            return Err("path is empty".into());
        }
        if path.len() != timestamps.len() {
            return Err(format!(
                "path has {} vertices but timestamps has {} entries",
                path.len(),
                timestamps.len()
            ));
        }
        if let Some(i) = path.iter().position(|p| !valid_lng_lat(p)) {
            return Err(format!("vertex {} has invalid coordinates {:?}", i, path[i]));
        }
        if let Some(i) = timestamps.iter().position(|t| !t.is_finite()) {
            return Err(format!("timestamp {} is not finite", i));
        }
        if let Some(i) = timestamps.windows(2).position(|w| w[1] < w[0]) {
            return Err(format!(
                "timestamps decrease at vertex {} ({} -> {})",
                i + 1,
                timestamps[i],
                timestamps[i + 1]
            ));
        }
        Ok(Self {
            vendor,
            path,
            timestamps,
        })
    }

    pub fn path(&self) -> &[LngLat] {
        &self.path
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// First and last timestamp
    pub fn time_span(&self) -> (f64, f64) {
        // Non-empty by construction
        (self.timestamps[0], self.timestamps[self.timestamps.len() - 1])
    }
}

impl TryFrom<RawTrip> for TripRecord {
    type Error = String;

    fn try_from(raw: RawTrip) -> Result<Self, Self::Error> {
        let vendor = raw.vendor.ok_or("missing field `vendor`")?;
        let path = raw.path.ok_or("missing field `path`")?;
        let timestamps = raw.timestamps.ok_or("missing field `timestamps`")?;
        Self::new(vendor, path, timestamps)
    }
}

/// Simulated time window during which a marker is shown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerWindow {
    /// Single sample time: shown only at that instant
    Instant(f64),
    /// Shown for `start <= time <= end`
    Interval { start: f64, end: f64 },
}

impl MarkerWindow {
    /// Inclusive `(start, end)` bounds. `instant_tolerance` widens instant
    /// windows only.
    pub fn bounds(&self, instant_tolerance: f64) -> (f64, f64) {
        match *self {
            MarkerWindow::Instant(t) => (t - instant_tolerance, t + instant_tolerance),
            MarkerWindow::Interval { start, end } => (start, end),
        }
    }

    pub fn contains(&self, time: f64, instant_tolerance: f64) -> bool {
        let (start, end) = self.bounds(instant_tolerance);
        time >= start && time <= end
    }

    fn from_timestamps(ts: &[f64]) -> Result<Self, String> {
        if let Some(i) = ts.iter().position(|t| !t.is_finite()) {
            return Err(format!("timestamp {} is not finite", i));
        }
        match *ts {
            [t] => Ok(MarkerWindow::Instant(t)),
            [start, end] if start <= end => Ok(MarkerWindow::Interval { start, end }),
            [start, end] => Err(format!("window start {} is after end {}", start, end)),
            _ => Err(format!("expected 1 or 2 timestamps, got {}", ts.len())),
        }
    }
}

/// A point shown only during its window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerRecord {
    pub position: LngLat,
    pub window: MarkerWindow,
}

impl MarkerRecord {
    pub fn new(position: LngLat, window: MarkerWindow) -> Result<Self, String> {
        if !valid_lng_lat(&position) {
            return Err(format!("invalid coordinates {:?}", position));
        }
        if let MarkerWindow::Interval { start, end } = window {
            if !(start <= end) {
                return Err(format!("window start {} is after end {}", start, end));
            }
        }
        Ok(Self { position, window })
    }
}

impl TryFrom<RawMarker> for MarkerRecord {
    type Error = String;

    fn try_from(raw: RawMarker) -> Result<Self, Self::Error> {
        let position = raw.path.ok_or("missing field `path`")?;
        let timestamps = raw.timestamp.ok_or("missing field `timestamp`")?;
        let window = MarkerWindow::from_timestamps(&timestamps)?;
        Self::new(position, window)
    }
}

fn valid_lng_lat(p: &LngLat) -> bool {
    let [lng, lat] = *p;
    lng.is_finite() && lat.is_finite() && (-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_marker(json: &str) -> RawMarker {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn single_timestamp_is_instant() {
        let m = MarkerRecord::try_from(raw_marker(r#"{"path": [10, 20], "timestamp": [100]}"#)).unwrap();
        assert_eq!(m.window, MarkerWindow::Instant(100.0));
        assert_eq!(m.window.bounds(0.0), (100.0, 100.0));
    }

    #[test]
    fn two_timestamps_are_interval() {
        let m = MarkerRecord::try_from(raw_marker(r#"{"path": [10, 20], "timestamp": [100, 200]}"#)).unwrap();
        assert_eq!(m.window, MarkerWindow::Interval { start: 100.0, end: 200.0 });
        assert!(m.window.contains(150.0, 0.0));
        assert!(!m.window.contains(250.0, 0.0));
    }

    #[test]
    fn rejects_reversed_or_empty_windows() {
        assert!(MarkerRecord::try_from(raw_marker(r#"{"path": [10, 20], "timestamp": [200, 100]}"#)).is_err());
        assert!(MarkerRecord::try_from(raw_marker(r#"{"path": [10, 20], "timestamp": []}"#)).is_err());
        assert!(MarkerRecord::try_from(raw_marker(r#"{"path": [10, 20], "timestamp": [1, 2, 3]}"#)).is_err());
        assert!(MarkerRecord::try_from(raw_marker(r#"{"path": [10, 20]}"#)).is_err());
    }

    #[test]
    fn tolerance_only_widens_instants() {
        let instant = MarkerWindow::Instant(100.0);
        assert!(!instant.contains(100.4, 0.0));
        assert!(instant.contains(100.4, 0.5));
        let interval = MarkerWindow::Interval { start: 100.0, end: 200.0 };
        assert!(!interval.contains(200.4, 0.5));
    }

    #[test]
    fn trip_requires_matching_lengths() {
        let err = TripRecord::new(0, vec![[126.9, 37.5], [127.0, 37.6]], vec![420.0]).unwrap_err();
        assert!(err.contains("2 vertices"), "{}", err);
    }

    #[test]
    fn trip_requires_sorted_timestamps() {
        let err = TripRecord::new(1, vec![[126.9, 37.5], [127.0, 37.6]], vec![430.0, 420.0]).unwrap_err();
        assert!(err.contains("decrease"), "{}", err);
    }

    #[test]
    fn trip_rejects_bad_coordinates() {
        assert!(TripRecord::new(0, vec![[200.0, 37.5]], vec![420.0]).is_err());
        assert!(TripRecord::new(0, vec![], vec![]).is_err());
    }

    #[test]
    fn trip_from_raw_json() {
        let raw: RawTrip = serde_json::from_str(
            r#"{"vendor": 1, "path": [[126.97, 37.56], [126.98, 37.57]], "timestamps": [421.5, 423.0]}"#,
        )
        .unwrap();
        let trip = TripRecord::try_from(raw).unwrap();
        assert_eq!(trip.vendor, 1);
        assert_eq!(trip.time_span(), (421.5, 423.0));
    }

    #[test]
    fn trip_missing_vendor() {
        let raw: RawTrip = serde_json::from_str(r#"{"path": [[126.97, 37.56]], "timestamps": [421.5]}"#).unwrap();
        assert_eq!(TripRecord::try_from(raw).unwrap_err(), "missing field `vendor`");
    }
}
