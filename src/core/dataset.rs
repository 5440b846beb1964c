//! Static trip and marker datasets
//!
//! Loaded once before the first frame and never mutated afterwards.

use std::borrow::Cow;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::config::Config;
use super::error::DatasetError;
use super::records::{MarkerRecord, RawMarker, RawTrip, TripRecord};

const BUNDLED_TRIPS: &str = include_str!("../../assets/trips.json");
const BUNDLED_MARKERS: &str = include_str!("../../assets/markers.json");

/// What to do with a record that fails validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Fail the whole load on the first invalid record
    #[default]
    Strict,
    /// Skip invalid records, log and count them
    Lenient,
}

/// Outcome counters for a dataset load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub trips: usize,
    pub markers: usize,
    pub skipped_trips: usize,
    pub skipped_markers: usize,
}

/// Decode one entry on its own so a badly typed field only affects that record
fn decode<R, T>(value: Value) -> Result<T, String>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = String>,
{
    serde_json::from_value::<R>(value)
        .map_err(|e| e.to_string())
        .and_then(T::try_from)
}

/// Markers file is either a list or an object keyed by marker id
fn keyed_markers(value: Value) -> Result<Vec<(String, Value)>, DatasetError> {
    match value {
        Value::Array(list) => Ok(list
            .into_iter()
            .enumerate()
            .map(|(i, m)| (format!("#{}", i), m))
            .collect()),
        Value::Object(map) => Ok(map.into_iter().map(|(k, m)| (format!("{:?}", k), m)).collect()),
        _ => Err(DatasetError::Shape {
            dataset: "markers",
            expected: "a list or an object keyed by marker id",
        }),
    }
}

/// Validated trips and markers
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub trips: Vec<TripRecord>,
    pub markers: Vec<MarkerRecord>,
    pub report: LoadReport,
}

impl Dataset {
    /// Parse and validate both datasets from JSON text.
    pub fn from_json(trips_json: &str, markers_json: &str, policy: LoadPolicy) -> Result<Self, DatasetError> {
        let raw_trips = match serde_json::from_str::<Value>(trips_json)
            .map_err(|source| DatasetError::Json { dataset: "trips", source })?
        {
            Value::Array(list) => list,
            _ => {
                return Err(DatasetError::Shape {
                    dataset: "trips",
                    expected: "a list of trips",
                })
            }
        };
        let raw_markers = keyed_markers(
            serde_json::from_str(markers_json).map_err(|source| DatasetError::Json { dataset: "markers", source })?,
        )?;

        let mut report = LoadReport::default();

        let mut trips = Vec::with_capacity(raw_trips.len());
        for (index, raw) in raw_trips.into_iter().enumerate() {
            match decode::<RawTrip, TripRecord>(raw) {
                Ok(trip) => trips.push(trip),
                Err(reason) if policy == LoadPolicy::Lenient => {
                    warn!(index, %reason, "Skipping invalid trip");
                    report.skipped_trips += 1;
                }
                Err(reason) => return Err(DatasetError::InvalidTrip { index, reason }),
            }
        }

        let mut markers = Vec::with_capacity(raw_markers.len());
        for (key, raw) in raw_markers {
            match decode::<RawMarker, MarkerRecord>(raw) {
                Ok(marker) => markers.push(marker),
                Err(reason) if policy == LoadPolicy::Lenient => {
                    warn!(%key, %reason, "Skipping invalid marker");
                    report.skipped_markers += 1;
                }
                Err(reason) => return Err(DatasetError::InvalidMarker { key, reason }),
            }
        }

        report.trips = trips.len();
        report.markers = markers.len();
        debug!(?report, "Dataset validated");

        Ok(Self {
            trips,
            markers,
            report,
        })
    }

    /// Datasets compiled into the binary
    pub fn bundled(policy: LoadPolicy) -> Result<Self, DatasetError> {
        let dataset = Self::from_json(BUNDLED_TRIPS, BUNDLED_MARKERS, policy)?;
        info!(
            trips = dataset.report.trips,
            markers = dataset.report.markers,
            "Loaded bundled datasets"
        );
        Ok(dataset)
    }

    /// Read both datasets from disk
    pub fn load(trips_path: &Path, markers_path: &Path, policy: LoadPolicy) -> Result<Self, DatasetError> {
        let trips_json = read(trips_path)?;
        let markers_json = read(markers_path)?;
        let dataset = Self::from_json(&trips_json, &markers_json, policy)?;
        info!(
            trips_path = %trips_path.display(),
            markers_path = %markers_path.display(),
            trips = dataset.report.trips,
            markers = dataset.report.markers,
            skipped = dataset.report.skipped_trips + dataset.report.skipped_markers,
            "Loaded datasets"
        );
        Ok(dataset)
    }

    /// Datasets named by `config`, falling back to the bundled ones
    pub fn from_config(config: &Config) -> Result<Self, DatasetError> {
        let policy = config.load_policy();
        match (&config.trips_path, &config.markers_path) {
            (None, None) => Self::bundled(policy),
            (Some(trips), Some(markers)) => Self::load(trips, markers, policy),
            (trips, markers) => {
                let trips_json = match trips {
                    Some(path) => Cow::Owned(read(path)?),
                    None => Cow::Borrowed(BUNDLED_TRIPS),
                };
                let markers_json = match markers {
                    Some(path) => Cow::Owned(read(path)?),
                    None => Cow::Borrowed(BUNDLED_MARKERS),
                };
                let dataset = Self::from_json(&trips_json, &markers_json, policy)?;
                info!(
                    trips = dataset.report.trips,
                    markers = dataset.report.markers,
                    bundled_trips = trips.is_none(),
                    "Loaded datasets"
                );
                Ok(dataset)
            }
        }
    }

    /// Earliest and latest trip timestamp, if there are any trips
    pub fn trip_time_range(&self) -> Option<(f64, f64)> {
        self.trips.iter().map(TripRecord::time_span).reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
    }
}

fn read(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::MarkerWindow;

    const TRIPS: &str = r#"[
        {"vendor": 0, "path": [[126.97, 37.56], [126.98, 37.57]], "timestamps": [430, 440]},
        {"vendor": 1, "path": [[127.01, 37.51], [127.02, 37.52], [127.03, 37.53]], "timestamps": [500, 505, 512]}
    ]"#;

    #[test]
    fn loads_keyed_markers() {
        let markers = r#"{
            "a": {"path": [126.97, 37.56], "timestamp": [100, 200]},
            "b": {"path": [126.99, 37.58], "timestamp": [150]}
        }"#;
        let ds = Dataset::from_json(TRIPS, markers, LoadPolicy::Strict).unwrap();
        assert_eq!(ds.trips.len(), 2);
        assert_eq!(ds.markers.len(), 2);
        assert_eq!(ds.markers[1].window, MarkerWindow::Instant(150.0));
        assert_eq!(ds.report.skipped_markers, 0);
    }

    #[test]
    fn loads_listed_markers() {
        let markers = r#"[{"path": [126.97, 37.56], "timestamp": [100, 200]}]"#;
        let ds = Dataset::from_json(TRIPS, markers, LoadPolicy::Strict).unwrap();
        assert_eq!(ds.markers.len(), 1);
    }

    #[test]
    fn strict_fails_on_first_bad_trip() {
        let trips = r#"[
            {"vendor": 0, "path": [[126.97, 37.56]], "timestamps": [430]},
            {"vendor": 0, "path": [[126.97, 37.56], [126.98, 37.57]], "timestamps": [430]}
        ]"#;
        let err = Dataset::from_json(trips, "[]", LoadPolicy::Strict).unwrap_err();
        match err {
            DatasetError::InvalidTrip { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn strict_names_bad_marker_key() {
        let markers = r#"{"m7": {"path": [126.97, 37.56], "timestamp": [300, 200]}}"#;
        let err = Dataset::from_json(TRIPS, markers, LoadPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("m7"), "{}", err);
    }

    #[test]
    fn lenient_skips_and_counts() {
        let markers = r#"[
            {"path": [126.97, 37.56], "timestamp": [100, 200]},
            {"path": [126.97, 37.56]},
            {"timestamp": [100]}
        ]"#;
        let trips = r#"[
            {"vendor": 0, "path": [[126.97, 37.56]], "timestamps": [430, 431]},
            {"vendor": 2, "path": [[126.97, 37.56]], "timestamps": [430]}
        ]"#;
        let ds = Dataset::from_json(trips, markers, LoadPolicy::Lenient).unwrap();
        assert_eq!(
            ds.report,
            LoadReport {
                trips: 1,
                markers: 1,
                skipped_trips: 1,
                skipped_markers: 2,
            }
        );
    }

    #[test]
    fn malformed_json_is_fatal_even_when_lenient() {
        let err = Dataset::from_json("[{", "[]", LoadPolicy::Lenient).unwrap_err();
        assert!(matches!(err, DatasetError::Json { dataset: "trips", .. }));
        let err = Dataset::from_json("[]", "{\"a\": ", LoadPolicy::Lenient).unwrap_err();
        assert!(matches!(err, DatasetError::Json { dataset: "markers", .. }));
    }

    #[test]
    fn wrong_top_level_shape_is_fatal() {
        let err = Dataset::from_json("[]", "42", LoadPolicy::Lenient).unwrap_err();
        assert!(matches!(err, DatasetError::Shape { dataset: "markers", .. }));
        let err = Dataset::from_json("{}", "[]", LoadPolicy::Lenient).unwrap_err();
        assert!(matches!(err, DatasetError::Shape { dataset: "trips", .. }));
    }

    #[test]
    fn lenient_skips_badly_typed_fields() {
        let markers = r#"{
            "a": {"path": [126.97, 37.56], "timestamp": [100, 200]},
            "b": {"path": [126.97, 37.56, 5.0], "timestamp": [100]},
            "c": {"path": [126.97, 37.56], "timestamp": [null]},
            "d": "not a marker"
        }"#;
        let trips = r#"[
            {"vendor": -1, "path": [[126.97, 37.56]], "timestamps": [430]},
            {"vendor": 0, "path": [[126.97, 37.56]], "timestamps": ["430"]},
            {"vendor": 1, "path": [[126.97, 37.56]], "timestamps": [430]}
        ]"#;
        let ds = Dataset::from_json(trips, markers, LoadPolicy::Lenient).unwrap();
        assert_eq!(
            ds.report,
            LoadReport {
                trips: 1,
                markers: 1,
                skipped_trips: 2,
                skipped_markers: 3,
            }
        );
        assert_eq!(ds.trips[0].vendor, 1);
    }

    #[test]
    fn strict_names_badly_typed_record() {
        let markers = r#"{
            "ok": {"path": [126.97, 37.56], "timestamp": [100, 200]},
            "m3": {"path": [126.97, 37.56, 5.0], "timestamp": [100]}
        }"#;
        match Dataset::from_json(TRIPS, markers, LoadPolicy::Strict).unwrap_err() {
            DatasetError::InvalidMarker { key, .. } => assert_eq!(key, "\"m3\""),
            other => panic!("unexpected error: {}", other),
        }
        let trips = r#"[{"vendor": -1, "path": [[126.97, 37.56]], "timestamps": [430]}]"#;
        match Dataset::from_json(trips, "[]", LoadPolicy::Strict).unwrap_err() {
            DatasetError::InvalidTrip { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("-1"), "{}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Dataset::load(
            Path::new("/nonexistent/trips.json"),
            Path::new("/nonexistent/markers.json"),
            LoadPolicy::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn bundled_datasets_are_valid() {
        let ds = Dataset::bundled(LoadPolicy::Strict).unwrap();
        assert!(!ds.trips.is_empty());
        assert!(!ds.markers.is_empty());
        let (first, last) = ds.trip_time_range().unwrap();
        assert!(first >= 420.0 && last <= 1440.0, "{} {}", first, last);
    }

    #[test]
    fn config_without_paths_uses_bundled() {
        let ds = Dataset::from_config(&Config::default()).unwrap();
        assert_eq!(ds.report, Dataset::bundled(LoadPolicy::Strict).unwrap().report);
    }

    #[test]
    fn config_with_missing_marker_file_fails() {
        let config = Config {
            markers_path: Some("/nonexistent/markers.json".into()),
            ..Config::default()
        };
        assert!(matches!(Dataset::from_config(&config), Err(DatasetError::Io { .. })));
    }

    #[test]
    fn trip_time_range_spans_all_trips() {
        let ds = Dataset::from_json(TRIPS, "[]", LoadPolicy::Strict).unwrap();
        assert_eq!(ds.trip_time_range(), Some((430.0, 512.0)));
        assert_eq!(Dataset::default().trip_time_range(), None);
    }
}
