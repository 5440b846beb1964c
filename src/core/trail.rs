//! Trip trail projection
//!
//! A trail is the part of a trip driven during the last `trail_length`
//! simulated minutes. Points fade from 1.0 at the head to 0.0 at the tail.

use serde::Serialize;

use super::clock::SimulatedTime;
use super::records::{LngLat, TripRecord};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrailPoint {
    pub position: LngLat,
    /// 1.0 at the current time, 0.0 at `time - trail_length`
    pub fade: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trail {
    pub vendor: u32,
    pub points: Vec<TrailPoint>,
}

impl Trail {
    /// Current position of the vehicle
    pub fn head(&self) -> Option<LngLat> {
        self.points.last().map(|p| p.position)
    }
}

fn lerp(a: LngLat, b: LngLat, f: f64) -> LngLat {
    [a[0] + (b[0] - a[0]) * f, a[1] + (b[1] - a[1]) * f]
}

/// Position along segment `i -> i + 1` at time `t` (clamped to the segment)
fn position_at(path: &[LngLat], ts: &[f64], i: usize, t: f64) -> LngLat {
    let (t0, t1) = (ts[i], ts[i + 1]);
    if t1 <= t0 {
        return path[i + 1];
    }
    lerp(path[i], path[i + 1], ((t - t0) / (t1 - t0)).clamp(0.0, 1.0))
}

/// Visible trail of `trip` at `time`, or `None` when nothing is drawn.
pub fn trail_at(trip: &TripRecord, time: SimulatedTime, trail_length: f64) -> Option<Trail> {
    if !(trail_length > 0.0) {
        return None;
    }
    let now = time.minutes();
    let tail = now - trail_length;
    let path = trip.path();
    let ts = trip.timestamps();
    let (first, last) = trip.time_span();
    if now < first || tail > last {
        return None;
    }

    let fade = |t: f64| (1.0 - (now - t) / trail_length).clamp(0.0, 1.0) as f32;
    let mut points = Vec::new();

    // Entry point where the tail cuts into a segment
    if tail > first {
        if let Some(i) = ts.windows(2).position(|w| w[0] < tail && tail < w[1]) {
            points.push(TrailPoint {
                position: position_at(path, ts, i, tail),
                fade: 0.0,
            });
        }
    }

    for (i, (&p, &t)) in path.iter().zip(ts).enumerate() {
        if t < tail {
            continue;
        }
        if t > now {
            // Head cuts into segment i-1 -> i
            if i > 0 && ts[i - 1] < now {
                points.push(TrailPoint {
                    position: position_at(path, ts, i - 1, now),
                    fade: 1.0,
                });
            }
            break;
        }
        points.push(TrailPoint { position: p, fade: fade(t) });
    }

    if points.len() < 2 {
        return None;
    }
    Some(Trail {
        vendor: trip.vendor,
        points,
    })
}

/// Trails for every trip that has something visible at `time`
pub fn active_trails(trips: &[TripRecord], time: SimulatedTime, trail_length: f64) -> Vec<Trail> {
    trips
        .iter()
        .filter_map(|trip| trail_at(trip, time, trail_length))
        .collect()
}
