//! Animation clock - maps real wall-clock seconds to a simulated time of day
//!
//! The simulated value is derived purely from the real time passed in, so
//! the clock holds no state between ticks and can be restarted at any point.

use std::fmt;

use super::error::ConfigError;

/// Simulated minutes per loop (07:00 to 24:00)
pub const DEFAULT_LOOP_LENGTH: f64 = 1020.0;
/// Simulated minutes advanced per real second
pub const DEFAULT_ANIMATION_SPEED: f64 = 10.0;
/// Simulated minute the loop starts at (07:00)
pub const DEFAULT_START_OFFSET: f64 = 420.0;

/// Simulated time of day, in minutes since midnight.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct SimulatedTime(pub f64);

impl SimulatedTime {
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Hours and minutes as shown on the on-screen clock.
    ///
    /// Rounds to the nearest minute first, then wraps hours at 24.
    pub fn clock_face(self) -> (u32, u32) {
        let total = self.0.round().max(0.0) as u64;
        (((total / 60) % 24) as u32, (total % 60) as u32)
    }
}

impl fmt::Display for SimulatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.clock_face();
        write!(f, "{:02}:{:02}", h, m)
    }
}

/// Pure clock: `tick(real_seconds)` is a function of its argument only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    loop_length: f64,
    animation_speed: f64,
    start_offset: f64,
}

impl AnimationClock {
    pub fn new(loop_length: f64, animation_speed: f64, start_offset: f64) -> Result<Self, ConfigError> {
        if !(loop_length.is_finite() && loop_length > 0.0) {
            return Err(ConfigError::out_of_range("loop_length", loop_length, "> 0"));
        }
        if !(animation_speed.is_finite() && animation_speed > 0.0) {
            return Err(ConfigError::out_of_range("animation_speed", animation_speed, "> 0"));
        }
        if !start_offset.is_finite() {
            return Err(ConfigError::out_of_range("start_offset", start_offset, "finite"));
        }
        Ok(Self {
            loop_length,
            animation_speed,
            start_offset,
        })
    }

    pub fn loop_length(&self) -> f64 {
        self.loop_length
    }

    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// Real seconds for one full simulated loop
    pub fn loop_duration_secs(&self) -> f64 {
        self.loop_length / self.animation_speed
    }

    /// Simulated time at `real_seconds` (typically seconds since the Unix epoch).
    ///
    /// Result lies in `[start_offset, start_offset + loop_length)`.
    pub fn tick(&self, real_seconds: f64) -> SimulatedTime {
        let real_seconds = if real_seconds.is_finite() { real_seconds } else { 0.0 };
        let loop_secs = self.loop_duration_secs();
        let phase = real_seconds.rem_euclid(loop_secs) / loop_secs;
        // rem_euclid can round up to loop_secs for tiny negative inputs
        let phase = if phase >= 1.0 { 0.0 } else { phase };
        let time = phase * self.loop_length + self.start_offset;
        // The scaled sum can still round up onto the loop end
        if time >= self.start_offset + self.loop_length {
            return SimulatedTime(self.start_offset);
        }
        SimulatedTime(time)
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            loop_length: DEFAULT_LOOP_LENGTH,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            start_offset: DEFAULT_START_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_loop_is_102_seconds() {
        let clock = AnimationClock::default();
        assert_eq!(clock.loop_duration_secs(), 102.0);
    }

    #[test]
    fn starts_at_seven_and_reaches_half_loop() {
        let clock = AnimationClock::default();
        assert_eq!(clock.tick(0.0), SimulatedTime(420.0));
        assert_eq!(clock.tick(51.0), SimulatedTime(930.0));
        // Start of a later cycle at epoch scale
        assert_eq!(clock.tick(102.0 * 16_666_667.0), SimulatedTime(420.0));
    }

    #[test]
    fn stays_within_loop_window() {
        let clock = AnimationClock::default();
        let mut t = -250.0;
        while t < 1_000.0 {
            let sim = clock.tick(t).minutes();
            assert!((420.0..1440.0).contains(&sim), "t={} sim={}", t, sim);
            t += 0.37;
        }
    }

    #[test]
    fn just_below_loop_end_never_reaches_midnight() {
        let clock = AnimationClock::default();
        let mut t = clock.loop_duration_secs();
        for _ in 0..2000 {
            t = f64::from_bits(t.to_bits() - 1);
            let sim = clock.tick(t).minutes();
            assert!(sim < 1440.0, "t={} sim={}", t, sim);
        }
        for &t in &[-1e-300, -1e-17, -f64::EPSILON, -1e-12] {
            let sim = clock.tick(t).minutes();
            assert!((420.0..1440.0).contains(&sim), "t={} sim={}", t, sim);
        }
    }

    #[test]
    fn periodic_in_loop_duration() {
        let clock = AnimationClock::default();
        for &t in &[3.0, 17.5, 50.25, 99.0] {
            let a = clock.tick(t).minutes();
            let b = clock.tick(t + 102.0).minutes();
            assert!((a - b).abs() < 1e-9, "t={} a={} b={}", t, a, b);
        }
    }

    #[test]
    fn continuous_except_at_wrap() {
        let clock = AnimationClock::default();
        let step = 0.01;
        let max_jump = step * clock.animation_speed() + 1e-9;
        let mut prev = clock.tick(0.0).minutes();
        let mut wraps = 0;
        let mut t = step;
        while t < 102.0 * 2.0 {
            let cur = clock.tick(t).minutes();
            if cur < prev {
                wraps += 1;
            } else {
                assert!(cur - prev <= max_jump, "jump at t={}: {} -> {}", t, prev, cur);
            }
            prev = cur;
            t += step;
        }
        assert_eq!(wraps, 1);
    }

    #[test]
    fn custom_speed_changes_period() {
        let clock = AnimationClock::new(600.0, 60.0, 0.0).unwrap();
        assert_eq!(clock.loop_duration_secs(), 10.0);
        assert_eq!(clock.tick(5.0), SimulatedTime(300.0));
    }

    #[test]
    fn non_finite_input_maps_to_loop_start() {
        let clock = AnimationClock::default();
        assert_eq!(clock.tick(f64::NAN), SimulatedTime(420.0));
        assert_eq!(clock.tick(f64::INFINITY), SimulatedTime(420.0));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(AnimationClock::new(0.0, 10.0, 420.0).is_err());
        assert!(AnimationClock::new(1020.0, -1.0, 420.0).is_err());
        assert!(AnimationClock::new(f64::NAN, 10.0, 420.0).is_err());
        assert!(AnimationClock::new(1020.0, 10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn clock_face_rounds_and_wraps() {
        assert_eq!(SimulatedTime(930.0).clock_face(), (15, 30));
        assert_eq!(SimulatedTime(420.4).clock_face(), (7, 0));
        assert_eq!(SimulatedTime(1439.6).clock_face(), (0, 0));
        assert_eq!(SimulatedTime(930.0).to_string(), "15:30");
    }
}
