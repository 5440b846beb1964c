//! Platform-agnostic time sources
//!
//! `epoch_seconds` drives the animation clock; `now_seconds` is a monotonic
//! app-relative timer for frame statistics.

#[cfg(target_arch = "wasm32")]
pub fn epoch_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn epoch_seconds() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_after_2020() {
        assert!(epoch_seconds() > 1_577_836_800.0);
    }

    #[test]
    fn monotonic_timer_does_not_go_back() {
        let a = now_seconds();
        let b = now_seconds();
        assert!(b >= a);
    }
}
