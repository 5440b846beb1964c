//! Self-rescheduling animation loop around the pure clock
//!
//! The loop asks a `FrameScheduler` for the next frame after every tick and
//! releases the pending request when cancelled or dropped.

use tracing::{debug, trace};

use super::clock::{AnimationClock, SimulatedTime};

/// Host facility that calls back on the next display refresh
pub trait FrameScheduler {
    type Handle;

    /// Ask for one more frame
    fn request_frame(&mut self) -> Self::Handle;

    /// Withdraw a frame request. Must be a no-op for a request that has
    /// already fired.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct AnimationLoop<S: FrameScheduler> {
    clock: AnimationClock,
    scheduler: S,
    pending: Option<S::Handle>,
    current: Option<SimulatedTime>,
    frames: u64,
    cancelled: bool,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    /// Idle until the first `on_frame`
    pub fn new(clock: AnimationClock, scheduler: S) -> Self {
        Self {
            clock,
            scheduler,
            pending: None,
            current: None,
            frames: 0,
            cancelled: false,
        }
    }

    /// Advance to `now_secs` and schedule the next frame.
    ///
    /// Returns `None` once the loop is cancelled.
    pub fn on_frame(&mut self, now_secs: f64) -> Option<SimulatedTime> {
        if self.cancelled {
            return None;
        }
        // Withdraw any request still outstanding so at most one is in flight
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        let time = self.clock.tick(now_secs);
        self.current = Some(time);
        self.frames += 1;
        self.pending = Some(self.scheduler.request_frame());
        trace!(frame = self.frames, time = time.minutes(), "Animation frame");
        Some(time)
    }

    /// Stop rescheduling and release the pending frame request
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        debug!(frames = self.frames, "Animation loop cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Time computed by the latest frame
    pub fn current(&self) -> Option<SimulatedTime> {
        self.current
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Swap the clock parameters; takes effect on the next frame
    pub fn set_clock(&mut self, clock: AnimationClock) {
        self.clock = clock;
    }
}

impl<S: FrameScheduler> Drop for AnimationLoop<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records requests and cancellations; handles are sequence numbers
    #[derive(Clone, Default)]
    struct Recorder {
        requested: Rc<RefCell<Vec<u32>>>,
        cancelled: Rc<RefCell<Vec<u32>>>,
    }

    impl FrameScheduler for Recorder {
        type Handle = u32;

        fn request_frame(&mut self) -> u32 {
            let mut requested = self.requested.borrow_mut();
            let id = requested.len() as u32 + 1;
            requested.push(id);
            id
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.borrow_mut().push(handle);
        }
    }

    #[test]
    fn idle_until_first_frame() {
        let rec = Recorder::default();
        let anim = AnimationLoop::new(AnimationClock::default(), rec.clone());
        assert_eq!(anim.current(), None);
        assert!(rec.requested.borrow().is_empty());
    }

    #[test]
    fn each_frame_schedules_the_next() {
        let rec = Recorder::default();
        let mut anim = AnimationLoop::new(AnimationClock::default(), rec.clone());
        assert_eq!(anim.on_frame(0.0), Some(SimulatedTime(420.0)));
        assert_eq!(anim.on_frame(51.0), Some(SimulatedTime(930.0)));
        assert_eq!(*rec.requested.borrow(), vec![1, 2]);
        assert_eq!(anim.current(), Some(SimulatedTime(930.0)));
        assert_eq!(anim.frames(), 2);
    }

    #[test]
    fn cancel_releases_pending_and_stops() {
        let rec = Recorder::default();
        let mut anim = AnimationLoop::new(AnimationClock::default(), rec.clone());
        anim.on_frame(1.0);
        anim.on_frame(2.0);
        anim.cancel();
        assert_eq!(*rec.cancelled.borrow(), vec![1, 2]);
        assert!(anim.is_cancelled());
        assert_eq!(anim.on_frame(3.0), None);
        assert_eq!(rec.requested.borrow().len(), 2);
        // Idempotent
        anim.cancel();
        assert_eq!(rec.cancelled.borrow().len(), 2);
    }

    #[test]
    fn at_most_one_request_outstanding() {
        let rec = Recorder::default();
        let mut anim = AnimationLoop::new(AnimationClock::default(), rec.clone());
        anim.on_frame(1.0);
        anim.on_frame(1.001);
        anim.on_frame(1.002);
        assert_eq!(*rec.requested.borrow(), vec![1, 2, 3]);
        assert_eq!(*rec.cancelled.borrow(), vec![1, 2]);
    }

    #[test]
    fn cancel_before_start_cancels_nothing() {
        let rec = Recorder::default();
        let mut anim = AnimationLoop::new(AnimationClock::default(), rec.clone());
        anim.cancel();
        assert!(rec.cancelled.borrow().is_empty());
        assert_eq!(anim.on_frame(0.0), None);
    }

    #[test]
    fn drop_releases_pending_frame() {
        let rec = Recorder::default();
        {
            let mut anim = AnimationLoop::new(AnimationClock::default(), rec.clone());
            anim.on_frame(10.0);
        }
        assert_eq!(*rec.cancelled.borrow(), vec![1]);
    }

    #[test]
    fn unwinding_releases_pending_frame() {
        let rec = Recorder::default();
        let inner = rec.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let mut anim = AnimationLoop::new(AnimationClock::default(), inner);
            anim.on_frame(10.0);
            panic!("view torn down");
        }));
        assert!(result.is_err());
        assert_eq!(*rec.cancelled.borrow(), vec![1]);
    }

    #[test]
    fn new_clock_applies_on_next_frame() {
        let rec = Recorder::default();
        let mut anim = AnimationLoop::new(AnimationClock::default(), rec);
        anim.on_frame(5.0);
        anim.set_clock(AnimationClock::new(600.0, 60.0, 0.0).unwrap());
        assert_eq!(anim.on_frame(5.0), Some(SimulatedTime(300.0)));
    }
}
