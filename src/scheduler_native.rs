//! Tokio frame scheduler for the headless CLI
//!
//! Each frame request spawns a sleep task that signals the main loop over a
//! channel. Cancelling aborts the task before it fires.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::trace;

use crate::core::FrameScheduler;

pub struct TokioScheduler {
    interval: Duration,
    tx: UnboundedSender<()>,
}

impl TokioScheduler {
    /// Scheduler firing `frame_rate` times per second, plus the receiver the
    /// main loop waits on. Must be used inside a tokio runtime.
    pub fn new(frame_rate: f64) -> (Self, UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let interval = Duration::from_secs_f64(1.0 / frame_rate);
        (Self { interval, tx }, rx)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameScheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn request_frame(&mut self) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let interval = self.interval;
        tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            // Receiver gone means the loop already stopped
            let _ = tx.send(());
        })
    }

    fn cancel_frame(&mut self, handle: JoinHandle<()>) {
        trace!("Aborting pending frame");
        handle.abort();
    }
}
