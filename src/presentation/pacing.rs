use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use accretion_integrator::{Observer, TickSnapshot};

use super::on_interval;

/// Holds the run to one frame per `frame` of wall-clock time.
///
/// Frame `n` is due at `start + n × frame`. Early frames sleep until they are due;
/// late frames are logged and the run carries on.
#[derive(Debug)]
pub struct Pacer {
    interval_ticks: u64,
    frame: Duration,
    start: Instant,
    late_frames: u64,
}

impl Pacer {
    pub fn new(interval_ticks: u64, frame: Duration) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            frame,
            start: Instant::now(),
            late_frames: 0,
        }
    }

    /// Frames that were already overdue when their interval came up.
    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    /// Offset from the start at which the frame covering `iteration` is due.
    ///
    /// Saturates at `Duration::MAX` rather than wrapping for very long runs.
    pub fn due_after(&self, iteration: u64) -> Duration {
        let frame_index = (iteration / self.interval_ticks) as f64;
        Duration::try_from_secs_f64(self.frame.as_secs_f64() * frame_index)
            .unwrap_or(Duration::MAX)
    }
}

impl Observer for Pacer {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        if !on_interval(snapshot, self.interval_ticks) {
            return ControlFlow::Continue(());
        }
        let target = self.due_after(snapshot.iteration);
        let elapsed = self.start.elapsed();
        match target.checked_sub(elapsed) {
            Some(wait) if !wait.is_zero() => std::thread::sleep(wait),
            _ => {
                self.late_frames += 1;
                log::warn!(
                    "rendering too slow: {:.3} s behind at iteration {}",
                    (elapsed - target).as_secs_f64(),
                    snapshot.iteration
                );
            }
        }
        ControlFlow::Continue(())
    }
}
