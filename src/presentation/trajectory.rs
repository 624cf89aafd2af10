use std::ops::ControlFlow;

use accretion_export::telemetry::Sample;
use accretion_integrator::{Observer, TickSnapshot};

use super::on_interval;

/// Samples kept by [`TrajectoryRecorder::new`] before it starts thinning.
pub const DEFAULT_TRAJECTORY_CAPACITY: usize = 10_000;

/// Keeps one telemetry sample per interval for export and plotting.
///
/// Memory is bounded: when `capacity` samples are held, every other one is dropped
/// and the sampling interval doubles, so the kept samples stay evenly spaced.
#[derive(Debug)]
pub struct TrajectoryRecorder {
    interval_ticks: u64,
    capacity: usize,
    samples: Vec<Sample>,
}

impl TrajectoryRecorder {
    pub fn new(interval_ticks: u64) -> Self {
        Self::with_capacity(interval_ticks, DEFAULT_TRAJECTORY_CAPACITY)
    }

    /// Recorder holding at most `capacity` samples (never fewer than two).
    pub fn with_capacity(interval_ticks: u64, capacity: usize) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            capacity: capacity.max(2),
            samples: Vec::new(),
        }
    }

    /// Current sampling interval; grows each time the buffer is thinned.
    pub fn interval_ticks(&self) -> u64 {
        self.interval_ticks
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    fn thin(&mut self) {
        let mut position = 0usize;
        self.samples.retain(|_| {
            position += 1;
            position % 2 == 0
        });
        self.interval_ticks = self.interval_ticks.saturating_mul(2);
        log::debug!(
            "trajectory buffer full, sampling every {} ticks",
            self.interval_ticks
        );
    }
}

impl Observer for TrajectoryRecorder {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        if !on_interval(snapshot, self.interval_ticks) {
            return ControlFlow::Continue(());
        }
        if self.samples.len() >= self.capacity {
            self.thin();
            if !on_interval(snapshot, self.interval_ticks) {
                return ControlFlow::Continue(());
            }
        }
        self.samples.push(Sample::from(snapshot));
        ControlFlow::Continue(())
    }
}
