use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use accretion_integrator::{Observer, TickSnapshot};

use super::on_interval;

/// Ends the run once a shared "keep running" flag is cleared.
///
/// The flag is only polled on interval boundaries, and the step that observes it
/// is always completed.
#[derive(Debug, Clone)]
pub struct StopSignal {
    running: Arc<AtomicBool>,
    interval_ticks: u64,
}

impl StopSignal {
    pub fn new(running: Arc<AtomicBool>, interval_ticks: u64) -> Self {
        Self {
            running,
            interval_ticks,
        }
    }

    /// Stop signal cleared by Ctrl-C. Only one handler may be installed per process.
    pub fn ctrlc(interval_ticks: u64) -> Result<Self, ctrlc::Error> {
        let running = Arc::new(AtomicBool::new(true));
        let handler_flag = Arc::clone(&running);
        ctrlc::set_handler(move || {
            handler_flag.store(false, Ordering::SeqCst);
        })?;
        Ok(Self::new(running, interval_ticks))
    }

    /// Shared flag; store `false` to request a stop.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }
}

impl Observer for StopSignal {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        if on_interval(snapshot, self.interval_ticks) && !self.running.load(Ordering::SeqCst) {
            log::info!("stop requested at iteration {}", snapshot.iteration);
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}
