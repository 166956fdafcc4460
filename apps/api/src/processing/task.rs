//! The running Processing view: a tokio task that ticks the simulator and,
//! on reaching 100%, performs the terminal action exactly once.
//!
//! Terminal action order:
//! 1. leave the tick loop and drop the interval (no further ticks possible)
//! 2. write the parsed resume document
//! 3. wait `navigate_delay`, then navigate to Templates
//!
//! Aborting the task (explicit `cancel` or dropping the handle) at any point
//! before step 2 means no document and no navigation.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info};

use super::fixture::sample_resume;
use super::{ProcessingStatus, ProcessingTiming, ProgressSimulator, Tick};
use crate::session::SessionState;
use crate::wizard::View;

/// Completion callback: receives the single navigation a finished run makes.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: View);
}

pub struct ProcessingTask {
    status: Arc<RwLock<ProcessingStatus>>,
    /// Set once the navigation has been made.
    finished_at: Arc<OnceLock<Instant>>,
    handle: JoinHandle<()>,
}

impl ProcessingTask {
    pub fn spawn(
        session: SessionState,
        timing: ProcessingTiming,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let simulator = ProgressSimulator::new(&timing);
        let status = Arc::new(RwLock::new(ProcessingStatus::from_simulator(&simulator)));
        let finished_at = Arc::new(OnceLock::new());
        let handle = tokio::spawn(drive(
            simulator,
            session,
            timing,
            status.clone(),
            finished_at.clone(),
            navigator,
        ));
        Self {
            status,
            finished_at,
            handle,
        }
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Time since the run navigated away, `None` while it is still running.
    pub fn finished_for(&self) -> Option<Duration> {
        self.finished_at.get().map(Instant::elapsed)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for ProcessingTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn publish(status: &RwLock<ProcessingStatus>, update: impl FnOnce(&mut ProcessingStatus)) {
    let mut guard = status.write().unwrap_or_else(PoisonError::into_inner);
    update(&mut guard);
}

async fn drive(
    mut simulator: ProgressSimulator,
    session: SessionState,
    timing: ProcessingTiming,
    status: Arc<RwLock<ProcessingStatus>>,
    finished_at: Arc<OnceLock<Instant>>,
    navigator: Arc<dyn Navigator>,
) {
    let profile = session.profile();
    info!(%profile, ticks = simulator.total_ticks(), "Processing started");

    let mut ticker = time::interval_at(Instant::now() + timing.tick, timing.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let outcome = simulator.tick();
        let snapshot = ProcessingStatus::from_simulator(&simulator);
        publish(&status, |s| *s = snapshot);
        match outcome {
            Tick::Advanced => continue,
            Tick::Completed => break,
            Tick::Idle => return,
        }
    }
    drop(ticker);

    match session.write_parsed_resume_once(&sample_resume()).await {
        Ok(true) => info!(%profile, "Parsed resume document written"),
        Ok(false) => info!(%profile, "Parsed resume document already present, kept"),
        Err(e) => error!(%profile, "Failed to write parsed resume document: {e}"),
    }

    time::sleep(timing.navigate_delay).await;
    publish(&status, |s| s.next = Some(View::Templates));
    navigator.navigate(View::Templates);
    let _ = finished_at.set(Instant::now());
}
