//! Processing step: a timed, monotonic progress driver that fabricates the
//! parsed resume document and then sends the user on to template selection.
//!
//! `simulator` holds the pure tick arithmetic, `task` runs it on a tokio
//! interval with a one-shot terminal action, and `registry` ties one task to
//! each profile's open Processing view.

use std::time::Duration;

use serde::Serialize;

pub mod fixture;
pub mod registry;
pub mod simulator;
pub mod task;

pub use registry::ProcessingRegistry;
pub use simulator::{ProgressSimulator, Tick};
pub use task::{Navigator, ProcessingTask};

use crate::wizard::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingTiming {
    /// Time from 0% to 100%.
    pub duration: Duration,
    /// Interval between progress ticks.
    pub tick: Duration,
    /// Pause between completion and navigation to Templates.
    pub navigate_delay: Duration,
}

impl Default for ProcessingTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(8000),
            tick: Duration::from_millis(100),
            navigate_delay: Duration::from_millis(1000),
        }
    }
}

/// Snapshot reported to the Processing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatus {
    pub progress: f64,
    pub step_index: usize,
    pub step_title: &'static str,
    pub step_description: &'static str,
    pub completed: bool,
    /// Set once the post-completion delay has elapsed.
    pub next: Option<View>,
}

impl ProcessingStatus {
    pub fn from_simulator(simulator: &ProgressSimulator) -> Self {
        let step = simulator.current_step();
        Self {
            progress: simulator.progress(),
            step_index: simulator.step_index(),
            step_title: step.title,
            step_description: step.description,
            completed: simulator.is_completed(),
            next: None,
        }
    }
}
