use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use super::{Navigator, ProcessingStatus, ProcessingTask, ProcessingTiming};
use crate::session::SessionState;
use crate::wizard::View;

/// Logs the navigation; clients observe it through `ProcessingStatus::next`.
struct LogNavigator {
    profile: Uuid,
}

impl Navigator for LogNavigator {
    fn navigate(&self, to: View) {
        info!(profile = %self.profile, "Processing finished, navigating to {to}");
    }
}

/// How long a finished run stays visible to a polling client.
pub const FINISHED_RETENTION: Duration = Duration::from_secs(60);

/// One live Processing view per profile.
pub struct ProcessingRegistry {
    timing: ProcessingTiming,
    tasks: Mutex<HashMap<Uuid, ProcessingTask>>,
}

impl ProcessingRegistry {
    pub fn new(timing: ProcessingTiming) -> Self {
        Self {
            timing,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Enters the Processing view. Starts a run unless one is already open for
    /// this profile, in which case its current status is returned.
    pub fn enter(&self, session: &SessionState) -> ProcessingStatus {
        let profile = session.profile();
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        sweep(&mut tasks);
        if let Some(task) = tasks.get(&profile) {
            return task.status();
        }
        let task = ProcessingTask::spawn(
            session.clone(),
            self.timing,
            Arc::new(LogNavigator { profile }),
        );
        let status = task.status();
        tasks.insert(profile, task);
        status
    }

    /// Tears down the view, cancelling its run. Returns whether one was open.
    pub fn dispose(&self, profile: Uuid) -> bool {
        let removed = {
            let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            sweep(&mut tasks);
            tasks.remove(&profile)
        };
        match removed {
            Some(task) => {
                if !task.is_finished() {
                    info!(%profile, "Processing view disposed mid-run, cancelling");
                }
                task.cancel();
                true
            }
            None => false,
        }
    }

    /// Number of runs currently held, finished or not.
    pub fn open_runs(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Drops runs that finished more than `FINISHED_RETENTION` ago.
fn sweep(tasks: &mut HashMap<Uuid, ProcessingTask>) {
    let before = tasks.len();
    tasks.retain(|_, task| {
        task.finished_for()
            .map_or(true, |elapsed| elapsed < FINISHED_RETENTION)
    });
    let dropped = before - tasks.len();
    if dropped > 0 {
        info!(dropped, "Released finished processing runs");
    }
}
