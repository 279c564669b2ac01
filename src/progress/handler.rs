//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while the compile pipeline runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Pipeline started
    Started { mapped_root: String },

    /// A phase is about to run
    PhaseStarted { phase: String },

    /// A phase finished successfully
    PhaseComplete { phase: String, duration: Duration },

    /// The build command is being invoked
    BuildAttemptStarted { attempt: u32, max_attempts: u32 },

    /// The build command failed or could not be started
    BuildAttemptFailed {
        attempt: u32,
        max_attempts: u32,
        reason: String,
    },

    /// Artifacts collected and the pipeline is done
    Completed {
        results_dir: String,
        total_time: Duration,
    },

    /// Pipeline stopped on an error
    Failed { error: String },
}

/// Trait for handling progress events during a compile
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}
