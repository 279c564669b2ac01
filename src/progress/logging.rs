//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { mapped_root } => {
                info!(mapped = %mapped_root, "Starting sketch compilation");
            }
            ProgressEvent::PhaseStarted { phase } => {
                info!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                info!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::BuildAttemptStarted {
                attempt,
                max_attempts,
            } => {
                info!(
                    attempt = %format!("{}/{}", attempt, max_attempts),
                    "Attempting compilation"
                );
            }
            ProgressEvent::BuildAttemptFailed {
                attempt,
                max_attempts,
                reason,
            } => {
                warn!(
                    attempt = %format!("{}/{}", attempt, max_attempts),
                    reason = %reason,
                    "Compilation failed"
                );
            }
            ProgressEvent::Completed {
                results_dir,
                total_time,
            } => {
                info!(
                    results = %results_dir,
                    total_time_ms = total_time.as_millis(),
                    "Compilation process completed successfully"
                );
            }
            ProgressEvent::Failed { error } => {
                error!(error = %error, "Compilation process failed");
            }
        }
    }
}
