//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { project } => {
                info!(project = %project, "Planning containerization");
            }
            ProgressEvent::PhaseStarted { phase } => {
                debug!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                debug!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::MutationApplied { task, description } => {
                info!(task = %task, mutation = %description, "Adjusted upstream task");
            }
            ProgressEvent::Completed { edges, total_time } => {
                info!(
                    edges,
                    total_time_ms = total_time.as_millis(),
                    "Containerization plan complete"
                );
            }
            ProgressEvent::Failed { phase, error } => {
                warn!(phase = %phase, error = %error, "Planning failed");
            }
        }
    }
}
