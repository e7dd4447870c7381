//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while a containerization plan is assembled
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started { project: String },

    PhaseStarted { phase: String },

    PhaseComplete { phase: String, duration: Duration },

    /// A resolver decision was applied to an upstream task
    MutationApplied { task: String, description: String },

    Completed { edges: usize, total_time: Duration },

    Failed { phase: String, error: String },
}

pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
