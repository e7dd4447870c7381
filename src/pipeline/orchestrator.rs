use super::context::PlanContext;
use super::phase_trait::PlanPhase;
use super::phases::{
    apply::ApplyPhase, assemble::AssemblePhase, classify::ClassifyPhase,
    configure::ConfigurePhase, entrypoint::EntrypointPhase, image::ImagePhase,
    layers::LayersPhase, outputs::OutputsPhase, resolve::ResolvePhase,
};
use super::plan::ContainerizationPlan;
use crate::config::TinyJibConfig;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::project::load_manifest;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub struct PlanOrchestrator {
    progress_handler: Option<Box<dyn ProgressHandler>>,
}

impl PlanOrchestrator {
    pub fn new(progress_handler: Option<Box<dyn ProgressHandler>>) -> Self {
        Self { progress_handler }
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }

    fn phases() -> Vec<Box<dyn PlanPhase>> {
        vec![
            Box::new(ConfigurePhase),
            Box::new(ClassifyPhase),
            Box::new(ResolvePhase),
            Box::new(ApplyPhase),
            Box::new(LayersPhase),
            Box::new(EntrypointPhase),
            Box::new(ImagePhase),
            Box::new(OutputsPhase),
            Box::new(AssemblePhase),
        ]
    }

    pub fn execute(&self, context: &mut PlanContext) -> Result<ContainerizationPlan> {
        let start = Instant::now();
        info!(project = %context.project.name, "Starting containerization planning");
        self.emit(ProgressEvent::Started {
            project: context.project.name.clone(),
        });

        for phase in Self::phases() {
            let name = phase.name();
            self.emit(ProgressEvent::PhaseStarted {
                phase: name.to_string(),
            });

            let phase_start = Instant::now();
            let applied_before = context.applied.len();
            if let Err(e) = phase.execute(context) {
                self.emit(ProgressEvent::Failed {
                    phase: name.to_string(),
                    error: format!("{:#}", e),
                });
                return Err(e).with_context(|| format!("Phase {} failed", name));
            }

            for mutation in &context.applied[applied_before..] {
                self.emit(ProgressEvent::MutationApplied {
                    task: mutation.task().to_string(),
                    description: mutation.to_string(),
                });
            }

            self.emit(ProgressEvent::PhaseComplete {
                phase: name.to_string(),
                duration: phase_start.elapsed(),
            });
            debug!(phase = %name, duration_ms = phase_start.elapsed().as_millis(), "Phase complete");
        }

        let plan = context
            .plan
            .clone()
            .ok_or_else(|| anyhow!("Pipeline finished without producing a plan"))?;

        let edges = plan.edges().len();
        info!(
            project = %plan.project,
            classification = %plan.classification,
            edges,
            mutations = plan.mutations.len(),
            "Assembled containerization plan"
        );
        self.emit(ProgressEvent::Completed {
            edges,
            total_time: start.elapsed(),
        });

        Ok(plan)
    }
}

/// Loads a manifest and runs every planning phase over it.
pub fn plan_manifest(
    path: &Path,
    config: TinyJibConfig,
    progress_handler: Option<Box<dyn ProgressHandler>>,
) -> Result<ContainerizationPlan> {
    let manifest = load_manifest(path)
        .with_context(|| format!("Failed to load project manifest {}", path.display()))?;
    let mut context = PlanContext::from_manifest(manifest, config);
    PlanOrchestrator::new(progress_handler).execute(&mut context)
}
