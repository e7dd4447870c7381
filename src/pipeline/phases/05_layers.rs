use crate::layers::collect_input_layers;
use crate::pipeline::context::{require, PlanContext};
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use tracing::debug;

pub struct LayersPhase;

impl PlanPhase for LayersPhase {
    fn name(&self) -> &'static str {
        "LayersPhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let classification = require(&context.classification, "Classification")?;
        let layers = collect_input_layers(
            &context.project,
            classification,
            &context.extension.source_set_name,
            &context.extension.configuration_name,
        )?;

        debug!(
            dependencies = layers.dependencies.dependencies.len(),
            snapshots = layers.dependencies.snapshot_dependencies.len(),
            projects = layers.dependencies.project_dependencies.len(),
            application = layers.application.len(),
            "Collected input layers"
        );
        context.layers = Some(layers);
        Ok(())
    }
}
