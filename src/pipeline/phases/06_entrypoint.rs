use crate::entrypoint::plan_entrypoint;
use crate::pipeline::context::{require, PlanContext};
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;

pub struct EntrypointPhase;

impl PlanPhase for EntrypointPhase {
    fn name(&self) -> &'static str {
        "EntrypointPhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let layers = require(&context.layers, "Input layers")?;
        let entrypoint = plan_entrypoint(&context.extension.container, layers.dependencies.all());
        context.entrypoint = Some(entrypoint);
        Ok(())
    }
}
