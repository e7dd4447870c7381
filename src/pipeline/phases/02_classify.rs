use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use crate::resolver::classify;
use anyhow::Result;
use tracing::debug;

pub struct ClassifyPhase;

impl PlanPhase for ClassifyPhase {
    fn name(&self) -> &'static str {
        "ClassifyPhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let classification = classify(&context.project, &context.extension.containerizing_mode);
        debug!(
            project = %context.project.name,
            classification = %classification,
            "Classified packaging"
        );
        context.classification = Some(classification);
        Ok(())
    }
}
