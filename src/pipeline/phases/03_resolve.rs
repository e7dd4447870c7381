use crate::pipeline::context::{require, PlanContext};
use crate::pipeline::phase_trait::PlanPhase;
use crate::resolver::TaskDependencyResolver;
use anyhow::Result;

/// Runs the dependency resolver against the still untouched inventory.
pub struct ResolvePhase;

impl PlanPhase for ResolvePhase {
    fn name(&self) -> &'static str {
        "ResolvePhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let classification = require(&context.classification, "Classification")?;
        let resolver = TaskDependencyResolver::new(
            &context.project,
            &context.extension.configuration_name,
            &context.extension.source_set_name,
        );
        let resolution = resolver.resolve(classification)?;
        context.resolution = Some(resolution);
        Ok(())
    }
}
