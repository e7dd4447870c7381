use crate::params::OutputPaths;
use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use crate::project::ProjectInventory;
use anyhow::Result;

pub struct OutputsPhase;

impl PlanPhase for OutputsPhase {
    fn name(&self) -> &'static str {
        "OutputsPhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let paths = OutputPaths::resolve(
            &context.extension.output_paths,
            context.project.project_dir(),
            &context.project.build_dir(),
        );
        context.output_paths = Some(paths);
        Ok(())
    }
}
