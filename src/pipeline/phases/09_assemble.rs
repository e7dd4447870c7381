use crate::pipeline::context::{require, PlanContext};
use crate::pipeline::phase_trait::PlanPhase;
use crate::pipeline::plan::{ContainerizationPlan, TaskPlan};
use crate::project::ProjectInventory;
use crate::tasks::ContainerizationTask;
use anyhow::Result;

pub struct AssemblePhase;

impl PlanPhase for AssemblePhase {
    fn name(&self) -> &'static str {
        "AssemblePhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let classification = *require(&context.classification, "Classification")?;
        let resolution = require(&context.resolution, "Resolution")?;
        let format = context.extension.container.format;

        let tasks = ContainerizationTask::ALL
            .into_iter()
            .map(|task| TaskPlan::new(task, format, resolution.dependencies.clone()))
            .collect();

        let plan = ContainerizationPlan {
            project: context.project.name.clone(),
            project_dir: context.project.project_dir().to_path_buf(),
            build_dir: context.project.build_dir(),
            classification,
            tasks,
            mutations: context.applied.clone(),
            layers: require(&context.layers, "Input layers")?.clone(),
            entrypoint: require(&context.entrypoint, "Entrypoint")?.clone(),
            image: require(&context.image, "Image settings")?.clone(),
            output_paths: require(&context.output_paths, "Output paths")?.clone(),
        };

        context.plan = Some(plan);
        Ok(())
    }
}
