use crate::pipeline::context::{require, PlanContext};
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::{Context, Result};

/// Writes the resolver's task mutations back into the inventory.
pub struct ApplyPhase;

impl PlanPhase for ApplyPhase {
    fn name(&self) -> &'static str {
        "ApplyPhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        let mutations = require(&context.resolution, "Resolution")?.mutations.clone();
        for mutation in mutations {
            context
                .project
                .apply(&mutation)
                .with_context(|| format!("Failed to {}", mutation))?;
            context.applied.push(mutation);
        }
        Ok(())
    }
}
