use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::{Context, Result};

/// Applies environment overrides and validates the extension before anything
/// reads it. From here on the extension is treated as read-only.
pub struct ConfigurePhase;

impl PlanPhase for ConfigurePhase {
    fn name(&self) -> &'static str {
        "ConfigurePhase"
    }

    fn execute(&self, context: &mut PlanContext) -> Result<()> {
        context
            .config
            .validate()
            .context("Invalid environment configuration")?;
        context.config.apply_to(&mut context.extension);
        context
            .extension
            .validate()
            .context("Invalid jib configuration")?;
        Ok(())
    }
}
