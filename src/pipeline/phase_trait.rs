use super::context::PlanContext;
use anyhow::Result;

pub trait PlanPhase {
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut PlanContext) -> Result<()>;
}
