pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod plan;

pub use context::PlanContext;
pub use orchestrator::{plan_manifest, PlanOrchestrator};
pub use phase_trait::PlanPhase;
pub use plan::{ContainerizationPlan, ImagePlan, TaskPlan};
