// Planning phases, in execution order. Phases before ApplyPhase only read the
// project inventory; ApplyPhase is the single place it is modified.

#[path = "01_configure.rs"]
pub mod configure;
#[path = "02_classify.rs"]
pub mod classify;
#[path = "03_resolve.rs"]
pub mod resolve;
#[path = "04_apply.rs"]
pub mod apply;
#[path = "05_layers.rs"]
pub mod layers;
#[path = "06_entrypoint.rs"]
pub mod entrypoint;
#[path = "07_image.rs"]
pub mod image;
#[path = "08_outputs.rs"]
pub mod outputs;
#[path = "09_assemble.rs"]
pub mod assemble;
