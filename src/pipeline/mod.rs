pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{CompileContext, PipelineContext};
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::CompilePhase;
