use crate::pipeline::context::{CompileContext, PipelineContext};
use crate::pipeline::phase_trait::CompilePhase;
use crate::sketch::{inject_shim_tree, normalize_entry_point};
use anyhow::Result;
use async_trait::async_trait;

/// Normalizes the entry point and injects the platform shim include
pub struct TransformPhase;

#[async_trait]
impl CompilePhase for TransformPhase {
    async fn execute(&self, pipeline: &PipelineContext, context: &mut CompileContext) -> Result<()> {
        let config = &pipeline.config;
        let source_dir = config.source_dir();

        let outcome = normalize_entry_point(&source_dir, &config.entry_point_names())?;
        context.entry_point = Some(outcome);

        context.shimmed_files =
            inject_shim_tree(&source_dir, &config.shim_include, &config.source_extensions)?;

        Ok(())
    }
}
