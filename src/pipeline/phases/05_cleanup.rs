use crate::pipeline::context::{CompileContext, PipelineContext};
use crate::pipeline::phase_trait::CompilePhase;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use tracing::info;

/// Removes the working tree unless the caller asked to keep it
pub struct CleanupPhase;

#[async_trait]
impl CompilePhase for CleanupPhase {
    async fn execute(&self, pipeline: &PipelineContext, context: &mut CompileContext) -> Result<()> {
        let source_dir = pipeline.config.source_dir();

        if pipeline.keep_files {
            info!("Keeping temporary source files in {}", source_dir.display());
            return Ok(());
        }

        info!("Removing temporary source files in {}", source_dir.display());
        if source_dir.exists() {
            fs::remove_dir_all(&source_dir)
                .with_context(|| format!("Failed to remove {}", source_dir.display()))?;
        }
        context.working_tree_removed = true;
        Ok(())
    }
}
