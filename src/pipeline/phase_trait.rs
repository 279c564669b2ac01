use super::context::{CompileContext, PipelineContext};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CompilePhase: Send + Sync {
    async fn execute(&self, pipeline: &PipelineContext, context: &mut CompileContext)
        -> Result<()>;
}
