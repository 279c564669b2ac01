use crate::build::{retry_bounded, BuildStatus, RetryOutcome};
use crate::error::CompileError;
use crate::fs::copy_file;
use crate::pipeline::context::{CompileContext, PipelineContext};
use crate::pipeline::phase_trait::CompilePhase;
use crate::progress::ProgressEvent;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

/// Runs the external build in the build root, retrying up to the configured bound
pub struct BuildPhase;

#[async_trait]
impl CompilePhase for BuildPhase {
    async fn execute(&self, pipeline: &PipelineContext, context: &mut CompileContext) -> Result<()> {
        let config = &pipeline.config;
        provision_companion_header(pipeline)?;

        let runner = pipeline.runner.as_ref();
        let build_root = config.build_root.as_path();
        let max_attempts = config.max_attempts;
        let progress = &*context;

        info!("Starting compilation with '{}'", runner.describe());
        let outcome = retry_bounded(max_attempts, move |attempt| async move {
            progress.report(ProgressEvent::BuildAttemptStarted {
                attempt,
                max_attempts,
            });

            let reason = match runner.run(build_root).await {
                Ok(BuildStatus::Succeeded) => return Ok(()),
                Ok(status) => status.to_string(),
                Err(err) => format!("{:#}", err),
            };

            progress.report(ProgressEvent::BuildAttemptFailed {
                attempt,
                max_attempts,
                reason: reason.clone(),
            });
            Err(reason)
        })
        .await;

        context.build_attempts = outcome.attempts();
        match outcome {
            RetryOutcome::Succeeded { attempts, .. } => {
                info!("Compilation successful on attempt {}", attempts);
                Ok(())
            }
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                error!("Compilation failed: {}", last_error);
                Err(CompileError::BuildFailed { attempts }.into())
            }
        }
    }
}

/// Copies the companion header from the build root into the working tree
fn provision_companion_header(pipeline: &PipelineContext) -> Result<()> {
    let config = &pipeline.config;
    if let Some(header) = &config.companion_header {
        let src = config.build_root.join(header);
        let dst = config.source_dir().join(header);
        copy_file(&src, &dst)?;
        info!("Copied {} to {}", src.display(), dst.display());
    }
    Ok(())
}
