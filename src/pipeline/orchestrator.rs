use super::context::{CompileContext, PipelineContext};
use super::phase_trait::CompilePhase;
use super::phases::{
    build::BuildPhase, cleanup::CleanupPhase, collect::CollectPhase, stage::StagePhase,
    transform::TransformPhase,
};
use crate::output::CompileReport;
use crate::progress::{ProgressEvent, ProgressHandler};
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct PipelineOrchestrator {
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl PipelineOrchestrator {
    pub fn new(progress_handler: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self { progress_handler }
    }

    /// Runs every phase with a fresh compile context
    pub async fn run(&self, pipeline: &PipelineContext) -> Result<CompileReport> {
        let mut context = CompileContext::new(self.progress_handler.clone());
        self.execute(pipeline, &mut context).await
    }

    /// Runs every phase, recording into `context`
    ///
    /// Stops at the first failing phase; `context` keeps whatever the phases
    /// before it recorded.
    pub async fn execute(
        &self,
        pipeline: &PipelineContext,
        context: &mut CompileContext,
    ) -> Result<CompileReport> {
        let start = Instant::now();
        info!(
            "Starting compile pipeline for: {}",
            pipeline.config.mapped_root.display()
        );
        context.report(ProgressEvent::Started {
            mapped_root: pipeline.config.mapped_root.display().to_string(),
        });

        let phases: Vec<(Box<dyn CompilePhase>, &str)> = vec![
            (Box::new(StagePhase), "StagePhase"),
            (Box::new(TransformPhase), "TransformPhase"),
            (Box::new(BuildPhase), "BuildPhase"),
            (Box::new(CollectPhase), "CollectPhase"),
            (Box::new(CleanupPhase), "CleanupPhase"),
        ];

        for (phase, phase_name) in phases {
            info!("Phase: {}", phase_name);
            context.report(ProgressEvent::PhaseStarted {
                phase: phase_name.to_string(),
            });

            let phase_start = Instant::now();
            if let Err(err) = phase
                .execute(pipeline, context)
                .await
                .with_context(|| format!("Phase {} failed", phase_name))
            {
                context.report(ProgressEvent::Failed {
                    error: format!("{:#}", err),
                });
                return Err(err);
            }

            context.report(ProgressEvent::PhaseComplete {
                phase: phase_name.to_string(),
                duration: phase_start.elapsed(),
            });
            debug!("Phase {} complete", phase_name);
        }

        let report = CompileReport::from_context(context, start.elapsed())
            .ok_or_else(|| anyhow!("Pipeline finished without recording its results"))?;

        context.report(ProgressEvent::Completed {
            results_dir: report.results_dir.display().to_string(),
            total_time: start.elapsed(),
        });

        Ok(report)
    }
}
