//! Pipeline context for managing dependencies and per-run state

use std::path::PathBuf;
use std::sync::Arc;

use crate::build::BuildRunner;
use crate::config::CompilerConfig;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::sketch::EntryPointOutcome;

/// Context that owns all long-lived pipeline dependencies
pub struct PipelineContext {
    /// Fixed locations and names
    pub config: CompilerConfig,

    /// Runs the external build
    pub runner: Arc<dyn BuildRunner>,

    /// Leave the working tree in place after a successful run
    pub keep_files: bool,
}

impl PipelineContext {
    pub fn new(config: CompilerConfig, runner: Arc<dyn BuildRunner>, keep_files: bool) -> Self {
        Self {
            config,
            runner,
            keep_files,
        }
    }
}

/// State recorded by the phases as they run
#[derive(Clone)]
pub struct CompileContext {
    pub progress_handler: Option<Arc<dyn ProgressHandler>>,
    /// The single directory found under the mapped root
    pub input_dir: Option<PathBuf>,
    pub entry_point: Option<EntryPointOutcome>,
    pub shimmed_files: Vec<PathBuf>,
    pub build_attempts: u32,
    /// Per-target directory the build tool wrote into
    pub build_output_dir: Option<PathBuf>,
    pub results_dir: Option<PathBuf>,
    pub artifacts: Vec<PathBuf>,
    pub working_tree_removed: bool,
}

impl CompileContext {
    pub fn new(progress_handler: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self {
            progress_handler,
            input_dir: None,
            entry_point: None,
            shimmed_files: Vec::new(),
            build_attempts: 0,
            build_output_dir: None,
            results_dir: None,
            artifacts: Vec::new(),
            working_tree_removed: false,
        }
    }

    pub fn report(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::CommandRunner;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler(AtomicUsize);

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_pipeline_context_creation() {
        let config = CompilerConfig::default();
        let runner = Arc::new(CommandRunner::from_config(&config).unwrap());
        let pipeline = PipelineContext::new(config.clone(), runner, true);

        assert_eq!(pipeline.config, config);
        assert!(pipeline.keep_files);
        assert_eq!(pipeline.runner.describe(), "pio run");
    }

    #[test]
    fn test_compile_context_starts_empty() {
        let context = CompileContext::new(None);
        assert!(context.input_dir.is_none());
        assert!(context.entry_point.is_none());
        assert_eq!(context.build_attempts, 0);
        assert!(!context.working_tree_removed);
    }

    #[test]
    fn test_report_reaches_handler() {
        let handler = Arc::new(CountingHandler(AtomicUsize::new(0)));
        let context = CompileContext::new(Some(handler.clone() as Arc<dyn ProgressHandler>));

        context.report(ProgressEvent::PhaseStarted {
            phase: "StagePhase".to_string(),
        });

        assert_eq!(handler.0.load(Ordering::SeqCst), 1);
    }
}
