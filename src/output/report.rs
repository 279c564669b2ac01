use crate::pipeline::CompileContext;
use crate::sketch::EntryPointOutcome;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a successful compile run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileReport {
    pub input_dir: PathBuf,
    pub results_dir: PathBuf,
    /// Sketch file that became the entry point, if any
    pub sketch: Option<PathBuf>,
    /// Where a pre-existing entry point was preserved
    pub preserved_entry_point: Option<PathBuf>,
    pub shimmed_files: usize,
    pub build_attempts: u32,
    pub build_output_dir: PathBuf,
    pub artifacts: Vec<PathBuf>,
    pub working_tree_removed: bool,
    pub duration_ms: u64,
}

impl CompileReport {
    /// Builds the report from a context that went through every phase
    ///
    /// Returns `None` if a phase that records a location did not run.
    pub fn from_context(context: &CompileContext, elapsed: Duration) -> Option<Self> {
        let (sketch, preserved_entry_point) = match &context.entry_point {
            Some(EntryPointOutcome::Normalized {
                sketch, preserved, ..
            }) => (Some(sketch.clone()), preserved.clone()),
            _ => (None, None),
        };

        Some(Self {
            input_dir: context.input_dir.clone()?,
            results_dir: context.results_dir.clone()?,
            sketch,
            preserved_entry_point,
            shimmed_files: context.shimmed_files.len(),
            build_attempts: context.build_attempts,
            build_output_dir: context.build_output_dir.clone()?,
            artifacts: context.artifacts.clone(),
            working_tree_removed: context.working_tree_removed,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
