//! Domain errors for the compile pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Failures the pipeline reports by name.
///
/// Phases return `anyhow::Result` and wrap these with path context, so the
/// caller can still downcast to decide how loudly to report.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("No input directory found in {}", root.display())]
    NoInputDirectory { root: PathBuf },

    #[error("More than one entry found in {} ({count} entries)", root.display())]
    MultipleInputDirectories { root: PathBuf, count: usize },

    #[error("Build failed after {attempts} attempt(s)")]
    BuildFailed { attempts: u32 },

    #[error("No build output directory under {}", root.display())]
    BuildOutputMissing { root: PathBuf },
}

impl CompileError {
    /// Expected runtime conditions, as opposed to a broken build environment.
    ///
    /// Expected failures are logged as a single line; anything else gets the
    /// full cause chain.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            CompileError::NoInputDirectory { .. }
                | CompileError::MultipleInputDirectories { .. }
                | CompileError::BuildFailed { .. }
        )
    }
}
