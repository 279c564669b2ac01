use crate::error::CompileError;
use crate::fs::copy_tree;
use crate::pipeline::context::{CompileContext, PipelineContext};
use crate::pipeline::phase_trait::CompilePhase;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Copies the single mapped input directory into the working tree
pub struct StagePhase;

#[async_trait]
impl CompilePhase for StagePhase {
    async fn execute(&self, pipeline: &PipelineContext, context: &mut CompileContext) -> Result<()> {
        let input_dir = find_input_dir(&pipeline.config.mapped_root)?;
        let source_dir = pipeline.config.source_dir();

        info!(
            "Copying files from {} to {}",
            input_dir.display(),
            source_dir.display()
        );
        let copied = copy_tree(&input_dir, &source_dir)?;
        info!("Staged {} file(s)", copied);

        context.input_dir = Some(input_dir);
        Ok(())
    }
}

/// The only entry under `mapped_root`, which must be a directory
///
/// Every entry counts, files included. Zero entries, a lone non-directory or
/// several entries is a precondition failure, reported before anything is
/// written.
pub fn find_input_dir(mapped_root: &Path) -> Result<PathBuf> {
    let no_input = || CompileError::NoInputDirectory {
        root: mapped_root.to_path_buf(),
    };

    if !mapped_root.is_dir() {
        return Err(no_input().into());
    }

    let mut entries = Vec::new();
    let read_dir = fs::read_dir(mapped_root)
        .with_context(|| format!("Failed to read {}", mapped_root.display()))?;
    for entry in read_dir {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", mapped_root.display()))?
            .path();
        entries.push(path);
    }
    entries.sort();

    match entries.len() {
        0 => Err(no_input().into()),
        1 => {
            let entry = entries.remove(0);
            if entry.is_dir() {
                Ok(entry)
            } else {
                warn!("Only entry is not a directory: {}", entry.display());
                Err(no_input().into())
            }
        }
        count => Err(CompileError::MultipleInputDirectories {
            root: mapped_root.to_path_buf(),
            count,
        }
        .into()),
    }
}
