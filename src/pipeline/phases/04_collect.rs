use crate::error::CompileError;
use crate::fs::copy_file;
use crate::pipeline::context::{CompileContext, PipelineContext};
use crate::pipeline::phase_trait::CompilePhase;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copies the build artifacts and HTML shell into the results directory
pub struct CollectPhase;

#[async_trait]
impl CompilePhase for CollectPhase {
    async fn execute(&self, pipeline: &PipelineContext, context: &mut CompileContext) -> Result<()> {
        let config = &pipeline.config;
        let input_dir = context
            .input_dir
            .clone()
            .ok_or_else(|| anyhow!("Input directory was not staged"))?;

        let build_output = discover_build_output(&config.build_output_root())?;
        info!("Build output directory: {}", build_output.display());

        let results_dir = config.results_dir(&input_dir);
        fs::create_dir_all(&results_dir)
            .with_context(|| format!("Failed to create {}", results_dir.display()))?;

        let mut artifacts = Vec::new();
        for name in &config.artifact_names {
            info!("Copying {} to output directory", name);
            let dst = results_dir.join(name);
            copy_file(&build_output.join(name), &dst)?;
            artifacts.push(dst);
        }

        info!("Copying {} to output directory", config.html_shell_name);
        let html = results_dir.join(&config.html_shell_name);
        copy_file(&config.build_root.join(&config.html_shell_name), &html)?;
        artifacts.push(html);

        context.build_output_dir = Some(build_output);
        context.results_dir = Some(results_dir);
        context.artifacts = artifacts;
        Ok(())
    }
}

/// The per-target directory the build tool created under `root`
///
/// The tool names it after the build environment, so it is discovered
/// rather than configured. With several, the first by name is used.
pub fn discover_build_output(root: &Path) -> Result<PathBuf> {
    let missing = || CompileError::BuildOutputMissing {
        root: root.to_path_buf(),
    };

    let entries = fs::read_dir(root).map_err(|err| anyhow::Error::new(err).context(missing()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", root.display()))?
            .path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            debug!("Skipping non-directory build output entry: {}", path.display());
        }
    }
    dirs.sort();

    dirs.into_iter().next().ok_or_else(|| missing().into())
}
