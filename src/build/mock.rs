//! Scripted build runner for tests

use super::{BuildRunner, BuildStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Build runner that replays a fixed sequence of statuses
///
/// Once the sequence is used up every further run succeeds. On each
/// successful run the configured output files are written relative to the
/// working directory, the way the real toolchain drops its artifacts.
#[derive(Debug, Default)]
pub struct MockRunner {
    script: Mutex<VecDeque<BuildStatus>>,
    outputs: Vec<(PathBuf, String)>,
    calls: AtomicU32,
    cwds: Mutex<Vec<PathBuf>>,
}

impl MockRunner {
    pub fn new(script: Vec<BuildStatus>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    /// Fails `n` times with exit code 1, then succeeds
    pub fn failing(n: usize) -> Self {
        Self::new(vec![BuildStatus::Failed { code: Some(1) }; n])
    }

    pub fn producing(mut self, relative: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.outputs.push((relative.into(), contents.into()));
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cwds(&self) -> Vec<PathBuf> {
        self.cwds.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next_status(&self) -> BuildStatus {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(BuildStatus::Succeeded)
    }

    fn write_outputs(&self, cwd: &Path) -> Result<()> {
        for (relative, contents) in &self.outputs {
            let path = cwd.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl BuildRunner for MockRunner {
    async fn run(&self, cwd: &Path) -> Result<BuildStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut cwds) = self.cwds.lock() {
            cwds.push(cwd.to_path_buf());
        }

        let status = self.next_status();
        if status.is_success() {
            self.write_outputs(cwd)?;
        }
        Ok(status)
    }

    fn describe(&self) -> String {
        "mock build".to_string()
    }
}
