//! Shared fixtures for phase tests

use super::context::{CompileContext, PipelineContext};
use crate::build::MockRunner;
use crate::config::CompilerConfig;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary mapped root and build root laid out like the build container
pub struct Fixture {
    pub root: TempDir,
    pub config: CompilerConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let mapped = root.path().join("mapped");
        let build_root = root.path().join("js");
        fs::create_dir_all(&mapped).unwrap();
        fs::create_dir_all(&build_root).unwrap();
        fs::write(build_root.join("Arduino.h"), "#pragma once\n").unwrap();
        fs::write(build_root.join("index.html"), "<html></html>\n").unwrap();

        let config = CompilerConfig::default().with_roots(mapped, build_root);
        Self { root, config }
    }

    /// Creates a sketch directory under the mapped root
    pub fn add_input(&self, name: &str) -> PathBuf {
        let dir = self.config.mapped_root.join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn pipeline(&self, runner: Arc<MockRunner>, keep_files: bool) -> PipelineContext {
        PipelineContext::new(self.config.clone(), runner, keep_files)
    }

    /// Context as left behind by a successful stage phase
    pub fn staged_context(&self, input: PathBuf) -> CompileContext {
        let mut context = CompileContext::new(None);
        context.input_dir = Some(input);
        context
    }
}

/// Runner that succeeds and drops both artifacts into a `wasm` target dir
pub fn succeeding_runner(failures: usize) -> MockRunner {
    MockRunner::failing(failures)
        .producing(".pio/build/wasm/fastled.js", "// loader\n")
        .producing(".pio/build/wasm/fastled.wasm", "\0asm")
}
