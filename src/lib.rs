//! sketchwasm - compile hardware sketches to WebAssembly
//!
//! This library stages a sketch source tree into a fixed working location,
//! rewrites it so it builds against the WebAssembly platform shim, runs the
//! external PlatformIO build with bounded retry and collects the resulting
//! module, its JavaScript loader and the HTML shell next to the input.
//!
//! # Core Concepts
//!
//! - **Mapped input**: exactly one directory under the mapped root
//! - **Working tree**: a mutable copy of the input under the build root
//! - **Entry point**: the sketch file renamed to the fixed entry-point name
//! - **Platform shim**: a header include prepended to every source file
//!
//! # Example Usage
//!
//! ```no_run
//! use sketchwasm::{CompilerConfig, PipelineContext, PipelineOrchestrator};
//! use sketchwasm::build::CommandRunner;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = CompilerConfig::from_env()?;
//! let runner = Arc::new(CommandRunner::from_config(&config)?);
//! let pipeline = PipelineContext::new(config, runner, false);
//!
//! let report = PipelineOrchestrator::new(None).run(&pipeline).await?;
//! println!("Artifacts in {}", report.results_dir.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`pipeline`]: the staged compile pipeline and its phases
//! - [`sketch`]: entry-point normalization and shim injection
//! - [`build`]: external build invocation and bounded retry

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod sketch;
pub mod util;

pub use config::{CompilerConfig, ConfigError};
pub use error::CompileError;
pub use output::CompileReport;
pub use pipeline::{CompileContext, PipelineContext, PipelineOrchestrator};
pub use util::{config_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
