//! Configuration management for sketchwasm
//!
//! Every fixed path and name the pipeline relies on lives here. The built-in
//! defaults match the layout of the PlatformIO WebAssembly build container;
//! each can be overridden from the environment.
//!
//! # Environment Variables
//!
//! - `SKETCHWASM_MAPPED_DIR`: mount point holding the input directory - default: "/mapped"
//! - `SKETCHWASM_BUILD_ROOT`: directory the build command runs in - default: "/js"
//! - `SKETCHWASM_BUILD_COMMAND`: whitespace separated command line - default: "pio run"
//! - `SKETCHWASM_MAX_ATTEMPTS`: build attempts before giving up - default: "2"
//! - `SKETCHWASM_RESULTS_DIR_NAME`: results directory created in the input - default: "fastled_js"
//! - `SKETCHWASM_COMPANION_HEADER`: header copied from the build root into the
//!   working tree before building; empty disables - default: "Arduino.h"
//!
//! Logging is configured separately through `SKETCHWASM_LOG_LEVEL` and
//! `SKETCHWASM_LOG_JSON`, see [`crate::util::logging`].
//!
//! # Example
//!
//! ```no_run
//! use sketchwasm::CompilerConfig;
//!
//! let config = CompilerConfig::from_env().expect("Invalid environment");
//! config.validate().expect("Invalid configuration");
//! println!("Working tree: {}", config.source_dir().display());
//! ```

use crate::sketch::EntryPointNames;
use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

const DEFAULT_MAPPED_ROOT: &str = "/mapped";
const DEFAULT_BUILD_ROOT: &str = "/js";
const DEFAULT_SOURCE_SUBDIR: &str = "src";
const DEFAULT_BUILD_OUTPUT_SUBDIR: &str = ".pio/build";
const DEFAULT_BUILD_COMMAND: &str = "pio run";
const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_SKETCH_EXTENSION: &str = "ino";
const DEFAULT_ENTRY_POINT: &str = "main.cpp";
const DEFAULT_SECONDARY_ENTRY: &str = "main2.hpp";
const DEFAULT_SHIM_INCLUDE: &str = "#include \"platforms/stub/wasm/js.h\"";
const DEFAULT_SOURCE_EXTENSIONS: [&str; 4] = ["ino", "h", "hpp", "cpp"];
const DEFAULT_ARTIFACTS: [&str; 2] = ["fastled.js", "fastled.wasm"];
const DEFAULT_HTML_SHELL: &str = "index.html";
const DEFAULT_RESULTS_DIR: &str = "fastled_js";
const DEFAULT_COMPANION_HEADER: &str = "Arduino.h";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Fixed locations and names used by the compile pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Mount point that must hold exactly one input directory
    pub mapped_root: PathBuf,

    /// Working directory of the external build command
    pub build_root: PathBuf,

    /// Working tree location, relative to the build root
    pub source_subdir: PathBuf,

    /// Per-target output parent, relative to the build root
    pub build_output_subdir: PathBuf,

    /// Program followed by its arguments
    pub build_command: Vec<String>,

    /// Upper bound on build attempts
    pub max_attempts: u32,

    /// Extension (without dot) that marks a sketch file
    pub sketch_extension: String,

    /// Name the sketch file takes in the working tree
    pub entry_point_name: String,

    /// Name a pre-existing entry point is preserved under
    pub secondary_entry_name: String,

    /// Include line every source file must start with
    pub shim_include: String,

    /// Extensions (without dot) that receive the shim include
    pub source_extensions: Vec<String>,

    /// Files copied out of the per-target build output directory
    pub artifact_names: Vec<String>,

    /// Static page copied out of the build root
    pub html_shell_name: String,

    /// Results directory created inside the input directory
    pub results_dir_name: String,

    /// Header copied from the build root into the working tree before building
    pub companion_header: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            mapped_root: PathBuf::from(DEFAULT_MAPPED_ROOT),
            build_root: PathBuf::from(DEFAULT_BUILD_ROOT),
            source_subdir: PathBuf::from(DEFAULT_SOURCE_SUBDIR),
            build_output_subdir: PathBuf::from(DEFAULT_BUILD_OUTPUT_SUBDIR),
            build_command: split_command(DEFAULT_BUILD_COMMAND),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            sketch_extension: DEFAULT_SKETCH_EXTENSION.to_string(),
            entry_point_name: DEFAULT_ENTRY_POINT.to_string(),
            secondary_entry_name: DEFAULT_SECONDARY_ENTRY.to_string(),
            shim_include: DEFAULT_SHIM_INCLUDE.to_string(),
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            artifact_names: DEFAULT_ARTIFACTS.iter().map(|a| a.to_string()).collect(),
            html_shell_name: DEFAULT_HTML_SHELL.to_string(),
            results_dir_name: DEFAULT_RESULTS_DIR.to_string(),
            companion_header: Some(DEFAULT_COMPANION_HEADER.to_string()),
        }
    }
}

impl CompilerConfig {
    /// Loads the defaults and applies any `SKETCHWASM_*` overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if a numeric variable is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SKETCHWASM_MAPPED_DIR") {
            config.mapped_root = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("SKETCHWASM_BUILD_ROOT") {
            config.build_root = PathBuf::from(dir);
        }

        if let Ok(command) = env::var("SKETCHWASM_BUILD_COMMAND") {
            config.build_command = split_command(&command);
        }

        if let Ok(attempts) = env::var("SKETCHWASM_MAX_ATTEMPTS") {
            config.max_attempts = attempts.trim().parse::<u32>().map_err(|e| {
                ConfigError::ParseError {
                    field: "SKETCHWASM_MAX_ATTEMPTS".to_string(),
                    error: e.to_string(),
                }
            })?;
        }

        if let Ok(name) = env::var("SKETCHWASM_RESULTS_DIR_NAME") {
            config.results_dir_name = name;
        }

        if let Ok(header) = env::var("SKETCHWASM_COMPANION_HEADER") {
            config.companion_header = if header.trim().is_empty() {
                None
            } else {
                Some(header)
            };
        }

        Ok(config)
    }

    /// Points the config at a different mapped root and build root, keeping
    /// every relative name as is
    pub fn with_roots(
        mut self,
        mapped_root: impl Into<PathBuf>,
        build_root: impl Into<PathBuf>,
    ) -> Self {
        self.mapped_root = mapped_root.into();
        self.build_root = build_root.into();
        self
    }

    /// Validates the configuration
    ///
    /// Checks that:
    /// - The build command names a program
    /// - At least one build attempt is allowed
    /// - The working tree and build output stay under the build root
    /// - Every fixed file name is a bare, non-empty name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build_command.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Build command must not be empty".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max attempts must be at least 1".to_string(),
            ));
        }

        for (field, path) in [
            ("source_subdir", &self.source_subdir),
            ("build_output_subdir", &self.build_output_subdir),
        ] {
            if !is_nested_relative(path) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be a relative path inside the build root: {}",
                    field,
                    path.display()
                )));
            }
        }

        let mut names = vec![
            ("entry_point_name", self.entry_point_name.as_str()),
            ("secondary_entry_name", self.secondary_entry_name.as_str()),
            ("html_shell_name", self.html_shell_name.as_str()),
            ("results_dir_name", self.results_dir_name.as_str()),
        ];
        names.extend(self.artifact_names.iter().map(|a| ("artifact_names", a.as_str())));
        if let Some(header) = &self.companion_header {
            names.push(("companion_header", header.as_str()));
        }

        for (field, name) in names {
            if !is_bare_name(name) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be a plain file name: '{}'",
                    field, name
                )));
            }
        }

        if self.entry_point_name == self.secondary_entry_name {
            return Err(ConfigError::ValidationFailed(
                "Entry point and secondary entry point names must differ".to_string(),
            ));
        }

        if self.shim_include.trim().is_empty() || self.shim_include.contains('\n') {
            return Err(ConfigError::ValidationFailed(
                "Shim include must be a single non-empty line".to_string(),
            ));
        }

        Ok(())
    }

    /// Root of the working tree
    pub fn source_dir(&self) -> PathBuf {
        self.build_root.join(&self.source_subdir)
    }

    /// Parent of the build tool's per-target output directory
    pub fn build_output_root(&self) -> PathBuf {
        self.build_root.join(&self.build_output_subdir)
    }

    /// Results directory for a given input directory
    pub fn results_dir(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(&self.results_dir_name)
    }

    /// Names used by entry-point normalization
    pub fn entry_point_names(&self) -> EntryPointNames {
        EntryPointNames {
            sketch_extension: self.sketch_extension.clone(),
            entry_point: self.entry_point_name.clone(),
            secondary: self.secondary_entry_name.clone(),
        }
    }
}

impl fmt::Display for CompilerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compiler Configuration:")?;
        writeln!(f, "  Mapped Root: {}", self.mapped_root.display())?;
        writeln!(f, "  Build Root: {}", self.build_root.display())?;
        writeln!(f, "  Working Tree: {}", self.source_dir().display())?;
        writeln!(f, "  Build Output: {}", self.build_output_root().display())?;
        writeln!(f, "  Build Command: {}", self.build_command.join(" "))?;
        writeln!(f, "  Max Attempts: {}", self.max_attempts)?;
        writeln!(f, "  Results Dir: {}", self.results_dir_name)?;
        match &self.companion_header {
            Some(header) => writeln!(f, "  Companion Header: {}", header)?,
            None => writeln!(f, "  Companion Header: (none)")?,
        }
        Ok(())
    }
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

fn is_nested_relative(path: &Path) -> bool {
    let mut has_normal = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            _ => return false,
        }
    }
    has_normal
}

fn is_bare_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}
