use crate::config::{CompilerConfig, ConfigError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Exit state of one build invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Succeeded,
    /// Non-zero exit; `code` is `None` when the process was killed by a signal
    Failed { code: Option<i32> },
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Succeeded)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Succeeded => write!(f, "succeeded"),
            BuildStatus::Failed { code: Some(code) } => write!(f, "exited with status {}", code),
            BuildStatus::Failed { code: None } => write!(f, "terminated by signal"),
        }
    }
}

/// Runs the external build in a given working directory
#[async_trait]
pub trait BuildRunner: Send + Sync {
    /// Runs one build to completion
    ///
    /// `Err` means the build could not be started at all.
    async fn run(&self, cwd: &Path) -> Result<BuildStatus>;

    /// Human-readable command line, for logs
    fn describe(&self) -> String;
}

/// Spawns a program with fixed arguments
///
/// The child's stdout is sent to our stderr so that stdout only ever carries
/// the compile summary.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &CompilerConfig) -> Result<Self, ConfigError> {
        let (program, args) = config.build_command.split_first().ok_or_else(|| {
            ConfigError::ValidationFailed("Build command must not be empty".to_string())
        })?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl BuildRunner for CommandRunner {
    async fn run(&self, cwd: &Path) -> Result<BuildStatus> {
        debug!(
            command = %self.describe(),
            cwd = %cwd.display(),
            "Spawning build command"
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::from(std::io::stderr()))
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to run '{}'", self.describe()))?;

        if status.success() {
            Ok(BuildStatus::Succeeded)
        } else {
            Ok(BuildStatus::Failed {
                code: status.code(),
            })
        }
    }

    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_splits_program() {
        let runner = CommandRunner::from_config(&CompilerConfig::default()).unwrap();
        assert_eq!(runner.program, "pio");
        assert_eq!(runner.args, vec!["run"]);
        assert_eq!(runner.describe(), "pio run");
    }

    #[test]
    fn test_from_config_rejects_empty_command() {
        let mut config = CompilerConfig::default();
        config.build_command.clear();
        assert!(CommandRunner::from_config(&config).is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(BuildStatus::Succeeded.to_string(), "succeeded");
        assert_eq!(
            BuildStatus::Failed { code: Some(2) }.to_string(),
            "exited with status 2"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_given_directory() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new(
            "sh",
            vec!["-c".to_string(), "touch ran-here".to_string()],
        );

        let status = runner.run(dir.path()).await.unwrap();

        assert!(status.is_success());
        assert!(dir.path().join("ran-here").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);

        let status = runner.run(dir.path()).await.unwrap();

        assert_eq!(status, BuildStatus::Failed { code: Some(3) });
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let dir = TempDir::new().unwrap();
        let runner = CommandRunner::new("sketchwasm-definitely-not-a-program", Vec::new());

        assert!(runner.run(dir.path()).await.is_err());
    }
}
