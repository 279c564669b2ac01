//! Output formatting for the compile summary
//!
//! The summary goes to stdout; logs go to stderr, so `--format json` output
//! can be piped straight into other tools.

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::output::CompileReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for compile reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &CompileReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Human => self.format_human(report),
        }
    }

    fn format_json(&self, report: &CompileReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize compile report to JSON")
    }

    fn format_human(&self, report: &CompileReport) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "Compiled {}", report.input_dir.display())?;
        match &report.sketch {
            Some(sketch) => writeln!(out, "  Sketch:        {}", sketch.display())?,
            None => writeln!(out, "  Sketch:        (none)")?,
        }
        if let Some(preserved) = &report.preserved_entry_point {
            writeln!(out, "  Preserved:     {}", preserved.display())?;
        }
        writeln!(out, "  Shimmed files: {}", report.shimmed_files)?;
        writeln!(out, "  Attempts:      {}", report.build_attempts)?;
        writeln!(out, "  Build output:  {}", report.build_output_dir.display())?;
        writeln!(out, "  Results:       {}", report.results_dir.display())?;
        for artifact in &report.artifacts {
            writeln!(out, "    - {}", artifact.display())?;
        }
        writeln!(
            out,
            "  Working tree:  {}",
            if report.working_tree_removed {
                "removed"
            } else {
                "kept"
            }
        )?;
        write!(out, "  Duration:      {:.2}s", report.duration_ms as f64 / 1000.0)?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report() -> CompileReport {
        CompileReport {
            input_dir: PathBuf::from("/mapped/blink"),
            results_dir: PathBuf::from("/mapped/blink/fastled_js"),
            sketch: Some(PathBuf::from("/js/src/blink.ino")),
            preserved_entry_point: None,
            shimmed_files: 4,
            build_attempts: 1,
            build_output_dir: PathBuf::from("/js/.pio/build/wasm"),
            artifacts: vec![
                PathBuf::from("/mapped/blink/fastled_js/fastled.js"),
                PathBuf::from("/mapped/blink/fastled_js/fastled.wasm"),
                PathBuf::from("/mapped/blink/fastled_js/index.html"),
            ],
            working_tree_removed: true,
            duration_ms: 2500,
        }
    }

    #[test]
    fn test_json_round_trips() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let json = formatter.format(&report()).unwrap();
        let parsed: CompileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report());
    }

    #[test]
    fn test_human_output() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let text = formatter.format(&report()).unwrap();

        assert!(text.starts_with("Compiled /mapped/blink"));
        assert!(text.contains("Attempts:      1"));
        assert!(text.contains("fastled.wasm"));
        assert!(text.contains("Working tree:  removed"));
        assert!(text.contains("Duration:      2.50s"));
        assert!(!text.contains("Preserved"));
    }
}
