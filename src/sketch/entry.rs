use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File names involved in entry-point normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointNames {
    /// Extension (without dot) of sketch files
    pub sketch_extension: String,
    /// Name the sketch is renamed to
    pub entry_point: String,
    /// Name a pre-existing entry point is preserved under
    pub secondary: String,
}

/// What entry-point normalization did to the working tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPointOutcome {
    /// No sketch file at the top level, nothing renamed
    NoSketch,
    Normalized {
        /// Original path of the sketch that became the entry point
        sketch: PathBuf,
        entry_point: PathBuf,
        /// Where the previous entry point went, if there was one
        preserved: Option<PathBuf>,
        /// Further sketches left untouched
        ignored: Vec<PathBuf>,
    },
}

impl EntryPointOutcome {
    pub fn entry_point(&self) -> Option<&Path> {
        match self {
            EntryPointOutcome::NoSketch => None,
            EntryPointOutcome::Normalized { entry_point, .. } => Some(entry_point),
        }
    }
}

/// Top-level sketch files in `dir`, sorted by file name
pub fn find_sketches(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut sketches = Vec::new();

    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if !entry.file_type()?.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            sketches.push(path);
        }
    }

    sketches.sort();
    Ok(sketches)
}

/// Renames the first sketch in `dir` to the entry-point name
///
/// An existing entry point is moved to the secondary name first, and the
/// new entry point gets an include of it appended so its code still builds.
pub fn normalize_entry_point(dir: &Path, names: &EntryPointNames) -> Result<EntryPointOutcome> {
    let mut sketches = find_sketches(dir, &names.sketch_extension)?;
    if sketches.is_empty() {
        info!("No .{} file found in {}", names.sketch_extension, dir.display());
        return Ok(EntryPointOutcome::NoSketch);
    }

    let sketch = sketches.remove(0);
    if !sketches.is_empty() {
        warn!(
            chosen = %sketch.display(),
            ignored = sketches.len(),
            "Multiple sketch files found, using the first by name"
        );
    }
    info!("Found sketch file: {}", sketch.display());

    let entry_point = dir.join(&names.entry_point);
    let secondary = dir.join(&names.secondary);

    let preserved = if entry_point.exists() {
        info!(
            "{} already exists, renaming to {}",
            names.entry_point, names.secondary
        );
        fs::rename(&entry_point, &secondary).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                entry_point.display(),
                secondary.display()
            )
        })?;
        Some(secondary)
    } else {
        None
    };

    info!("Renaming {} to {}", sketch.display(), names.entry_point);
    fs::rename(&sketch, &entry_point).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            sketch.display(),
            entry_point.display()
        )
    })?;

    if preserved.is_some() {
        debug!("Including {} in {}", names.secondary, names.entry_point);
        append_include(&entry_point, &names.secondary)?;
    }

    Ok(EntryPointOutcome::Normalized {
        sketch,
        entry_point,
        preserved,
        ignored: sketches,
    })
}

fn append_include(file: &Path, included: &str) -> Result<()> {
    let existing = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let mut out = OpenOptions::new()
        .append(true)
        .open(file)
        .with_context(|| format!("Failed to open {} for appending", file.display()))?;

    if !existing.is_empty() && !existing.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    writeln!(out, "#include \"{}\"", included)
        .with_context(|| format!("Failed to append include to {}", file.display()))?;

    Ok(())
}
