use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Returns `content` with `directive` as its only occurrence, on the first line
///
/// Lines equal to the directive (ignoring surrounding whitespace) are dropped
/// wherever they appear, so applying this twice gives the same result.
pub fn inject_shim(content: &str, directive: &str) -> String {
    let mut out = String::with_capacity(content.len() + directive.len() + 1);
    out.push_str(directive);
    out.push('\n');

    for line in content.split_inclusive('\n') {
        if line.trim() == directive {
            continue;
        }
        out.push_str(line);
    }

    out
}

/// True when `content` starts with `directive` and holds no other copy of it
pub fn has_single_shim(content: &str, directive: &str) -> bool {
    content.starts_with(directive) && content.matches(directive).count() == 1
}

/// Injects the shim include into every matching file under `root`
///
/// Returns the files that were processed, in walk order. Files already in
/// the expected shape are left unwritten.
pub fn inject_shim_tree(
    root: &Path,
    directive: &str,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    info!("Processing source files under {}", root.display());
    let mut processed = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file {}", path.display()))?;
        let updated = inject_shim(&content, directive);
        if updated != content {
            fs::write(path, &updated)
                .with_context(|| format!("Failed to write source file {}", path.display()))?;
        }

        debug!("Processed: {}", path.display());
        processed.push(path.to_path_buf());
    }

    info!("Injected platform shim into {} file(s)", processed.len());
    Ok(processed)
}
