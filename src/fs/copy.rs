//! Recursive copy helpers

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Copies the contents of `src` into `dst`, merging with what is already there
///
/// `dst` is created if absent. Existing files with the same relative path are
/// overwritten; everything else in `dst` is left alone. Symlinks are followed
/// and copied as the files and directories they point to. Returns the number
/// of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("Failed to create {}", dst.display()))?;

    let mut copied = 0;
    let walker = WalkBuilder::new(src)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = match entry.path().strip_prefix(src) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let target = dst.join(relative);

        let file_type = match entry.file_type() {
            Some(t) => t,
            None => continue,
        };

        if file_type.is_dir() {
            debug!("Copying directory: {}", entry.path().display());
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            debug!("Copying file: {}", entry.path().display());
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copies a single file, creating the destination's parent directories
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(src, dst).with_context(|| {
        format!("Failed to copy {} to {}", src.display(), dst.display())
    })?;
    Ok(())
}
