//! Shared file-system helpers for the store and link operations.

use std::path::Path;

use anyhow::{Context as _, Result};

/// Remove an existing file or symlink at `path`, including broken symlinks.
///
/// Does nothing if `path` does not exist. On Windows, directory symlinks
/// must be removed with `remove_dir` rather than `remove_file`.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    #[cfg(windows)]
    if meta.is_symlink() && path.is_dir() {
        return std::fs::remove_dir(path)
            .with_context(|| format!("remove existing: {}", path.display()));
    }
    let _ = meta;
    std::fs::remove_file(path).with_context(|| format!("remove existing: {}", path.display()))
}

/// Create a symlink at `target` pointing to `source` (platform-specific).
///
/// # Errors
///
/// Returns an error if the link cannot be created, such as when something
/// already occupies `target` or symlink creation is not permitted.
pub fn create_symlink(source: &Path, target: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, target)
            .with_context(|| format!("create link: {}", target.display()))?;
    }

    #[cfg(windows)]
    {
        let result = if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, target)
        } else {
            std::os::windows::fs::symlink_file(source, target)
        };
        result.with_context(|| format!("create link: {}", target.display()))?;
    }

    Ok(())
}

/// Recursively copy a directory tree.
///
/// Symlinks within the source tree are *followed*: directory symlinks are
/// recursed into and their contents materialised rather than copying the
/// link itself.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).with_context(|| {
                format!("copying {} to {}", src_path.display(), dst_path.display())
            })?;
        }
    }
    Ok(())
}

/// Move a file or directory, falling back to copy-and-remove when a plain
/// rename fails (e.g. across file-system boundaries).
///
/// # Errors
///
/// Returns an error if neither the rename nor the fallback copy succeeds.
pub fn move_path(src: &Path, dst: &Path) -> Result<()> {
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    if src.is_dir() {
        copy_dir_recursive(src, dst)?;
        std::fs::remove_dir_all(src)
            .with_context(|| format!("removing {} after copy", src.display()))?;
    } else {
        std::fs::copy(src, dst)
            .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
        std::fs::remove_file(src)
            .with_context(|| format!("removing {} after copy", src.display()))?;
    }
    Ok(())
}
