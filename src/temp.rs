use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// Reserves `file_name` inside a fresh temporary directory.
///
/// The directory and everything in it is removed when the returned
/// `TempDir` is dropped, so keep it alive for as long as the path is used.
pub fn create_temp_file<P: AsRef<Path>>(file_name: P) -> Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let temp_path = temp_dir.path().join(
        file_name
            .as_ref()
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid temp filename"))?,
    );

    Ok((temp_dir, temp_path))
}

/// Writes `contents` to a new temporary file named `file_name`.
pub fn write_temp_file<P: AsRef<Path>>(file_name: P, contents: &str) -> Result<(TempDir, PathBuf)> {
    let (temp_dir, temp_path) = create_temp_file(file_name)?;
    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    Ok((temp_dir, temp_path))
}
