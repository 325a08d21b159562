/* src/server/engine/rust/src/fs.rs */

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::RenderError;

/// Every file under `dir` (recursively, following symlinks) whose name ends
/// with `ext`, sorted.
pub async fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, RenderError> {
  let dir = dir.to_path_buf();
  let ext = ext.to_string();
  tokio::task::spawn_blocking(move || walk(&dir, &ext)).await?
}

fn walk(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, RenderError> {
  let mut files = Vec::new();
  for entry in WalkDir::new(dir).follow_links(true) {
    let entry = entry.map_err(|source| RenderError::Walk { path: dir.to_path_buf(), source })?;
    if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(ext) {
      files.push(entry.into_path());
    }
  }
  files.sort();
  Ok(files)
}

pub async fn read_text(path: &Path) -> Result<String, RenderError> {
  tokio::fs::read_to_string(path)
    .await
    .map_err(|source| RenderError::Io { path: path.to_path_buf(), source })
}

/// `false` only when `path` is definitely absent; other I/O errors surface.
pub async fn dir_exists(path: &Path) -> Result<bool, RenderError> {
  match tokio::fs::metadata(path).await {
    Ok(meta) => Ok(meta.is_dir()),
    Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(source) => Err(RenderError::Io { path: path.to_path_buf(), source }),
  }
}

/// `a/b/c.rt` relative to `base`, with `/` separators on every platform.
pub fn relative_slash_path(path: &Path, base: &Path) -> Option<String> {
  let rel = path.strip_prefix(base).ok()?;
  let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
  Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[tokio::test]
  async fn list_files_filters_by_extension_recursively() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
    fs::write(dir.path().join("a.rt"), "").unwrap();
    fs::write(dir.path().join("b.html"), "").unwrap();
    fs::write(dir.path().join("nested/c.rt"), "").unwrap();
    fs::write(dir.path().join("nested/deeper/d.rt"), "").unwrap();

    let files = list_files(dir.path(), ".rt").await.unwrap();
    let names: Vec<_> =
      files.iter().map(|f| relative_slash_path(f, dir.path()).unwrap()).collect();
    assert_eq!(names, vec!["a.rt", "nested/c.rt", "nested/deeper/d.rt"]);
  }

  #[tokio::test]
  async fn list_files_missing_dir_is_walk_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = list_files(&dir.path().join("missing"), ".rt").await.unwrap_err();
    assert!(matches!(err, RenderError::Walk { .. }));
  }

  #[tokio::test]
  async fn read_text_missing_file_carries_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.html");
    let err = read_text(&path).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("nope.html"));
  }

  #[tokio::test]
  async fn dir_exists_cases() {
    let dir = tempfile::tempdir().unwrap();
    assert!(dir_exists(dir.path()).await.unwrap());
    assert!(!dir_exists(&dir.path().join("missing")).await.unwrap());
  }
}
