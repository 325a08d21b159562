/* src/server/engine/rust/src/locale.rs */

use std::path::{Path, PathBuf};

/// Template paths to try for `locale`, most specific first:
/// `home.es-mx.rt`, `home.es.rt`, `home.rt`.
pub fn locale_candidates(path: &Path, locale: Option<&str>) -> Vec<PathBuf> {
  let mut candidates = Vec::with_capacity(3);
  if let Some(locale) = locale.map(str::to_ascii_lowercase).filter(|l| !l.is_empty()) {
    candidates.push(variant(path, &locale));
    if let Some((language, _)) = locale.split_once(['-', '_']) {
      candidates.push(variant(path, language));
    }
  }
  candidates.push(path.to_path_buf());
  candidates.dedup();
  candidates
}

fn variant(path: &Path, locale: &str) -> PathBuf {
  let Some(stem) = path.file_stem() else {
    return path.to_path_buf();
  };
  let mut name = stem.to_os_string();
  name.push(".");
  name.push(locale);
  if let Some(ext) = path.extension() {
    name.push(".");
    name.push(ext);
  }
  path.with_file_name(name)
}
