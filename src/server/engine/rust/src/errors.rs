/* src/server/engine/rust/src/errors.rs */

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by component implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A page component could not be resolved from a path.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("no component at {}", path.display())]
  NotFound { path: PathBuf },
  #[error("failed to read component {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid component {}: {message}", path.display())]
  Invalid { path: PathBuf, message: String },
}

impl LoadError {
  pub fn not_found(path: impl Into<PathBuf>) -> Self {
    Self::NotFound { path: path.into() }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid config {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("partials entry {index} has no directory and no inline templates{}", namespace_suffix(.namespace))]
  MissingPartials { index: usize, namespace: Option<String> },
}

fn namespace_suffix(namespace: &Option<String>) -> String {
  namespace.as_ref().map(|ns| format!(" for namespace \"{ns}\"")).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum RenderError {
  /// Module resolution failures propagate as-is.
  #[error(transparent)]
  Load(#[from] LoadError),
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to list {}: {source}", path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
  #[error("component {} failed to render: {source}", path.display())]
  Component {
    path: PathBuf,
    #[source]
    source: BoxError,
  },
  #[error("render task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl RenderError {
  pub fn is_not_found(&self) -> bool {
    match self {
      Self::Load(err) => err.is_not_found(),
      Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
      _ => false,
    }
  }
}
