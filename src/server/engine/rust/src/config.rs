/* src/server/engine/rust/src/config.rs */

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::ConfigError;

/// Engine options. Keys are accepted in snake_case or in the camelCase form
/// used by `rsp.toml` files (`wrapperExt`, `layoutsDir`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
  /// Template extension, normalized to start with `.`.
  #[serde(default = "default_extname")]
  pub extname: String,
  #[serde(default = "default_wrapper_ext", alias = "wrapperExt")]
  pub wrapper_ext: String,
  #[serde(default = "default_layouts_dir", alias = "layoutsDir")]
  pub layouts_dir: PathBuf,
  #[serde(default, alias = "partialsDir")]
  pub partials_dir: Option<PartialsDir>,
  #[serde(default, alias = "defaultLayout")]
  pub default_layout: Option<String>,
  /// Root used to derive view names handed to components.
  #[serde(default, alias = "views")]
  pub views_root: Option<PathBuf>,
  /// Passed through to every component as `RenderProps::helpers`.
  #[serde(default)]
  pub helpers: Map<String, Value>,
  /// Reserved for compilers; the engine never reads it.
  #[serde(default, alias = "compilerOptions")]
  pub compiler_options: Option<Value>,
}

/// `partialsDir = "views/partials"` or a list of paths and tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PartialsDir {
  One(PathBuf),
  Many(Vec<PartialsEntry>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PartialsEntry {
  Path(PathBuf),
  /// A table without `dir` refers to inline partials registered on the
  /// engine under `namespace`.
  Source {
    #[serde(default)]
    dir: Option<PathBuf>,
    #[serde(default)]
    namespace: Option<String>,
  },
}

/// One normalized partials source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialsSource {
  pub dir: Option<PathBuf>,
  pub namespace: Option<String>,
}

fn default_extname() -> String {
  ".rt".into()
}

fn default_wrapper_ext() -> String {
  ".html".into()
}

fn default_layouts_dir() -> PathBuf {
  PathBuf::from("views/layouts/")
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      extname: default_extname(),
      wrapper_ext: default_wrapper_ext(),
      layouts_dir: default_layouts_dir(),
      partials_dir: None,
      default_layout: None,
      views_root: None,
      helpers: Map::new(),
      compiler_options: None,
    }
  }
}

impl EngineConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    Self::from_toml(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
  }

  pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }

  pub fn with_layouts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.layouts_dir = dir.into();
    self
  }

  pub fn with_default_layout(mut self, layout: impl Into<String>) -> Self {
    self.default_layout = Some(layout.into());
    self
  }

  pub fn with_partials_dir(mut self, partials: PartialsDir) -> Self {
    self.partials_dir = Some(partials);
    self
  }

  pub fn with_views_root(mut self, root: impl Into<PathBuf>) -> Self {
    self.views_root = Some(root.into());
    self
  }

  pub fn with_helper(mut self, name: impl Into<String>, value: Value) -> Self {
    self.helpers.insert(name.into(), value);
    self
  }

  /// Rewrite extensions into their canonical `.ext` form.
  pub(crate) fn normalize(mut self) -> Self {
    self.extname = normalize_ext(&self.extname);
    self
  }

  /// Configured partials sources in declaration order.
  pub fn partials_sources(&self) -> Vec<PartialsSource> {
    match self.partials_dir {
      None => Vec::new(),
      Some(PartialsDir::One(ref dir)) => vec![PartialsSource { dir: Some(dir.clone()), namespace: None }],
      Some(PartialsDir::Many(ref entries)) => entries
        .iter()
        .map(|entry| match entry {
          PartialsEntry::Path(dir) => PartialsSource { dir: Some(dir.clone()), namespace: None },
          PartialsEntry::Source { dir, namespace } => {
            PartialsSource { dir: dir.clone(), namespace: namespace.clone() }
          }
        })
        .collect(),
    }
  }
}

fn normalize_ext(ext: &str) -> String {
  if ext.is_empty() || ext.starts_with('.') { ext.to_string() } else { format!(".{ext}") }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_from_empty_toml() {
    let config = EngineConfig::from_toml("").unwrap();
    assert_eq!(config.extname, ".rt");
    assert_eq!(config.wrapper_ext, ".html");
    assert_eq!(config.layouts_dir, PathBuf::from("views/layouts/"));
    assert!(config.partials_dir.is_none());
    assert!(config.default_layout.is_none());
    assert!(config.helpers.is_empty());
  }

  #[test]
  fn camel_case_keys() {
    let config = EngineConfig::from_toml(
      r#"
extname = "jsx"
wrapperExt = ".htm"
layoutsDir = "site/layouts"
defaultLayout = "main"
views = "site/views"

[helpers]
siteName = "Example"

[compilerOptions]
strict = true
"#,
    )
    .unwrap()
    .normalize();
    assert_eq!(config.extname, ".jsx");
    assert_eq!(config.wrapper_ext, ".htm");
    assert_eq!(config.layouts_dir, PathBuf::from("site/layouts"));
    assert_eq!(config.default_layout.as_deref(), Some("main"));
    assert_eq!(config.views_root, Some(PathBuf::from("site/views")));
    assert_eq!(config.helpers["siteName"], "Example");
    assert!(config.compiler_options.is_some());
  }

  #[test]
  fn snake_case_keys() {
    let config = EngineConfig::from_toml(r#"wrapper_ext = ".xhtml""#).unwrap();
    assert_eq!(config.wrapper_ext, ".xhtml");
  }

  #[test]
  fn partials_dir_single_path() {
    let config = EngineConfig::from_toml(r#"partialsDir = "views/partials""#).unwrap();
    assert_eq!(
      config.partials_sources(),
      vec![PartialsSource { dir: Some("views/partials".into()), namespace: None }]
    );
  }

  #[test]
  fn partials_dir_mixed_list() {
    let config = EngineConfig::from_toml(
      r#"partialsDir = ["views/partials", { dir = "shared", namespace = "ui" }, { namespace = "inline" }]"#,
    )
    .unwrap();
    assert_eq!(
      config.partials_sources(),
      vec![
        PartialsSource { dir: Some("views/partials".into()), namespace: None },
        PartialsSource { dir: Some("shared".into()), namespace: Some("ui".into()) },
        PartialsSource { dir: None, namespace: Some("inline".into()) },
      ]
    );
  }

  #[test]
  fn normalize_keeps_dotted_ext() {
    assert_eq!(normalize_ext(".rt"), ".rt");
    assert_eq!(normalize_ext("rt"), ".rt");
  }

  #[test]
  fn load_reports_path_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsp.toml");
    std::fs::write(&path, "extname = [").unwrap();
    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("rsp.toml"));
  }

  #[test]
  fn load_missing_file() {
    let err = EngineConfig::load(Path::new("/nonexistent/rsp.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
  }
}
