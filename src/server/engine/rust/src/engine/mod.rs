/* src/server/engine/rust/src/engine/mod.rs */

mod view;


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::try_join_all;
use rsp_injector::ScannedLayout;
use tracing::debug;

use crate::cache::MemoCache;
use crate::config::{EngineConfig, PartialsSource};
use crate::errors::{ConfigError, LoadError, RenderError};
use crate::fs::{dir_exists, list_files, read_text, relative_slash_path};
use crate::locale::locale_candidates;
use crate::page::{ComponentLoader, PageComponent, Partials};

pub use view::{LayoutChoice, RenderOptions};

type TemplateKey = (PathBuf, Option<String>);

/// Resolves, caches and renders page components.
pub struct ViewEngine {
  config: EngineConfig,
  loader: Arc<dyn ComponentLoader>,
  /// Inline partials by namespace; `None` is the unprefixed set.
  inline_partials: BTreeMap<Option<String>, Partials>,
  templates: MemoCache<TemplateKey, Arc<dyn PageComponent>>,
  listings: MemoCache<PathBuf, Arc<Vec<PathBuf>>>,
  layouts: MemoCache<PathBuf, Arc<ScannedLayout>>,
}

impl ViewEngine {
  pub fn new(config: EngineConfig, loader: impl ComponentLoader + 'static) -> Self {
    Self::with_loader(config, Arc::new(loader))
  }

  pub fn with_loader(config: EngineConfig, loader: Arc<dyn ComponentLoader>) -> Self {
    Self {
      config: config.normalize(),
      loader,
      inline_partials: BTreeMap::new(),
      templates: MemoCache::new("templates"),
      listings: MemoCache::new("listings"),
      layouts: MemoCache::new("layouts"),
    }
  }

  /// Register inline partials, merged over any earlier set in the same
  /// namespace.
  pub fn with_partials(mut self, namespace: Option<&str>, templates: Partials) -> Self {
    self.inline_partials.entry(namespace.map(str::to_string)).or_default().extend(templates);
    self
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  /// Load the component for `path`, trying the locale variants first.
  /// When every candidate fails the last error is returned unchanged.
  pub async fn get_template(
    &self,
    path: &Path,
    locale: Option<&str>,
    cache: bool,
  ) -> Result<Arc<dyn PageComponent>, RenderError> {
    let key = (path.to_path_buf(), locale.map(str::to_ascii_lowercase));
    let loader = Arc::clone(&self.loader);
    self
      .templates
      .get_or_load(key, cache, || async move {
        let mut last_err = LoadError::not_found(path);
        for candidate in locale_candidates(path, locale) {
          match loader.load(&candidate).await {
            Ok(component) => {
              debug!(path = %candidate.display(), "template resolved");
              return Ok(component);
            }
            Err(err) => {
              debug!(path = %candidate.display(), error = %err, "template variant unavailable");
              last_err = err;
            }
          }
        }
        Err(RenderError::Load(last_err))
      })
      .await
  }

  /// Every template under `dir`, keyed by its `/`-separated relative path.
  pub async fn get_templates(
    &self,
    dir: &Path,
    locale: Option<&str>,
    cache: bool,
  ) -> Result<BTreeMap<String, Arc<dyn PageComponent>>, RenderError> {
    let ext = self.config.extname.clone();
    let files = self
      .listings
      .get_or_load(dir.to_path_buf(), cache, || async move {
        list_files(dir, &ext).await.map(Arc::new)
      })
      .await?;

    let loaded =
      try_join_all(files.iter().map(|file| self.get_template(file, locale, cache))).await?;
    Ok(
      files
        .iter()
        .zip(loaded)
        .filter_map(|(file, component)| Some((relative_slash_path(file, dir)?, component)))
        .collect(),
    )
  }

  /// All configured partials: inline registrations plus every partials
  /// directory. Configuration is validated before any file is touched.
  pub async fn get_partials(
    &self,
    locale: Option<&str>,
    cache: bool,
  ) -> Result<Partials, RenderError> {
    let sources = self.config.partials_sources();
    self.check_partials_sources(&sources)?;

    let mut partials = Partials::new();
    for (namespace, templates) in &self.inline_partials {
      for (name, component) in templates {
        partials.insert(prefixed(name, namespace.as_deref()), Arc::clone(component));
      }
    }

    for source in &sources {
      let Some(ref dir) = source.dir else { continue };
      if !dir_exists(dir).await? {
        debug!(dir = %dir.display(), "partials directory absent, skipped");
        continue;
      }
      for (rel, component) in self.get_templates(dir, locale, cache).await? {
        let name = self.template_name(Path::new(&rel), source.namespace.as_deref());
        partials.insert(name, component);
      }
    }
    Ok(partials)
  }

  fn check_partials_sources(&self, sources: &[PartialsSource]) -> Result<(), ConfigError> {
    for (index, source) in sources.iter().enumerate() {
      if source.dir.is_none() && !self.inline_partials.contains_key(&source.namespace) {
        return Err(ConfigError::MissingPartials { index, namespace: source.namespace.clone() });
      }
    }
    Ok(())
  }

  /// Partial name for a template path: extension dropped, `/` separators,
  /// prefixed with `namespace/` when given.
  pub fn template_name(&self, path: &Path, namespace: Option<&str>) -> String {
    let parts: Vec<_> = path.components().map(|c| c.as_os_str().to_string_lossy()).collect();
    let joined = parts.join("/");
    let name = joined.strip_suffix(self.config.extname.as_str()).unwrap_or(&joined);
    prefixed(name, namespace)
  }

  /// `main` -> `<layoutsDir>/main.html`. Names that already carry an
  /// extension or an absolute path are kept as they are.
  pub fn resolve_layout_path(&self, layout: &str) -> PathBuf {
    let mut path = PathBuf::from(layout);
    if path.extension().is_none() {
      path = PathBuf::from(format!("{layout}{}", self.config.wrapper_ext));
    }
    if path.is_absolute() { path } else { self.config.layouts_dir.join(path) }
  }

  /// Read and scan a layout document, cached by absolute path.
  pub async fn get_layout(
    &self,
    path: &Path,
    cache: bool,
  ) -> Result<Arc<ScannedLayout>, RenderError> {
    let key = absolute(path);
    self
      .layouts
      .get_or_load(key.clone(), cache, || async move {
        let text = read_text(&key).await?;
        Ok(Arc::new(ScannedLayout::new(text)))
      })
      .await
  }

  /// Drop every cached entry for `path`: all locale variants of a template,
  /// its directory listing and its layout.
  pub fn invalidate(&self, path: &Path) {
    self.templates.retain(|(cached, _)| cached != path);
    self.listings.remove(&path.to_path_buf());
    self.layouts.remove(&absolute(path));
  }

  pub fn clear(&self) {
    self.templates.clear();
    self.listings.clear();
    self.layouts.clear();
  }
}

fn prefixed(name: &str, namespace: Option<&str>) -> String {
  match namespace {
    Some(ns) if !ns.is_empty() => format!("{ns}/{name}"),
    _ => name.to_string(),
  }
}

fn absolute(path: &Path) -> PathBuf {
  std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
