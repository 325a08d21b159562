/* src/server/engine/rust/src/page.rs */

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use rsp_injector::{LayoutHooks, RenderContext, SeoMetadata};
use serde_json::{Map, Value};

use crate::errors::{BoxError, LoadError};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Named partial components, keyed by `namespace/relative/name`.
pub type Partials = BTreeMap<String, Arc<dyn PageComponent>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
  /// Plain markup, no hydration attributes.
  Static,
  /// Markup the client side can hydrate.
  Isomorphic,
}

/// Everything a component sees while rendering.
pub struct RenderProps {
  pub context: RenderContext,
  pub data: Value,
  pub helpers: Map<String, Value>,
  pub partials: Partials,
  /// View name relative to the views root, without extension.
  pub view: Option<String>,
  pub file_path: PathBuf,
}

/// A loaded page. Layout capabilities come from [`LayoutHooks`]; every one
/// of them is optional.
pub trait PageComponent: LayoutHooks + Send + Sync {
  fn render(&self, props: &RenderProps, mode: RenderMode) -> Result<String, BoxError>;

  fn render_isomorphic(&self) -> bool {
    false
  }

  /// Markup for a named `<REACT "section" />` layout slot, given the same
  /// props the body was rendered with. Defaults to
  /// [`LayoutHooks::render_raw`] over the request context.
  fn render_section(&self, section: &str, props: &RenderProps, seo: &SeoMetadata) -> Option<String> {
    self.render_raw(section, &props.context, seo)
  }
}

/// Resolves a template path to a component.
///
/// Missing paths must yield [`LoadError::NotFound`] so locale fallback can
/// move on to the next candidate.
pub trait ComponentLoader: Send + Sync {
  fn load(&self, path: &Path) -> BoxFuture<Result<Arc<dyn PageComponent>, LoadError>>;
}

/// Loader over components registered in code, keyed by template path.
#[derive(Default)]
pub struct ComponentRegistry {
  components: HashMap<PathBuf, Arc<dyn PageComponent>>,
}

impl ComponentRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(mut self, path: impl Into<PathBuf>, component: impl PageComponent + 'static) -> Self {
    self.components.insert(path.into(), Arc::new(component));
    self
  }

  pub fn register_arc(mut self, path: impl Into<PathBuf>, component: Arc<dyn PageComponent>) -> Self {
    self.components.insert(path.into(), component);
    self
  }

  pub fn len(&self) -> usize {
    self.components.len()
  }

  pub fn is_empty(&self) -> bool {
    self.components.is_empty()
  }
}

impl ComponentLoader for ComponentRegistry {
  fn load(&self, path: &Path) -> BoxFuture<Result<Arc<dyn PageComponent>, LoadError>> {
    let found = self.components.get(path).cloned().ok_or_else(|| LoadError::not_found(path));
    Box::pin(async move { found })
  }
}

/// Pre-rendered markup read from a template file.
#[derive(Debug, Clone, Default)]
pub struct Markup {
  html: String,
  seo: Option<SeoMetadata>,
}

impl Markup {
  pub fn new(html: impl Into<String>) -> Self {
    Self { html: html.into(), seo: None }
  }

  pub fn with_seo(mut self, seo: SeoMetadata) -> Self {
    self.seo = Some(seo);
    self
  }
}

impl LayoutHooks for Markup {
  fn seo(&self) -> Option<&SeoMetadata> {
    self.seo.as_ref()
  }
}

impl PageComponent for Markup {
  fn render(&self, _props: &RenderProps, _mode: RenderMode) -> Result<String, BoxError> {
    Ok(self.html.clone())
  }
}

/// Loads every template file as static [`Markup`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupLoader;

impl ComponentLoader for MarkupLoader {
  fn load(&self, path: &Path) -> BoxFuture<Result<Arc<dyn PageComponent>, LoadError>> {
    let path = path.to_path_buf();
    Box::pin(async move {
      match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Arc::new(Markup::new(html)) as Arc<dyn PageComponent>),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound { path }),
        Err(source) => Err(LoadError::Io { path, source }),
      }
    })
  }
}
