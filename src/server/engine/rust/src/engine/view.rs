/* src/server/engine/rust/src/engine/view.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rsp_injector::{LayoutHooks, RenderContext, SeoMetadata};
use serde_json::{Map, Value};
use tracing::{Instrument, debug, error, info_span};

use super::ViewEngine;
use crate::errors::RenderError;
use crate::fs::relative_slash_path;
use crate::page::{PageComponent, Partials, RenderMode, RenderProps};

/// Which layout wraps a rendered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LayoutChoice {
  /// The engine's `default_layout`, if any.
  #[default]
  Default,
  /// Return the page body without a layout.
  Disabled,
  /// A layout name or path, resolved with `resolve_layout_path`.
  Named(String),
}

/// Per-render options.
pub struct RenderOptions {
  pub context: RenderContext,
  pub data: Value,
  /// Merged over the engine's helpers; these win.
  pub helpers: Map<String, Value>,
  /// Merged over the engine's partials; these win.
  pub partials: Partials,
  pub layout: LayoutChoice,
  /// `false` loads everything fresh and invalidates what it touched.
  pub cache: bool,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      context: RenderContext::default(),
      data: Value::Null,
      helpers: Map::new(),
      partials: Partials::new(),
      layout: LayoutChoice::Default,
      cache: true,
    }
  }
}

impl RenderOptions {
  pub fn new(context: RenderContext) -> Self {
    Self { context, ..Self::default() }
  }

  pub fn with_data(mut self, data: Value) -> Self {
    self.data = data;
    self
  }

  pub fn with_helper(mut self, name: impl Into<String>, value: Value) -> Self {
    self.helpers.insert(name.into(), value);
    self
  }

  pub fn with_partial(
    mut self,
    name: impl Into<String>,
    component: Arc<dyn PageComponent>,
  ) -> Self {
    self.partials.insert(name.into(), component);
    self
  }

  pub fn with_layout(mut self, layout: LayoutChoice) -> Self {
    self.layout = layout;
    self
  }

  pub fn without_cache(mut self) -> Self {
    self.cache = false;
    self
  }
}

impl ViewEngine {
  /// Render the template at `file_path` without a layout.
  pub async fn render(
    &self,
    file_path: &Path,
    options: RenderOptions,
  ) -> Result<String, RenderError> {
    let (_, _, body) = self.render_page(file_path, None, options).await?;
    Ok(body)
  }

  /// Render a view and wrap it in its layout, reporting through `callback`.
  ///
  /// The work runs on a spawned task, so `callback` is never invoked before
  /// this returns. It is invoked exactly once. Must be called from within a
  /// tokio runtime.
  pub fn render_view<F>(
    self: &Arc<Self>,
    view_path: impl Into<PathBuf>,
    options: RenderOptions,
    callback: F,
  ) where
    F: FnOnce(Result<String, RenderError>) + Send + 'static,
  {
    let engine = Arc::clone(self);
    let view_path = view_path.into();
    tokio::spawn(async move {
      // a panicking component unwinds the inner task only
      let render = tokio::spawn(async move { engine.render_view_async(&view_path, options).await });
      let result = match render.await {
        Ok(result) => result,
        Err(err) => {
          error!(error = %err, "render task aborted");
          Err(RenderError::Task(err))
        }
      };
      callback(result);
    });
  }

  pub async fn render_view_async(
    &self,
    view_path: &Path,
    options: RenderOptions,
  ) -> Result<String, RenderError> {
    let span = info_span!("render_view", view = %view_path.display());
    async move {
      let view = self.view_name(view_path);
      let layout = match options.layout {
        LayoutChoice::Disabled => None,
        LayoutChoice::Named(ref name) => Some(name.clone()),
        LayoutChoice::Default => self.config.default_layout.clone(),
      };
      let cache = options.cache;

      let (component, props, body) = self.render_page(view_path, view, options).await?;
      let Some(layout) = layout else {
        debug!("no layout, returning page body");
        return Ok(body);
      };

      let scanned = self.get_layout(&self.resolve_layout_path(&layout), cache).await?;
      let hooks = PageHooks { component: &*component, props: &props };
      Ok(scanned.render(&body, &hooks, &props.context))
    }
    .instrument(span)
    .await
  }

  /// View name relative to `views_root`, extension dropped.
  fn view_name(&self, view_path: &Path) -> Option<String> {
    let root = self.config.views_root.as_deref()?;
    let rel = relative_slash_path(view_path, root)?;
    Some(self.template_name(Path::new(&rel), None))
  }

  /// Load the template and partials concurrently, then render the body.
  /// The props are handed back for the layout's named sections.
  async fn render_page(
    &self,
    file_path: &Path,
    view: Option<String>,
    options: RenderOptions,
  ) -> Result<(Arc<dyn PageComponent>, RenderProps, String), RenderError> {
    let RenderOptions { context, data, helpers, partials: overrides, cache, .. } = options;
    let locale = context.current_lang().map(str::to_string);

    let (component, mut partials) = tokio::try_join!(
      self.get_template(file_path, locale.as_deref(), cache),
      self.get_partials(locale.as_deref(), cache),
    )?;
    partials.extend(overrides);

    let mut merged_helpers = self.config.helpers.clone();
    merged_helpers.extend(helpers);

    let mode =
      if component.render_isomorphic() { RenderMode::Isomorphic } else { RenderMode::Static };
    let props = RenderProps {
      context,
      data,
      helpers: merged_helpers,
      partials,
      view,
      file_path: file_path.to_path_buf(),
    };
    let body = component
      .render(&props, mode)
      .map_err(|source| RenderError::Component { path: file_path.to_path_buf(), source })?;
    Ok((component, props, body))
  }
}

/// Layout capabilities of a rendered page. Named sections see the page's
/// props (data, merged helpers and partials, view name).
struct PageHooks<'a> {
  component: &'a dyn PageComponent,
  props: &'a RenderProps,
}

impl LayoutHooks for PageHooks<'_> {
  fn seo(&self) -> Option<&SeoMetadata> {
    self.component.seo()
  }

  fn extend_seo(&self, seo: &SeoMetadata, ctx: &RenderContext) -> Option<SeoMetadata> {
    self.component.extend_seo(seo, ctx)
  }

  fn render_raw(&self, section: &str, _ctx: &RenderContext, seo: &SeoMetadata) -> Option<String> {
    self.component.render_section(section, self.props, seo)
  }

  fn open_graph(&self, ctx: &RenderContext) -> Option<BTreeMap<String, String>> {
    self.component.open_graph(ctx)
  }
}
