/* src/server/adapter/axum/src/lib.rs */

mod error;
mod locale;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{HeaderMap, Uri};
use axum::response::Html;
use axum::routing::{MethodRouter, get};
use rsp_engine::{RenderOptions, ViewEngine};
use rsp_injector::{LocaleInfo, RenderContext, SeoMetadata};
use serde_json::Value;
use tokio::sync::oneshot;

pub use error::AxumError;
pub use locale::{LOCALE_COOKIE, LocaleSettings};

/// Re-export the engine for convenience
pub use rsp_engine;

/// Renders views for axum handlers.
///
/// Builds the per-request [`RenderContext`] (URL, build id, locale, site
/// metadata) and drives [`ViewEngine::render_view`].
pub struct ViewRenderer {
  engine: Arc<ViewEngine>,
  views_dir: PathBuf,
  build: String,
  locales: Option<LocaleSettings>,
  seo: SeoMetadata,
}

impl ViewRenderer {
  pub fn new(engine: Arc<ViewEngine>, views_dir: impl Into<PathBuf>) -> Self {
    Self {
      engine,
      views_dir: views_dir.into(),
      build: String::new(),
      locales: None,
      seo: SeoMetadata::default(),
    }
  }

  pub fn with_build(mut self, build: impl Into<String>) -> Self {
    self.build = build.into();
    self
  }

  pub fn with_locales(mut self, settings: LocaleSettings) -> Self {
    self.locales = Some(settings);
    self
  }

  /// Site-wide metadata; per-request metadata passed to `render` wins.
  pub fn with_seo(mut self, seo: SeoMetadata) -> Self {
    self.seo = seo;
    self
  }

  pub fn engine(&self) -> &Arc<ViewEngine> {
    &self.engine
  }

  /// `home` -> `<views_dir>/home<extname>`.
  pub fn view_path(&self, view: &str) -> PathBuf {
    let mut path = self.views_dir.join(view);
    if Path::new(view).extension().is_none() {
      let mut name = path.into_os_string();
      name.push(&self.engine.config().extname);
      path = PathBuf::from(name);
    }
    path
  }

  /// Per-request context. `seo` is overlaid on the site-wide metadata.
  pub fn context(
    &self,
    uri: &Uri,
    headers: &HeaderMap,
    seo: Option<&SeoMetadata>,
  ) -> RenderContext {
    let url = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str()).to_string();
    let mut merged = self.seo.clone();
    if let Some(seo) = seo {
      merged.merge(seo);
    }
    let mut ctx = RenderContext::new(url).with_build(self.build.clone()).with_seo(merged);
    if let Some(ref settings) = self.locales {
      ctx = ctx.with_locale(LocaleInfo::new(settings.resolve(headers), settings.supported.clone()));
    }
    ctx
  }

  pub async fn render(
    &self,
    view: &str,
    uri: &Uri,
    headers: &HeaderMap,
    seo: Option<SeoMetadata>,
    data: Value,
  ) -> Result<Html<String>, AxumError> {
    let options = RenderOptions::new(self.context(uri, headers, seo.as_ref())).with_data(data);
    let (tx, rx) = oneshot::channel();
    self.engine.render_view(self.view_path(view), options, move |result| {
      // receiver gone means the client went away
      let _ = tx.send(result);
    });
    let result = rx.await.map_err(|_| AxumError::internal("render task ended without a result"))?;
    Ok(Html(result?))
  }
}

/// A GET route that renders `view` for every request.
pub fn view_route<S>(renderer: Arc<ViewRenderer>, view: impl Into<String>) -> MethodRouter<S>
where
  S: Clone + Send + Sync + 'static,
{
  let view = view.into();
  get(move |uri: Uri, headers: HeaderMap| {
    let renderer = Arc::clone(&renderer);
    let view = view.clone();
    async move { renderer.render(&view, &uri, &headers, None, Value::Null).await }
  })
}
