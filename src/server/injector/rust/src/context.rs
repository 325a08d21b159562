/* src/server/injector/rust/src/context.rs */

use serde_json::Value;

use crate::helpers::normalize_current_path;
use crate::seo::{LocaleInfo, SeoMetadata};

/// Per-request data available while a page and its layout are rendered.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
  /// Cache-busting build identifier, emitted as `v=<build>`.
  pub build: String,
  /// Request URL as received (path plus optional query).
  pub request_url: String,
  /// Request-level SEO metadata; page components may override it.
  pub seo: SeoMetadata,
  pub locale: Option<LocaleInfo>,
  /// Free-form request locals, passed through to components untouched.
  pub locals: serde_json::Map<String, Value>,
}

impl RenderContext {
  pub fn new(request_url: impl Into<String>) -> Self {
    Self { request_url: request_url.into(), ..Self::default() }
  }

  pub fn with_build(mut self, build: impl Into<String>) -> Self {
    self.build = build.into();
    self
  }

  pub fn with_seo(mut self, seo: SeoMetadata) -> Self {
    self.seo = seo;
    self
  }

  pub fn with_locale(mut self, locale: LocaleInfo) -> Self {
    self.locale = Some(locale);
    self
  }

  pub fn with_local(mut self, key: impl Into<String>, value: Value) -> Self {
    self.locals.insert(key.into(), value);
    self
  }

  pub fn current_lang(&self) -> Option<&str> {
    self.locale.as_ref().map(|l| l.current.as_str())
  }

  /// Request path used for `{{CURRENTPATH}}`.
  pub fn current_path(&self) -> String {
    normalize_current_path(&self.request_url)
  }
}
