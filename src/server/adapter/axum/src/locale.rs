/* src/server/adapter/axum/src/locale.rs */

use axum::http::{HeaderMap, HeaderName};
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};

/// Cookie consulted before `Accept-Language`.
pub const LOCALE_COOKIE: &str = "lang";

/// Locales a site is published in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
  pub supported: Vec<String>,
  pub default: String,
}

impl LocaleSettings {
  pub fn new(supported: Vec<String>, default: impl Into<String>) -> Self {
    Self { supported, default: default.into() }
  }

  /// Resolve chain: `lang` cookie -> Accept-Language -> default.
  /// Always returns the configured spelling of a supported locale, or the
  /// default.
  pub fn resolve(&self, headers: &HeaderMap) -> String {
    let header = |name: HeaderName| headers.get(name).and_then(|v| v.to_str().ok());

    if let Some(loc) = header(COOKIE).and_then(|h| self.cookie_locale(h)) {
      return loc;
    }
    if let Some(loc) = header(ACCEPT_LANGUAGE).and_then(|h| self.accept_language_locale(h)) {
      return loc;
    }
    self.default.clone()
  }

  fn find(&self, code: &str) -> Option<String> {
    self.supported.iter().find(|s| s.eq_ignore_ascii_case(code)).cloned()
  }

  fn cookie_locale(&self, header: &str) -> Option<String> {
    header
      .split(';')
      .filter_map(|pair| pair.trim().split_once('='))
      .filter(|(k, _)| k.trim() == LOCALE_COOKIE)
      .find_map(|(_, v)| self.find(v.trim()))
  }

  fn accept_language_locale(&self, header: &str) -> Option<String> {
    let mut entries: Vec<(&str, f64)> = Vec::new();
    for part in header.split(',') {
      let mut segments = part.split(';');
      let lang = segments.next().unwrap_or("").trim();
      if lang.is_empty() {
        continue;
      }
      let q = segments
        .filter_map(|s| s.trim().strip_prefix("q="))
        .find_map(|v| v.parse::<f64>().ok())
        .unwrap_or(1.0);
      entries.push((lang, q));
    }
    // stable sort keeps header order among equal weights
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    entries.iter().find_map(|(lang, _)| {
      // zh-CN -> zh
      self.find(lang).or_else(|| lang.split_once('-').and_then(|(prefix, _)| self.find(prefix)))
    })
  }
}
