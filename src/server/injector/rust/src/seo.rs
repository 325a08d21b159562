/* src/server/injector/rust/src/seo.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-page head metadata. Every field is optional; an unset field simply
/// produces no tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMetadata {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub keywords: Option<String>,
  #[serde(default, rename = "baseURL", alias = "base_url", skip_serializing_if = "Option::is_none")]
  pub base_url: Option<String>,
  /// Open-Graph property name -> value template. Values may contain
  /// `{{BUILDID}}`, `{{BASEURL}}`, `{{CURRENTPATH}}` and `{{CURRENTLANG}}`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub og: Option<BTreeMap<String, String>>,
}

impl SeoMetadata {
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
    self.keywords = Some(keywords.into());
    self
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = Some(base_url.into());
    self
  }

  pub fn with_og(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
    self.og.get_or_insert_with(BTreeMap::new).insert(field.into(), value.into());
    self
  }

  /// Overlay `other` onto `self`. Fields set in `other` win; `og` entries
  /// are merged key by key with `other` winning on conflict.
  pub fn merge(&mut self, other: &SeoMetadata) {
    if other.title.is_some() {
      self.title.clone_from(&other.title);
    }
    if other.description.is_some() {
      self.description.clone_from(&other.description);
    }
    if other.keywords.is_some() {
      self.keywords.clone_from(&other.keywords);
    }
    if other.base_url.is_some() {
      self.base_url.clone_from(&other.base_url);
    }
    if let Some(ref og) = other.og {
      self.merge_og(og);
    }
  }

  pub fn merge_og(&mut self, og: &BTreeMap<String, String>) {
    let target = self.og.get_or_insert_with(BTreeMap::new);
    for (k, v) in og {
      target.insert(k.clone(), v.clone());
    }
  }

  pub fn has_og(&self) -> bool {
    self.og.is_some()
  }

  /// Look up an Open-Graph value by field name, ignoring ASCII case.
  pub fn og_value(&self, field: &str) -> Option<&str> {
    let og = self.og.as_ref()?;
    og.get(field)
      .or_else(|| og.iter().find(|(k, _)| k.eq_ignore_ascii_case(field)).map(|(_, v)| v))
      .map(String::as_str)
  }
}

/// Locale of the current request plus the locales the site is published in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfo {
  pub current: String,
  #[serde(default)]
  pub supported: Vec<String>,
}

impl LocaleInfo {
  pub fn new(current: impl Into<String>, supported: Vec<String>) -> Self {
    Self { current: current.into(), supported }
  }
}
