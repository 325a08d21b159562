/* src/server/injector/rust/src/og.rs */

//! Open-Graph / Twitter / canonical tag construction for `<OG "field" />`
//! placeholders.

use crate::context::RenderContext;
use crate::helpers::{collapse_slashes, escape_html};
use crate::seo::{LocaleInfo, SeoMetadata};

const TAG_SEPARATOR: &str = "\n    ";

/// Build the tag(s) for one OG field. `None` when the value backing the
/// field is absent; that is never an error.
pub fn build_og_tags(field: &str, seo: &SeoMetadata, ctx: &RenderContext) -> Option<String> {
  let field = field.to_ascii_lowercase();
  let vars = Substitutions::new(seo, ctx);
  let value = seo.og_value(&field).map(|raw| vars.apply(raw));

  match field.as_str() {
    "twitter:site" | "twitter:domain" => value.map(|v| meta_name(&field, &v)),
    // title and description come from the SEO bag, not the OG block
    "title" => seo
      .title
      .as_deref()
      .map(|t| join(&[meta_property("og:title", t), meta_name("twitter:title", t)])),
    "description" => seo.description.as_deref().map(|d| meta_property("og:description", d)),
    "image" => {
      value.map(|v| join(&[meta_property("og:image", &v), meta_name("twitter:image", &v)]))
    }
    "url" => {
      let raw = seo.og_value("url")?;
      match ctx.locale {
        Some(ref locale) => Some(localized_url_tags(raw, &vars, locale)),
        None => {
          let url = vars.apply(raw);
          Some(join(&[meta_property("og:url", &url), link_canonical(&url)]))
        }
      }
    }
    _ => value.map(|v| meta_property(&format!("og:{field}"), &v)),
  }
}

/// Canonical + content-language + one alternate per other supported locale,
/// closed by an `x-default` alternate without any locale.
fn localized_url_tags(raw: &str, vars: &Substitutions<'_>, locale: &LocaleInfo) -> String {
  let canonical = vars.apply(raw);
  let unprefixed = strip_locale_prefix(&vars.path, &locale.current);

  let mut tags = vec![
    meta_property("og:url", &canonical),
    link_canonical(&canonical),
    format!(r#"<meta http-equiv="content-language" content="{}" />"#, escape_html(&locale.current)),
  ];

  for code in &locale.supported {
    if code.eq_ignore_ascii_case(&locale.current) {
      continue;
    }
    let href = vars.for_locale(code, unprefixed).apply(raw);
    tags.push(link_alternate(code, &href));
  }

  let default_href = collapse_slashes(&vars.for_locale("", unprefixed).apply(raw));
  tags.push(link_alternate("x-default", &default_href));

  join(&tags)
}

/// `/en/about/` with locale `en` -> `/about/`. `None` when the path does not
/// start with the locale segment.
fn strip_locale_prefix<'p>(path: &'p str, lang: &str) -> Option<&'p str> {
  if lang.is_empty() {
    return None;
  }
  let rest = path.strip_prefix('/')?.strip_prefix(lang)?;
  if rest.is_empty() {
    Some("/")
  } else if rest.starts_with('/') {
    Some(rest)
  } else {
    None
  }
}

struct Substitutions<'a> {
  build: &'a str,
  base_url: &'a str,
  path: String,
  lang: &'a str,
}

impl<'a> Substitutions<'a> {
  fn new(seo: &'a SeoMetadata, ctx: &'a RenderContext) -> Self {
    Self {
      build: &ctx.build,
      base_url: seo.base_url.as_deref().unwrap_or_default(),
      path: ctx.current_path(),
      lang: ctx.current_lang().unwrap_or_default(),
    }
  }

  /// Same substitutions with another locale. When the request path carried
  /// the current locale as its first segment, the segment is swapped too.
  fn for_locale<'b>(&'b self, lang: &'b str, unprefixed: Option<&str>) -> Substitutions<'b> {
    let path = match unprefixed {
      Some(rest) if lang.is_empty() => rest.to_string(),
      Some(rest) => format!("/{lang}{rest}"),
      None => self.path.clone(),
    };
    Substitutions { build: self.build, base_url: self.base_url, path, lang }
  }

  fn apply(&self, raw: &str) -> String {
    raw
      .replace("{{BUILDID}}", &format!("v={}", self.build))
      .replace("{{BASEURL}}", self.base_url)
      .replace("{{CURRENTPATH}}", &self.path)
      .replace("{{CURRENTLANG}}", self.lang)
  }
}

fn meta_property(property: &str, content: &str) -> String {
  format!(r#"<meta property="{}" content="{}" />"#, escape_html(property), escape_html(content))
}

/// Twitter cards are read from `name`, not `property`.
fn meta_name(name: &str, content: &str) -> String {
  format!(r#"<meta name="{}" content="{}" />"#, escape_html(name), escape_html(content))
}

fn link_canonical(href: &str) -> String {
  format!(r#"<link rel="canonical" href="{}" />"#, escape_html(href))
}

fn link_alternate(hreflang: &str, href: &str) -> String {
  format!(r#"<link rel="alternate" hreflang="{}" href="{}" />"#, escape_html(hreflang), escape_html(href))
}

fn join(tags: &[String]) -> String {
  tags.join(TAG_SEPARATOR)
}
