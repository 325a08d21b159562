/* src/server/injector/rust/src/resolve.rs */

use std::collections::BTreeMap;

use crate::ast::Tag;
use crate::context::RenderContext;
use crate::helpers::escape_html;
use crate::og::build_og_tags;
use crate::seo::SeoMetadata;

/// Token accepted by `<LANG "..." />`; anything else resolves to nothing.
pub const LANG_PREINIT: &str = "preinit";

/// Optional capabilities a page exposes to its layout. Every default means
/// "not supported" and is checked, never assumed.
pub trait LayoutHooks {
  /// Static metadata declared by the page. Wins over request-level values.
  fn seo(&self) -> Option<&SeoMetadata> {
    None
  }

  /// Dynamic metadata. Receives the merged metadata and returns the
  /// replacement, or `None` to keep it. Called at most once per render.
  fn extend_seo(&self, _seo: &SeoMetadata, _ctx: &RenderContext) -> Option<SeoMetadata> {
    None
  }

  /// Markup for a named `<REACT "section" />` slot.
  fn render_raw(&self, _section: &str, _ctx: &RenderContext, _seo: &SeoMetadata) -> Option<String> {
    None
  }

  /// Open-Graph values rendered by the page itself. Returning `Some` turns on
  /// `<OG />` resolution even when the request carries no `og` block.
  fn open_graph(&self, _ctx: &RenderContext) -> Option<BTreeMap<String, String>> {
    None
  }
}

/// A page with no layout capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl LayoutHooks for NoHooks {}

/// Decides the replacement for each match of one render, in scan order.
///
/// Metadata is computed on the first match that needs it and reused for the
/// rest of the document, so `extend_seo` runs at most once.
pub struct FragmentResolver<'a, H: LayoutHooks + ?Sized> {
  body: &'a str,
  hooks: &'a H,
  ctx: &'a RenderContext,
  seo: Option<SeoMetadata>,
}

impl<'a, H: LayoutHooks + ?Sized> FragmentResolver<'a, H> {
  pub fn new(body: &'a str, hooks: &'a H, ctx: &'a RenderContext) -> Self {
    Self { body, hooks, ctx, seo: None }
  }

  /// `Some(fragment)` splices the fragment in; `None` removes the match.
  /// Only a raw `<title>` with no metadata title echoes `source` back.
  pub fn resolve(&mut self, tag: &Tag, source: &str) -> Option<String> {
    let (hooks, ctx) = (self.hooks, self.ctx);
    match tag {
      Tag::React { name } => {
        let seo = self.metadata();
        if name == "body" { Some(self.body.to_string()) } else { hooks.render_raw(name, ctx, seo) }
      }
      Tag::Seo { field } => head_tag(field, self.metadata()),
      Tag::Og { field } => {
        let seo = self.metadata();
        if seo.has_og() { build_og_tags(field, seo, ctx) } else { None }
      }
      Tag::Title { inner, .. } => {
        // `<title><SEO "title" /></title>`: the directive's fragment replaces
        // the whole element
        if let Some(fragment) = inner.as_deref().and_then(|inner| self.resolve(inner, source)) {
          return Some(fragment);
        }
        match self.metadata().title {
          Some(ref title) => Some(title_tag(title)),
          None => Some(source.to_string()),
        }
      }
      Tag::BuildId => Some(format!("v={}", ctx.build)),
      Tag::Lang { token } => {
        if token.eq_ignore_ascii_case(LANG_PREINIT) {
          ctx.current_lang().map(preinit_script)
        } else {
          None
        }
      }
    }
  }

  /// The metadata used for this render, computing it on first use.
  pub fn metadata(&mut self) -> &SeoMetadata {
    let (hooks, ctx) = (self.hooks, self.ctx);
    self.seo.get_or_insert_with(|| compute_metadata(hooks, ctx))
  }
}

/// Request metadata, overlaid with the page's static metadata and OG values,
/// then handed to the page's extension hook.
fn compute_metadata<H: LayoutHooks + ?Sized>(hooks: &H, ctx: &RenderContext) -> SeoMetadata {
  let mut seo = ctx.seo.clone();
  if let Some(declared) = hooks.seo() {
    seo.merge(declared);
  }
  if let Some(og) = hooks.open_graph(ctx) {
    seo.merge_og(&og);
  }
  hooks.extend_seo(&seo, ctx).unwrap_or(seo)
}

fn head_tag(field: &str, seo: &SeoMetadata) -> Option<String> {
  match field.to_ascii_uppercase().as_str() {
    "TITLE" => seo.title.as_deref().map(title_tag),
    "DESCRIPTION" => seo
      .description
      .as_deref()
      .map(|d| format!(r#"<meta name="description" content="{}">"#, escape_html(d))),
    "KEYWORDS" => seo
      .keywords
      .as_deref()
      .map(|k| format!(r#"<meta name="keywords" content="{}">"#, escape_html(k))),
    _ => None,
  }
}

fn title_tag(title: &str) -> String {
  format!("<title>{}</title>", escape_html(title))
}

fn preinit_script(lang: &str) -> String {
  // JSON string literal doubles as a safe JS string literal
  let lang = serde_json::Value::String(lang.to_string()).to_string();
  format!("<script>document.documentElement.lang={lang};window.__LANG__={lang};</script>")
}
