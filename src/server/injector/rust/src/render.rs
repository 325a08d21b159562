/* src/server/injector/rust/src/render.rs */

use crate::ast::TagMatch;
use crate::context::RenderContext;
use crate::resolve::{FragmentResolver, LayoutHooks};
use crate::token::scan;

/// A layout document together with its placeholder matches. Scanning is
/// pure, so a cached layout can be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLayout {
  text: String,
  matches: Vec<TagMatch>,
}

impl ScannedLayout {
  pub fn new(text: impl Into<String>) -> Self {
    let text = text.into();
    let matches = scan(&text);
    Self { text, matches }
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn matches(&self) -> &[TagMatch] {
    &self.matches
  }

  /// Wrap `body` in this layout.
  pub fn render<H>(&self, body: &str, hooks: &H, ctx: &RenderContext) -> String
  where
    H: LayoutHooks + ?Sized,
  {
    let mut resolver = FragmentResolver::new(body, hooks, ctx);
    compose(&self.text, &self.matches, |m| resolver.resolve(&m.tag, m.source(&self.text)))
  }
}

/// Scan and render in one step, for layouts that are not cached.
pub fn inject<H: LayoutHooks + ?Sized>(
  layout: &str,
  body: &str,
  hooks: &H,
  ctx: &RenderContext,
) -> String {
  ScannedLayout::new(layout).render(body, hooks, ctx)
}

/// Rebuild `document` with each match replaced by `resolve`'s fragment, or
/// dropped when it returns `None`. Text between matches is copied byte for
/// byte. `matches` must be ordered and non-overlapping, as `scan` returns them.
pub fn compose<F>(document: &str, matches: &[TagMatch], mut resolve: F) -> String
where
  F: FnMut(&TagMatch) -> Option<String>,
{
  let mut out = String::with_capacity(document.len());
  let mut last = 0;
  for m in matches {
    debug_assert!(m.start >= last, "matches must not overlap");
    out.push_str(&document[last..m.start]);
    if let Some(fragment) = resolve(m) {
      out.push_str(&fragment);
    }
    last = m.end();
  }
  out.push_str(&document[last..]);
  out
}
