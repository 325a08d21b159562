/* src/server/injector/rust/src/tests/mod.rs */

use std::cell::Cell;

use super::*;

const LAYOUT: &str = concat!(
  "<!DOCTYPE html>\n",
  "<html>\n",
  "  <head>\n",
  "    <LANG \"preinit\" />\n",
  "    <title>Fallback</title>\n",
  "    <SEO \"description\" />\n",
  "    <OG \"url\" />\n",
  "    <link rel=\"stylesheet\" href=\"/main.css?{{BUILDID}}\">\n",
  "  </head>\n",
  "  <body><REACT \"body\" /></body>\n",
  "</html>\n",
);

struct Page {
  seo: SeoMetadata,
  extend_calls: Cell<u32>,
}

impl Page {
  fn new(seo: SeoMetadata) -> Self {
    Self { seo, extend_calls: Cell::new(0) }
  }
}

impl LayoutHooks for Page {
  fn seo(&self) -> Option<&SeoMetadata> {
    Some(&self.seo)
  }

  fn extend_seo(&self, seo: &SeoMetadata, ctx: &RenderContext) -> Option<SeoMetadata> {
    self.extend_calls.set(self.extend_calls.get() + 1);
    let mut next = seo.clone();
    if let Some(name) = ctx.locals.get("user").and_then(|v| v.as_str()) {
      next.description = Some(format!("Profile of {name}"));
    }
    Some(next)
  }

  fn render_raw(&self, section: &str, _ctx: &RenderContext, seo: &SeoMetadata) -> Option<String> {
    (section == "sidebar").then(|| format!("<aside>{}</aside>", seo.title.as_deref().unwrap_or("")))
  }
}

#[test]
fn document_without_placeholders_passes_through() {
  let doc = "<html><head><meta charset=\"utf-8\"></head><body>{ x } < y</body></html>";
  assert_eq!(inject(doc, "ignored", &NoHooks, &RenderContext::default()), doc);
}

#[test]
fn build_id_is_replaced_everywhere() {
  let doc = "<script src=\"/a.js?{{BUILDID}}\"></script><img src=\"/b.png?{{BUILDID}}\">";
  let ctx = RenderContext::default().with_build("42");
  assert_eq!(
    inject(doc, "", &NoHooks, &ctx),
    "<script src=\"/a.js?v=42\"></script><img src=\"/b.png?v=42\">"
  );
}

#[test]
fn raw_title_survives_without_metadata() {
  let out = inject("<head><title>Original</title></head>", "", &NoHooks, &RenderContext::default());
  assert_eq!(out, "<head><title>Original</title></head>");
}

#[test]
fn full_layout_with_page_metadata() {
  let page = Page::new(
    SeoMetadata::default()
      .with_title("Home")
      .with_base_url("https://example.com")
      .with_og("url", "{{BASEURL}}{{CURRENTPATH}}"),
  );
  let ctx = RenderContext::new("/home?x=1")
    .with_build("7")
    .with_local("user", serde_json::json!("Ada"));
  let out = ScannedLayout::new(LAYOUT).render("<main>hello</main>", &page, &ctx);

  let expected = concat!(
    "<!DOCTYPE html>\n",
    "<html>\n",
    "  <head>\n",
    "    \n",
    "    <title>Home</title>\n",
    "    <meta name=\"description\" content=\"Profile of Ada\">\n",
    "    <meta property=\"og:url\" content=\"https://example.com/home/\" />\n",
    "    <link rel=\"canonical\" href=\"https://example.com/home/\" />\n",
    "    <link rel=\"stylesheet\" href=\"/main.css?v=7\">\n",
    "  </head>\n",
    "  <body><main>hello</main></body>\n",
    "</html>\n",
  );
  assert_eq!(out, expected);
  assert_eq!(page.extend_calls.get(), 1);
}

#[test]
fn localized_layout_emits_lang_script_and_alternates() {
  let page = Page::new(
    SeoMetadata::default()
      .with_base_url("https://example.com")
      .with_og("url", "{{BASEURL}}/{{CURRENTLANG}}{{CURRENTPATH}}"),
  );
  let ctx = RenderContext::new("/pricing")
    .with_locale(LocaleInfo::new("es", vec!["en".into(), "es".into(), "fr".into()]));
  let out = ScannedLayout::new(LAYOUT).render("", &page, &ctx);

  assert!(out.contains(
    r#"<script>document.documentElement.lang="es";window.__LANG__="es";</script>"#
  ));
  assert!(out.contains(r#"<link rel="canonical" href="https://example.com/es/pricing/" />"#));
  assert!(out.contains(r#"<link rel="alternate" hreflang="en" href="https://example.com/en/pricing/" />"#));
  assert!(out.contains(r#"<link rel="alternate" hreflang="fr" href="https://example.com/fr/pricing/" />"#));
  assert!(out.contains(r#"<link rel="alternate" hreflang="x-default" href="https://example.com/pricing/" />"#));
  assert!(!out.contains(r#"hreflang="es""#));
}

#[test]
fn named_section_uses_page_renderer() {
  let page = Page::new(SeoMetadata::default().with_title("Docs"));
  let doc = r#"<REACT "sidebar" /><REACT "footer" /><REACT "body" />"#;
  let out = inject(doc, "<p>b</p>", &page, &RenderContext::default());
  assert_eq!(out, "<aside>Docs</aside><p>b</p>");
  assert_eq!(page.extend_calls.get(), 1);
}

#[test]
fn title_placeholder_and_raw_title_agree() {
  let page = Page::new(SeoMetadata::default().with_title("A & B"));
  let doc = r#"<SEO "title" /><title>raw</title>"#;
  let out = inject(doc, "", &page, &RenderContext::default());
  assert_eq!(out, "<title>A &amp; B</title><title>A &amp; B</title>");
}

#[test]
fn title_wrapping_seo_directive_renders_one_title() {
  let ctx = RenderContext::default().with_seo(SeoMetadata::default().with_title("Hello"));
  let out = inject(r#"<head><title><SEO "title" /></title></head>"#, "", &NoHooks, &ctx);
  assert_eq!(out, "<head><title>Hello</title></head>");
}

#[test]
fn rendering_twice_reuses_scan_without_leaking_metadata() {
  let layout = ScannedLayout::new(r#"<SEO "title" />"#);
  let a = Page::new(SeoMetadata::default().with_title("A"));
  let b = Page::new(SeoMetadata::default());
  let ctx = RenderContext::default();
  assert_eq!(layout.render("", &a, &ctx), "<title>A</title>");
  assert_eq!(layout.render("", &b, &ctx), "");
}
