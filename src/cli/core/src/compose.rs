/* src/cli/core/src/compose.rs */

// `rsp compose` command: renders a body file into a layout the same way the
// engine does for a request, without a server.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rsp_engine::{ComponentRegistry, EngineConfig, ViewEngine};
use rsp_injector::{LocaleInfo, NoHooks, RenderContext, SeoMetadata};

#[derive(Args, Debug)]
pub struct ComposeArgs {
  /// Layout name (resolved under the layouts directory) or path
  #[arg(long)]
  pub layout: String,
  /// HTML file spliced in for `<REACT "body" />`
  #[arg(long)]
  pub body: PathBuf,
  /// Request metadata as JSON, e.g. '{"title":"Home","og":{"type":"website"}}'
  #[arg(long)]
  pub seo: Option<String>,
  /// Build id for `{{BUILDID}}`
  #[arg(long, default_value = "")]
  pub build: String,
  /// Request URL the page is rendered for
  #[arg(long, default_value = "/")]
  pub url: String,
  /// Current locale
  #[arg(long)]
  pub lang: Option<String>,
  /// Supported locales, comma separated
  #[arg(long, value_delimiter = ',', requires = "lang")]
  pub locales: Vec<String>,
  /// Engine config (rsp.toml) used to resolve layout names
  #[arg(long)]
  pub config: Option<PathBuf>,
}

pub async fn run_compose(args: &ComposeArgs) -> Result<String> {
  let config = match args.config {
    Some(ref path) => EngineConfig::load(path).context("failed to load engine config")?,
    None => EngineConfig::default(),
  };
  let engine = ViewEngine::new(config, ComponentRegistry::new());

  let layout_path = layout_path(&engine, &args.layout).await;
  let layout = engine
    .get_layout(&layout_path, false)
    .await
    .with_context(|| format!("failed to load layout {}", layout_path.display()))?;
  let body = tokio::fs::read_to_string(&args.body)
    .await
    .with_context(|| format!("failed to read body {}", args.body.display()))?;

  let ctx = context(args)?;
  Ok(layout.render(&body, &NoHooks, &ctx))
}

/// An existing file is used as given; anything else goes through the
/// engine's layout resolution.
async fn layout_path(engine: &ViewEngine, layout: &str) -> PathBuf {
  let given = Path::new(layout);
  match tokio::fs::metadata(given).await {
    Ok(meta) if meta.is_file() => given.to_path_buf(),
    _ => engine.resolve_layout_path(layout),
  }
}

fn context(args: &ComposeArgs) -> Result<RenderContext> {
  let seo = match args.seo {
    Some(ref raw) => serde_json::from_str::<SeoMetadata>(raw).context("invalid --seo JSON")?,
    None => SeoMetadata::default(),
  };
  let mut ctx = RenderContext::new(args.url.as_str()).with_build(args.build.as_str()).with_seo(seo);
  if let Some(ref lang) = args.lang {
    let supported = if args.locales.is_empty() { vec![lang.clone()] } else { args.locales.clone() };
    ctx = ctx.with_locale(LocaleInfo::new(lang.as_str(), supported));
  }
  Ok(ctx)
}
