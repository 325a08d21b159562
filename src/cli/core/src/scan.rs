/* src/cli/core/src/scan.rs */

// `rsp scan` command: lists the placeholders of a layout with their offsets.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rsp_injector::{TagMatch, scan};

pub async fn run_scan(layout: &Path) -> Result<String> {
  let text = tokio::fs::read_to_string(layout)
    .await
    .with_context(|| format!("failed to read layout {}", layout.display()))?;
  let matches = scan(&text);
  tracing::debug!(layout = %layout.display(), count = matches.len(), "scanned layout");
  Ok(format_matches(&text, &matches))
}

/// One line per match: `offset len KIND source`.
fn format_matches(text: &str, matches: &[TagMatch]) -> String {
  let mut out = String::new();
  for m in matches {
    let source = m.source(text).replace('\n', "\\n");
    let _ = writeln!(out, "{:>6} {:>4} {:<8} {source}", m.start, m.len, m.tag.kind().as_str());
  }
  out
}
