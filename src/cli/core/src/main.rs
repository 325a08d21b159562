/* src/cli/core/src/main.rs */

mod compose;
mod scan;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::compose::ComposeArgs;

#[derive(Parser)]
#[command(name = "rsp", version, about = "Inspect and preview rsp layouts")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List the placeholders found in a layout document
  Scan {
    /// Path to the layout file
    layout: PathBuf,
  },
  /// Splice a body into a layout and print the resulting document
  Compose(ComposeArgs),
}

fn init_tracing() {
  let filter = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy();
  // a subscriber already set (tests, embedding) is fine
  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
    .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  let output = match cli.command {
    Command::Scan { layout } => scan::run_scan(&layout).await?,
    Command::Compose(args) => compose::run_compose(&args).await?,
  };

  let mut stdout = std::io::stdout().lock();
  stdout.write_all(output.as_bytes()).context("failed to write to stdout")?;
  if !output.ends_with('\n') {
    stdout.write_all(b"\n").context("failed to write to stdout")?;
  }
  Ok(())
}
