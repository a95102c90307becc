//! litegen: multi-target component build pipeline CLI.

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use litegen_lib::Target;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "litegen")]
#[command(author, version, about = "Multi-target component build pipeline", long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build all configured targets into the output directory
  Build {
    /// Path to a JSON build config (default: litegen.config.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base directory for source discovery
    #[arg(long)]
    root: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Targets to build (react, reactNative, vue, solid); overrides the config file
    #[arg(short, long = "target")]
    targets: Vec<Target>,
  },

  /// List supported targets
  Targets,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Build {
      config,
      root,
      dest,
      targets,
    } => cmd::cmd_build(config.as_deref(), root, dest, targets),
    Commands::Targets => cmd::cmd_targets(),
  }
}
