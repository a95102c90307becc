//! Implementation of the `litegen build` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::debug;

use litegen_lib::toolchain::ir::IrToolchain;
use litegen_lib::{BuildConfig, Target, build};

/// Config file picked up from the build root when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "litegen.config.json";

/// Execute the build command.
///
/// Loads the build config (explicit path, the default config file if present,
/// or built-in defaults), applies flag overrides, and runs the full pipeline.
/// A failed build exits non-zero.
pub fn cmd_build(
  config_path: Option<&Path>,
  root: Option<PathBuf>,
  dest: Option<PathBuf>,
  targets: Vec<Target>,
) -> Result<()> {
  let mut config = load_config(config_path, root.as_deref())?;
  if let Some(root) = root {
    config.root = root;
  }
  if let Some(dest) = dest {
    config.dest = dest;
  }
  if !targets.is_empty() {
    config.targets = targets;
  }
  if config.targets.is_empty() {
    bail!("no targets configured; pass --target or set `targets` in {DEFAULT_CONFIG_FILE}");
  }

  let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
  let summary = rt
    .block_on(build(config, Arc::new(IrToolchain::new())))
    .context("build failed")?;

  println!("Build complete!");
  println!("  Components: {}", summary.components);
  println!("  Files written: {}", summary.files_written);
  println!("  Overrides applied: {}", summary.overrides_applied);
  Ok(())
}

fn load_config(explicit: Option<&Path>, root: Option<&Path>) -> Result<BuildConfig> {
  let path = match explicit {
    Some(path) => Some(path.to_path_buf()),
    None => {
      let candidate = root.unwrap_or(Path::new(".")).join(DEFAULT_CONFIG_FILE);
      candidate.exists().then_some(candidate)
    }
  };

  match path {
    Some(path) => {
      let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
      let config: BuildConfig = serde_json::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
      debug!(path = %path.display(), "loaded build config");
      Ok(config)
    }
    None => Ok(BuildConfig::default()),
  }
}
