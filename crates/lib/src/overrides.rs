//! Override merging: hand-written per-target files copied on top of
//! generated output.
//!
//! Runs after a target's generated writes so an override landing on the same
//! derived path always wins.

use std::path::Path;
use std::sync::Arc;

use tokio::fs;
use tokio::task::JoinSet;
use tracing::debug;

use crate::build::drain_tasks;
use crate::consts::OVERRIDES_DIR;
use crate::discover;
use crate::error::BuildError;
use crate::output;
use crate::target::Target;
use crate::toolchain::{LowerRequest, Toolchain};

/// Merge one target's override tree into the output root.
///
/// Lowerable overrides (`.ts`/`.tsx`) are transpiled through the toolchain;
/// everything else is copied through unchanged. Returns the number of
/// overrides applied.
pub async fn merge_overrides<T: Toolchain>(
  root: &Path,
  dest: &Path,
  target: Target,
  toolchain: &Arc<T>,
) -> Result<usize, BuildError> {
  let files = discover::discover_overrides(root, target)?;
  let base = root.join(OVERRIDES_DIR).join(target.as_str());

  let mut tasks = JoinSet::new();
  for rel in files {
    let toolchain = Arc::clone(toolchain);
    let full = base.join(&rel);
    let dest = dest.to_path_buf();
    tasks.spawn(async move {
      // Read as bytes: only lowerable overrides are decoded, everything else
      // (images, fonts) copies through verbatim.
      let bytes = fs::read(&full).await.map_err(|source| BuildError::Read {
        path: full.clone(),
        source,
      })?;

      let (out_path, lower) = output::override_output_path(&dest, &rel);
      if lower {
        let contents = String::from_utf8(bytes).map_err(|e| BuildError::Read {
          path: full.clone(),
          source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        let lowered = toolchain
          .lower_module(LowerRequest {
            path: &full,
            content: Some(&contents),
            target,
          })
          .map_err(|source| BuildError::Lower {
            path: rel.clone(),
            source,
          })?;
        output::write_file(&out_path, &lowered).await?;
      } else {
        output::write_bytes(&out_path, &bytes).await?;
      }
      debug!(target = %target, path = %rel.display(), "applied override");
      Ok(())
    });
  }

  let applied = drain_tasks(tasks).await?;
  Ok(applied.len())
}
