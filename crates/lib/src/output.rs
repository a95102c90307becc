//! Output path derivation and file persistence.
//!
//! Path derivation is pure: the same `(dest, target, source path)` always
//! yields the same output path. Distinct logical files map to distinct paths
//! within one build, so concurrent writers never collide — an invariant to
//! preserve when adding targets or stages.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::consts::{COMPONENT_SUFFIX, ORIGINAL_SUFFIX, OUTPUT_EXT, SOURCE_ROOT};
use crate::error::BuildError;
use crate::target::Target;

/// Output path for a plain source module: `dest/<target>/<path>.js`, with a
/// leading `src/` segment stripped.
pub fn module_output_path(dest: &Path, target: Target, source: &Path) -> PathBuf {
  dest
    .join(target.as_str())
    .join(strip_source_root(source).with_extension(OUTPUT_EXT))
}

/// Output path for the final (post-lowering) form of a generated component.
pub fn component_final_path(dest: &Path, target: Target, source: &Path) -> PathBuf {
  dest
    .join(target.as_str())
    .join(format!("{}.{}", component_base(source), OUTPUT_EXT))
}

/// Output path for the preserved pre-lowering form of a generated component.
pub fn component_original_path(dest: &Path, target: Target, source: &Path) -> PathBuf {
  dest
    .join(target.as_str())
    .join(format!("{}.{}.{}", component_base(source), ORIGINAL_SUFFIX, OUTPUT_EXT))
}

/// Output path for a sub-compiled component's style file.
pub fn component_style_path(dest: &Path, target: Target, source: &Path) -> PathBuf {
  dest
    .join(target.as_str())
    .join(format!("{}.css", component_base(source)))
}

/// Output path for an override file (path relative to `overrides/<target>/`).
///
/// Returns the derived path and whether the contents need module lowering.
/// Lowerable overrides get the output extension; everything else keeps its
/// own path under the rewritten root.
pub fn override_output_path(dest: &Path, rel: &Path) -> (PathBuf, bool) {
  let lower = matches!(
    rel.extension().and_then(|e| e.to_str()),
    Some("ts") | Some("tsx")
  );
  let path = if lower {
    dest.join(rel.with_extension(OUTPUT_EXT))
  } else {
    dest.join(rel)
  };
  (path, lower)
}

/// Write one text output file, creating parent directories as needed.
pub async fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
  write_bytes(path, contents.as_bytes()).await
}

/// Write one output file verbatim, creating parent directories as needed.
/// Used for override assets that are copied through without decoding.
pub async fn write_bytes(path: &Path, contents: &[u8]) -> Result<(), BuildError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).await.map_err(|source| BuildError::Write {
      path: path.to_path_buf(),
      source,
    })?;
  }
  fs::write(path, contents).await.map_err(|source| BuildError::Write {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), "wrote output file");
  Ok(())
}

/// Component source path without the `src/` root or the component suffix.
fn component_base(source: &Path) -> String {
  let rel = strip_source_root(source).to_string_lossy().into_owned();
  match rel.strip_suffix(COMPONENT_SUFFIX) {
    Some(base) => base.to_string(),
    // Sources matched by a user pattern outside the suffix convention fall
    // back to a plain extension swap.
    None => Path::new(&rel).with_extension("").to_string_lossy().into_owned(),
  }
}

fn strip_source_root(path: &Path) -> &Path {
  path.strip_prefix(SOURCE_ROOT).unwrap_or(path)
}
