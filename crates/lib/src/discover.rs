//! Source discovery: glob resolution for components, modules, and overrides.
//!
//! All patterns resolve against the configured root directory, never against
//! the ambient working directory. Empty result sets are not errors; they
//! simply yield no downstream artifacts.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::FilePatterns;
use crate::consts::{COMPONENT_GLOB, DEPENDENCY_DIR, MODULE_GLOB, OVERRIDES_DIR};
use crate::target::Target;

/// Errors raised during glob resolution.
#[derive(Debug, Error)]
pub enum DiscoverError {
  #[error("invalid glob pattern {pattern}: {source}")]
  Pattern {
    pattern: String,
    source: glob::PatternError,
  },

  #[error("glob walk failed: {0}")]
  Walk(#[from] glob::GlobError),
}

/// Discover component-definition files: the configured patterns unioned with
/// the fixed recursive component glob, deduplicated and sorted.
pub fn discover_components(root: &Path, files: &FilePatterns) -> Result<Vec<PathBuf>, DiscoverError> {
  let mut found = BTreeSet::new();
  for pattern in files.iter() {
    found.extend(resolve(root, pattern)?);
  }
  found.extend(resolve(root, COMPONENT_GLOB)?);

  let found: Vec<PathBuf> = found.into_iter().collect();
  debug!(count = found.len(), "discovered component files");
  Ok(found)
}

/// Discover plain source modules under the fixed module glob.
///
/// Re-resolved per target build; results are never cached across targets.
pub fn discover_modules(root: &Path) -> Result<Vec<PathBuf>, DiscoverError> {
  resolve(root, MODULE_GLOB)
}

/// Discover override files for one target, excluding its dependency
/// directory. Returned paths are relative to `overrides/<target>/`.
pub fn discover_overrides(root: &Path, target: Target) -> Result<Vec<PathBuf>, DiscoverError> {
  let base = Path::new(OVERRIDES_DIR).join(target.as_str());
  let pattern = format!("{}/{}/**/*", OVERRIDES_DIR, target.as_str());

  let mut found = Vec::new();
  for path in resolve(root, &pattern)? {
    let rel = path.strip_prefix(&base).unwrap_or(&path).to_path_buf();
    if rel.components().any(|c| c.as_os_str() == DEPENDENCY_DIR) {
      continue;
    }
    found.push(rel);
  }
  found.sort();
  Ok(found)
}

/// Resolve one pattern against the root, yielding root-relative file paths in
/// sorted order.
fn resolve(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoverError> {
  // The root is a literal path, not a pattern: escape it so metacharacters
  // in directory names (brackets, `?`) cannot change what the glob matches.
  let rooted = format!("{}/{}", glob::Pattern::escape(&root.to_string_lossy()), pattern);

  let mut out = Vec::new();
  let entries = glob::glob(&rooted).map_err(|source| DiscoverError::Pattern {
    pattern: pattern.to_string(),
    source,
  })?;
  for entry in entries {
    let path = entry?;
    if path.is_file() {
      out.push(path.strip_prefix(root).unwrap_or(&path).to_path_buf());
    }
  }
  out.sort();
  Ok(out)
}
