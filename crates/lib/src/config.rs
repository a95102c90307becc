//! Build configuration and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;

use crate::target::Target;

/// Configuration for a single build.
///
/// Every field has a default, so an empty config file (or none at all) is
/// valid. Relative glob patterns are resolved against `root`, never against
/// the ambient working directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
  /// Base directory for all source discovery.
  pub root: PathBuf,

  /// Targets to build, in configuration order. Duplicates are dropped during
  /// normalization; all targets still build concurrently.
  pub targets: Vec<Target>,

  /// Output root. Generated files land under `dest/<target>/`, override
  /// outputs directly under `dest/`.
  pub dest: PathBuf,

  /// Glob pattern(s) selecting component-definition files, unioned with the
  /// fixed recursive `*.lite.tsx` pattern at discovery time.
  pub files: FilePatterns,
}

impl Default for BuildConfig {
  fn default() -> Self {
    BuildConfig {
      root: PathBuf::from("."),
      targets: Vec::new(),
      dest: PathBuf::from("dist"),
      files: FilePatterns::default(),
    }
  }
}

impl BuildConfig {
  /// Drop duplicate targets, keeping the first occurrence of each.
  pub fn normalize(mut self) -> Self {
    let mut seen = HashSet::new();
    self.targets.retain(|t| seen.insert(*t));
    self
  }
}

/// One glob pattern or several.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FilePatterns {
  One(String),
  Many(Vec<String>),
}

impl Default for FilePatterns {
  fn default() -> Self {
    FilePatterns::One("src/*".to_string())
  }
}

impl FilePatterns {
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    let patterns: &[String] = match self {
      FilePatterns::One(p) => std::slice::from_ref(p),
      FilePatterns::Many(v) => v.as_slice(),
    };
    patterns.iter().map(String::as_str)
  }
}
