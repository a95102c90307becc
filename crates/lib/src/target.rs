//! Supported output framework targets.
//!
//! The target set is closed: every dispatch site matches exhaustively on this
//! enum, so a new target cannot be silently mishandled anywhere in the
//! pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One supported output framework backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
  #[serde(rename = "react")]
  React,
  #[serde(rename = "reactNative")]
  ReactNative,
  #[serde(rename = "vue")]
  Vue,
  #[serde(rename = "solid")]
  Solid,
}

/// A target identifier outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown target: {0}")]
pub struct UnknownTarget(pub String);

impl Target {
  /// All supported targets, in canonical order.
  pub const ALL: [Target; 4] = [Target::React, Target::ReactNative, Target::Vue, Target::Solid];

  /// The identifier used in config files, override directories, and output paths.
  pub fn as_str(&self) -> &'static str {
    match self {
      Target::React => "react",
      Target::ReactNative => "reactNative",
      Target::Vue => "vue",
      Target::Solid => "solid",
    }
  }

  /// Whether generator output for this target needs bundler-level module lowering.
  pub fn needs_lowering(&self) -> bool {
    matches!(self, Target::React | Target::ReactNative)
  }

  /// Whether this target's native format nests several concerns in a single
  /// file and therefore goes through the dedicated sub-compiler.
  pub fn is_sub_compiled(&self) -> bool {
    matches!(self, Target::Vue)
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Target {
  type Err = UnknownTarget;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Target::ALL
      .iter()
      .copied()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| UnknownTarget(s.to_string()))
  }
}
