//! Error taxonomy for the build pipeline.
//!
//! Every failure is terminal for its scope: discovery, parse, and clean
//! failures abort the build before or during fan-out; a generation or write
//! failure fails its target's batch, and because all targets are awaited
//! together, the build as a whole. There is no retry policy anywhere.

use std::path::PathBuf;

use thiserror::Error;

use crate::clean::CleanError;
use crate::discover::DiscoverError;
use crate::target::Target;
use crate::toolchain::ToolchainError;

/// Top-level error returned by [`crate::build::build`].
#[derive(Debug, Error)]
pub enum BuildError {
  /// Removing previously generated output failed.
  #[error("output clean failed: {0}")]
  Clean(#[from] CleanError),

  /// Glob resolution or filesystem traversal failed.
  #[error("discovery failed: {0}")]
  Discovery(#[from] DiscoverError),

  /// A source or override file could not be read.
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },

  /// A component-definition file failed to parse. The first parse failure in
  /// a batch fails the whole batch.
  #[error("failed to parse component {path}: {source}")]
  Parse {
    path: PathBuf,
    source: ToolchainError,
  },

  /// A target generator or sub-compiler failed for one component.
  #[error("code generation failed for {target} ({path}): {source}")]
  Generate {
    target: Target,
    path: PathBuf,
    source: ToolchainError,
  },

  /// Bundler-level lowering of a module or override failed.
  #[error("module lowering failed for {path}: {source}")]
  Lower {
    path: PathBuf,
    source: ToolchainError,
  },

  /// Serializing a registration hook descriptor failed.
  #[error("failed to serialize registration hook for {name}: {message}")]
  Hook { name: String, message: String },

  /// An output file could not be written.
  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    source: std::io::Error,
  },

  /// A spawned pipeline task panicked.
  #[error("build task panicked: {0}")]
  Join(#[from] tokio::task::JoinError),
}
