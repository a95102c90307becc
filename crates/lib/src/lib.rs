//! litegen-lib: core pipeline for the litegen multi-target component compiler.
//!
//! The library takes a tree of component definitions (`*.lite.tsx`) plus plain
//! source modules, fans each parsed component out across the requested
//! framework targets, post-processes the generated code per target, and writes
//! a deterministic output tree. Hand-written per-target override files are
//! merged on top of generated output, always winning on path collisions.
//!
//! The parsing, code-generation, lowering, and sub-compilation algorithms are
//! external collaborators behind the [`toolchain::Toolchain`] trait; this
//! crate owns discovery, sequencing, path derivation, and the concurrency
//! contract.

pub mod build;
pub mod clean;
pub mod component;
pub mod config;
pub mod consts;
pub mod discover;
pub mod error;
pub mod generate;
pub mod output;
pub mod overrides;
pub mod target;
pub mod toolchain;

pub use build::{BuildSummary, build};
pub use config::{BuildConfig, FilePatterns};
pub use error::BuildError;
pub use target::Target;
pub use toolchain::{ParseOptions, ParsedComponent, Toolchain, ToolchainError};
