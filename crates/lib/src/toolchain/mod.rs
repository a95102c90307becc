//! External collaborator seam: parsing, code generation, lowering.
//!
//! The orchestrator treats the component parser, the per-framework code
//! generators, the bundler-level module lowering, and the single-file
//! sub-compiler as black boxes. [`Toolchain`] is the contract they plug in
//! through; [`ir::IrToolchain`] is the in-tree development backend used by
//! the CLI and the test suite.

pub mod ir;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::target::Target;

/// Options handed to the parser for every component-definition file.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
  /// Metadata hook names the parser recognizes and captures into
  /// [`ComponentMeta`]. The pipeline always passes `registerComponent`.
  pub hook_names: Vec<String>,
}

/// Intermediate representation of one parsed component.
///
/// Opaque to the orchestrator except for `name` and the captured registration
/// hook, which drive the decoration stage. Parsed once per file and shared
/// read-only across all targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedComponent {
  /// Component identifier, used verbatim in generated registration calls.
  pub name: String,
  pub meta: ComponentMeta,
  /// The full IR payload, passed through to generators untouched.
  pub ir: serde_json::Value,
}

/// Observable component metadata captured during parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMeta {
  /// Registration descriptor, present when the source carried a recognized
  /// hook. Triggers the decoration stage on lowered targets.
  pub register_component_hook: Option<serde_json::Value>,
}

/// One file produced by a generator or sub-compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
  /// Final path, written verbatim; the orchestrator does not reinterpret it.
  pub path: PathBuf,
  pub contents: String,
}

/// Input to the single-file sub-compiler (Vue).
#[derive(Debug)]
pub struct SubCompileRequest<'a> {
  /// Raw generator output for the component.
  pub code: &'a str,
  /// Source path of the component-definition file.
  pub path: &'a Path,
  pub component: &'a ParsedComponent,
  /// Output root; returned file paths are rooted under it by the implementation.
  pub dest: &'a Path,
}

/// Input to bundler-level module lowering.
#[derive(Debug)]
pub struct LowerRequest<'a> {
  pub path: &'a Path,
  /// Content to lower. When `None` the implementation reads `path` itself.
  pub content: Option<&'a str>,
  pub target: Target,
}

/// Errors surfaced by toolchain implementations.
#[derive(Debug, Error)]
pub enum ToolchainError {
  #[error("parse error: {message}")]
  Parse { message: String },

  #[error("generation failed for {target}: {message}")]
  Generate { target: Target, message: String },

  #[error("sub-compile failed: {message}")]
  SubCompile { message: String },

  #[error("module lowering failed: {message}")]
  Lower { message: String },

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// The set of external algorithms the pipeline orchestrates.
///
/// Implementations must be pure with respect to their inputs: `generate` is
/// called with the same [`ParsedComponent`] for every requested target and
/// must never mutate or cache per-target state inside it.
pub trait Toolchain: Send + Sync + 'static {
  /// Parse one component-definition source into its IR.
  fn parse(&self, source: &str, options: &ParseOptions) -> Result<ParsedComponent, ToolchainError>;

  /// Generate raw framework code for one `(target, component)` pair.
  fn generate(&self, target: Target, component: &ParsedComponent) -> Result<String, ToolchainError>;

  /// Compile a nested single-file component into its final file set.
  fn sub_compile(&self, request: SubCompileRequest<'_>) -> Result<Vec<OutputFile>, ToolchainError>;

  /// Lower a plain module (or generator output) to the output syntax.
  fn lower_module(&self, request: LowerRequest<'_>) -> Result<String, ToolchainError>;
}
