//! Per-target code generation and post-processing.
//!
//! For each `(target, component)` pair the raw generator output goes through
//! a fixed stage order: sub-compile (Vue, terminal), module lowering (React
//! and React Native), then registration decoration when the component carries
//! a captured hook. Any other target passes through unchanged. The raw
//! pre-lowering form is always preserved so consumers can inspect it.

use std::path::Path;

use crate::component::LoadedComponent;
use crate::consts::REGISTER_HELPER_IMPORT;
use crate::error::BuildError;
use crate::target::Target;
use crate::toolchain::{LowerRequest, OutputFile, SubCompileRequest, Toolchain};

/// Post-processed output for one `(component, target)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentOutput {
  /// The complete file set produced by the sub-compiler, written verbatim.
  Files(Vec<OutputFile>),
  /// Final lowered form plus the preserved pre-lowering original.
  Pair { lowered: String, original: String },
}

/// Run the generator and the post-processing stages for one component on one
/// target.
pub fn render_component<T: Toolchain>(
  toolchain: &T,
  target: Target,
  loaded: &LoadedComponent,
  dest: &Path,
) -> Result<ComponentOutput, BuildError> {
  let raw = toolchain
    .generate(target, &loaded.component)
    .map_err(|source| BuildError::Generate {
      target,
      path: loaded.path.clone(),
      source,
    })?;

  if target.is_sub_compiled() {
    let files = toolchain
      .sub_compile(SubCompileRequest {
        code: &raw,
        path: &loaded.path,
        component: &loaded.component,
        dest,
      })
      .map_err(|source| BuildError::Generate {
        target,
        path: loaded.path.clone(),
        source,
      })?;
    return Ok(ComponentOutput::Files(files));
  }

  if target.needs_lowering() {
    let mut lowered = toolchain
      .lower_module(LowerRequest {
        path: &loaded.path,
        content: Some(&raw),
        target,
      })
      .map_err(|source| BuildError::Lower {
        path: loaded.path.clone(),
        source,
      })?;

    if let Some(hook) = &loaded.component.meta.register_component_hook {
      lowered = decorate_registration(&lowered, &loaded.component.name, hook)?;
    }

    return Ok(ComponentOutput::Pair { lowered, original: raw });
  }

  Ok(ComponentOutput::Pair {
    lowered: raw.clone(),
    original: raw,
  })
}

/// Wrap lowered code with the registration runtime helper: an import up top
/// and a `registerComponent(<name>, <descriptor>)` call at the bottom, with
/// the descriptor serialized as a relaxed-JSON literal.
fn decorate_registration(code: &str, name: &str, hook: &serde_json::Value) -> Result<String, BuildError> {
  let descriptor = json5::to_string(hook).map_err(|e| BuildError::Hook {
    name: name.to_string(),
    message: e.to_string(),
  })?;
  Ok(format!(
    "import {{ registerComponent }} from '{REGISTER_HELPER_IMPORT}';\n\n{code}\n\nregisterComponent({name}, {descriptor});\n"
  ))
}
