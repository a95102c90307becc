//! Top-level build orchestration.
//!
//! Control flow: clean the output root, discover and parse components once,
//! then fan out across targets. Each target concurrently transpiles plain
//! modules and renders components, and only after both complete merges its
//! overrides, so overrides always win on path collisions. All targets run in
//! parallel; every batch is drained fully before its first failure is
//! surfaced, so sibling tasks are never cancelled mid-write.

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::clean;
use crate::component::{self, LoadedComponent};
use crate::config::BuildConfig;
use crate::discover;
use crate::error::BuildError;
use crate::generate::{self, ComponentOutput};
use crate::output;
use crate::overrides;
use crate::target::Target;
use crate::toolchain::{LowerRequest, Toolchain};

/// Result of a completed build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
  /// Component-definition files parsed.
  pub components: usize,
  /// Generated and transpiled files written across all targets.
  pub files_written: usize,
  /// Override files merged across all targets.
  pub overrides_applied: usize,
}

/// Run a full build: clean, discover, generate for every configured target,
/// and merge overrides.
pub async fn build<T: Toolchain>(config: BuildConfig, toolchain: Arc<T>) -> Result<BuildSummary, BuildError> {
  let config = config.normalize();
  info!(
    targets = ?config.targets.iter().map(Target::as_str).collect::<Vec<_>>(),
    root = %config.root.display(),
    dest = %config.dest.display(),
    "starting build"
  );

  clean::clean(&config.dest).await?;

  let component_paths = discover::discover_components(&config.root, &config.files)?;
  let components = component::load_components(&config.root, component_paths, &toolchain).await?;
  info!(count = components.len(), "parsed components");

  let mut tasks = JoinSet::new();
  for &target in &config.targets {
    let components = components.clone();
    let toolchain = Arc::clone(&toolchain);
    let root = config.root.clone();
    let dest = config.dest.clone();
    tasks.spawn(async move { build_target(target, &root, &dest, &components, &toolchain).await });
  }

  let per_target = drain_tasks(tasks).await?;
  let summary = BuildSummary {
    components: components.len(),
    files_written: per_target.iter().map(|t| t.files_written).sum(),
    overrides_applied: per_target.iter().map(|t| t.overrides_applied).sum(),
  };
  info!(
    files_written = summary.files_written,
    overrides_applied = summary.overrides_applied,
    "build complete"
  );
  Ok(summary)
}

#[derive(Debug, Default)]
struct TargetSummary {
  files_written: usize,
  overrides_applied: usize,
}

/// Build one target end to end: modules and components concurrently, then
/// overrides.
async fn build_target<T: Toolchain>(
  target: Target,
  root: &Path,
  dest: &Path,
  components: &[LoadedComponent],
  toolchain: &Arc<T>,
) -> Result<TargetSummary, BuildError> {
  debug!(target = %target, "building target");

  let (modules, generated) = tokio::join!(
    write_modules(target, root, dest, toolchain),
    write_components(target, dest, components, toolchain),
  );
  let files_written = modules? + generated?;

  let overrides_applied = overrides::merge_overrides(root, dest, target, toolchain).await?;

  debug!(target = %target, files_written, overrides_applied, "target complete");
  Ok(TargetSummary {
    files_written,
    overrides_applied,
  })
}

/// Render and write every component for one target.
async fn write_components<T: Toolchain>(
  target: Target,
  dest: &Path,
  components: &[LoadedComponent],
  toolchain: &Arc<T>,
) -> Result<usize, BuildError> {
  let mut tasks = JoinSet::new();
  for loaded in components {
    let loaded = loaded.clone();
    let toolchain = Arc::clone(toolchain);
    let dest = dest.to_path_buf();
    tasks.spawn(async move {
      let rendered = generate::render_component(toolchain.as_ref(), target, &loaded, &dest)?;
      match rendered {
        ComponentOutput::Files(files) => {
          let count = files.len();
          for file in files {
            output::write_file(&file.path, &file.contents).await?;
          }
          Ok(count)
        }
        ComponentOutput::Pair { lowered, original } => {
          output::write_file(&output::component_final_path(&dest, target, &loaded.path), &lowered).await?;
          output::write_file(
            &output::component_original_path(&dest, target, &loaded.path),
            &original,
          )
          .await?;
          Ok(2)
        }
      }
    });
  }
  Ok(drain_tasks(tasks).await?.into_iter().sum())
}

/// Transpile and write every plain source module for one target.
///
/// The module set is re-resolved here on purpose: discovery runs once per
/// target, never cached across targets.
async fn write_modules<T: Toolchain>(
  target: Target,
  root: &Path,
  dest: &Path,
  toolchain: &Arc<T>,
) -> Result<usize, BuildError> {
  let modules = discover::discover_modules(root)?;

  let mut tasks = JoinSet::new();
  for rel in modules {
    let toolchain = Arc::clone(toolchain);
    let root = root.to_path_buf();
    let dest = dest.to_path_buf();
    tasks.spawn(async move {
      let full = root.join(&rel);
      // Read here so file I/O stays on the async runtime; the toolchain only
      // falls back to reading the path itself when no content is supplied.
      let source = tokio::fs::read_to_string(&full).await.map_err(|source| BuildError::Read {
        path: rel.clone(),
        source,
      })?;
      let lowered = toolchain
        .lower_module(LowerRequest {
          path: &full,
          content: Some(&source),
          target,
        })
        .map_err(|source| BuildError::Lower {
          path: rel.clone(),
          source,
        })?;
      output::write_file(&output::module_output_path(&dest, target, &rel), &lowered).await?;
      Ok(1)
    });
  }
  Ok(drain_tasks(tasks).await?.into_iter().sum())
}

/// Await every task in a batch, then surface the first failure.
///
/// Sibling tasks already launched are never cancelled; they run to completion
/// (and keep their side effects) even when another task in the batch fails.
pub(crate) async fn drain_tasks<R: Send + 'static>(
  mut tasks: JoinSet<Result<R, BuildError>>,
) -> Result<Vec<R>, BuildError> {
  let mut results = Vec::new();
  let mut first_err: Option<BuildError> = None;

  while let Some(joined) = tasks.join_next().await {
    match joined {
      Ok(Ok(value)) => results.push(value),
      Ok(Err(e)) => {
        error!(error = %e, "build task failed");
        first_err.get_or_insert(e);
      }
      Err(e) => {
        error!(error = %e, "build task panicked");
        first_err.get_or_insert(BuildError::Join(e));
      }
    }
  }

  match first_err {
    Some(e) => Err(e),
    None => Ok(results),
  }
}
