//! Component loading: read each definition file and hand it to the parser.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::task::JoinSet;
use tracing::debug;

use crate::build::drain_tasks;
use crate::consts::REGISTER_HOOK_NAME;
use crate::error::BuildError;
use crate::toolchain::{ParseOptions, ParsedComponent, Toolchain};

/// One parsed component-definition file.
///
/// The IR is parsed once and shared read-only across every target that
/// requests it.
#[derive(Debug, Clone)]
pub struct LoadedComponent {
  /// Source path, relative to the build root.
  pub path: PathBuf,
  pub component: Arc<ParsedComponent>,
}

/// Load and parse every discovered component-definition file concurrently.
///
/// The first parse failure fails the whole batch; sibling loads already
/// launched still run to completion first. Results come back sorted by path.
pub async fn load_components<T: Toolchain>(
  root: &Path,
  paths: Vec<PathBuf>,
  toolchain: &Arc<T>,
) -> Result<Vec<LoadedComponent>, BuildError> {
  let options = ParseOptions {
    hook_names: vec![REGISTER_HOOK_NAME.to_string()],
  };

  let mut tasks = JoinSet::new();
  for path in paths {
    let toolchain = Arc::clone(toolchain);
    let options = options.clone();
    let full = root.join(&path);
    tasks.spawn(async move {
      let source = fs::read_to_string(&full).await.map_err(|source| BuildError::Read {
        path: path.clone(),
        source,
      })?;
      let component = toolchain.parse(&source, &options).map_err(|source| BuildError::Parse {
        path: path.clone(),
        source,
      })?;
      debug!(path = %path.display(), name = %component.name, "parsed component");
      Ok(LoadedComponent {
        path,
        component: Arc::new(component),
      })
    });
  }

  let mut components = drain_tasks(tasks).await?;
  components.sort_by(|a, b| a.path.cmp(&b.path));
  Ok(components)
}
