//! Output cleaning: remove previously generated files before a build.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Errors raised while cleaning the output root.
#[derive(Debug, Error)]
pub enum CleanError {
  #[error("failed to walk output root: {0}")]
  Walk(#[from] walkdir::Error),

  #[error("failed to remove {path}: {source}")]
  Remove {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("clean task panicked: {0}")]
  Join(#[from] tokio::task::JoinError),
}

/// Delete every file under the output root.
///
/// Deletions run concurrently; a failed deletion does not stop its siblings,
/// but any failure fails the clean step as a whole, which aborts the build
/// before generation begins. A missing output root is a no-op.
pub async fn clean(dest: &Path) -> Result<usize, CleanError> {
  if !dest.exists() {
    return Ok(0);
  }

  let mut files = Vec::new();
  for entry in WalkDir::new(dest) {
    let entry = entry?;
    if entry.file_type().is_file() {
      files.push(entry.into_path());
    }
  }

  let total = files.len();
  let mut tasks = JoinSet::new();
  for path in files {
    tasks.spawn(async move {
      fs::remove_file(&path)
        .await
        .map_err(|source| CleanError::Remove { path, source })
    });
  }

  let mut first_err: Option<CleanError> = None;
  while let Some(joined) = tasks.join_next().await {
    match joined {
      Ok(Ok(())) => {}
      Ok(Err(e)) => {
        warn!(error = %e, "failed to remove generated file");
        first_err.get_or_insert(e);
      }
      Err(e) => {
        first_err.get_or_insert(CleanError::Join(e));
      }
    }
  }

  match first_err {
    Some(e) => Err(e),
    None => {
      debug!(count = total, dest = %dest.display(), "removed previously generated files");
      Ok(total)
    }
  }
}
