//! Change producers.
//!
//! A producer writes the files a run commits. It never stages or commits
//! anything itself; it returns the repository-relative paths it wrote so the
//! caller can stage exactly those.

pub mod docs;
pub mod marker;

use crate::config::ArtifactKind;
use crate::core::context::RunContext;
use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Writes the payload of a run.
pub trait ChangeProducer: std::fmt::Debug + Send + Sync {
    /// Short name shown in logs.
    fn name(&self) -> &'static str;

    /// Writes files under `ctx.workdir()` and returns the relative paths
    /// that were written.
    fn produce(&self, ctx: &RunContext) -> Result<Vec<PathBuf>>;
}

/// Returns the built-in producer for an artifact kind.
#[must_use]
pub fn for_kind(kind: ArtifactKind) -> Box<dyn ChangeProducer> {
    match kind {
        ArtifactKind::Marker => Box::new(marker::MarkerFile),
        ArtifactKind::Docs => Box::new(docs::DocsWithBadges),
    }
}

/// Writes UTF-8 `content` to `root/relative`, creating parent directories.
pub(crate) fn write_text(root: &Path, relative: &Path, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("create {}", parent.display()), e))?;
    }
    std::fs::write(&path, content).map_err(|e| Error::io(format!("write {}", path.display()), e))
}
