//! Timestamped marker file.

use super::{write_text, ChangeProducer};
use crate::core::context::RunContext;
use crate::core::error::Result;
use std::path::PathBuf;

/// Overwrites a single marker file with a fixed line and the run timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerFile;

impl MarkerFile {
    /// Renders the marker file content.
    #[must_use]
    pub fn render(ctx: &RunContext) -> String {
        format!(
            "{}\nGenerated on {}\n",
            ctx.artifact().marker_text,
            ctx.timestamp()
        )
    }
}

impl ChangeProducer for MarkerFile {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn produce(&self, ctx: &RunContext) -> Result<Vec<PathBuf>> {
        let path = ctx.artifact().marker_path.clone();
        write_text(ctx.workdir(), &path, &Self::render(ctx))?;
        tracing::debug!(path = %path.display(), "wrote marker file");
        Ok(vec![path])
    }
}
