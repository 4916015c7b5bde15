//! Overview document plus README badges section.
//!
//! The overview is rewritten on every run. The badges section is additive:
//! it is appended to the README only when the configured heading text does
//! not already occur anywhere in it, so reruns never duplicate it.

use super::{write_text, ChangeProducer};
use crate::core::context::RunContext;
use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Placeholder line under the badges heading.
const BADGES_PLACEHOLDER: &str = "(markdown badges TBD)";

/// Writes `docs/agent-overview.md` and maintains the README badges section.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocsWithBadges;

impl DocsWithBadges {
    /// Renders the overview document.
    #[must_use]
    pub fn render_overview(ctx: &RunContext) -> String {
        format!(
            "# Agent overview\n\
             This document explains the automated draft pull request flow.\n\n\
             _Generated on {}_\n",
            ctx.timestamp()
        )
    }

    /// Returns the README content after ensuring the badges section exists,
    /// or `None` when the existing content already has it.
    #[must_use]
    pub fn with_badges(existing: Option<&str>, heading: &str, project: &str) -> Option<String> {
        match existing {
            Some(content) if content.contains(heading) => None,
            Some(content) => {
                let separator = if content.ends_with('\n') { "\n" } else { "\n\n" };
                Some(format!(
                    "{content}{separator}{heading}\n{BADGES_PLACEHOLDER}\n"
                ))
            },
            None => Some(format!(
                "# {project}\n\n{heading}\n{BADGES_PLACEHOLDER}\n"
            )),
        }
    }

    fn project_name(ctx: &RunContext) -> String {
        ctx.artifact()
            .project_name
            .clone()
            .or_else(|| {
                ctx.workdir()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "Project".to_string())
    }
}

impl ChangeProducer for DocsWithBadges {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn produce(&self, ctx: &RunContext) -> Result<Vec<PathBuf>> {
        let artifact = ctx.artifact();
        let mut written = Vec::with_capacity(2);

        write_text(ctx.workdir(), &artifact.doc_path, &Self::render_overview(ctx))?;
        written.push(artifact.doc_path.clone());

        let existing = read_optional(&ctx.workdir().join(&artifact.readme_path))?;
        let updated = Self::with_badges(
            existing.as_deref(),
            &artifact.badges_heading,
            &Self::project_name(ctx),
        );

        if let Some(content) = updated {
            write_text(ctx.workdir(), &artifact.readme_path, &content)?;
            written.push(artifact.readme_path.clone());
        } else {
            tracing::debug!(
                heading = %artifact.badges_heading,
                "README already has badges section"
            );
        }

        Ok(written)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(format!("read {}", path.display()), e)),
    }
}
