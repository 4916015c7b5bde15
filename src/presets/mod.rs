//! Configuration presets for common automation flows.
//!
//! Presets bundle a branch prefix, commit message and artifact producer.

/// Available preset names.
pub mod names {
    /// Timestamped marker file on an `audit-demo-*` branch.
    pub const AUDIT: &str = "audit";
    /// Overview doc plus README badges on an `agent-demo-*` branch.
    pub const DOCS: &str = "docs";
}

/// Returns a list of available preset names.
#[must_use]
pub const fn available() -> &'static [&'static str] {
    &[names::AUDIT, names::DOCS]
}

/// Returns a description for a preset.
#[must_use]
pub fn description(name: &str) -> &'static str {
    match name {
        names::AUDIT => "Throw-away marker file committed on an audit-demo branch",
        names::DOCS => "docs/agent-overview.md plus a README badges section",
        _ => "Unknown preset",
    }
}
