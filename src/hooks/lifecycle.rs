use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Commit;
use crate::error::Result;
use crate::hooks::LogParse;

/// Hook points a plugin can take part in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookType {
    OnCreateLogParse,
    AfterRelease,
}

impl HookType {
    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::OnCreateLogParse => "on-create-log-parse",
            HookType::AfterRelease => "after-release",
        }
    }
}

/// Context information passed to after-release hooks
#[derive(Debug, Clone, Default)]
pub struct ReleaseContext {
    /// Version that was released, absent when nothing was released
    pub version: Option<String>,
    /// Commits retained by the log parse for this release
    pub commits: Vec<Commit>,
    /// Rendered release notes (Markdown)
    pub release_notes: String,
    /// Simulated run; plugins must not perform side effects
    pub dry_run: bool,
}

impl ReleaseContext {
    pub fn new(version: Option<String>, commits: Vec<Commit>, release_notes: impl Into<String>) -> Self {
        ReleaseContext {
            version,
            commits,
            release_notes: release_notes.into(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A release plugin.
///
/// Both hooks default to doing nothing, so a plugin only implements the
/// points it cares about.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called once per log parse session to install parsers and normalizers.
    fn on_create_log_parse(&self, _log_parse: &mut LogParse) {}

    /// Called once after a release has been computed.
    async fn after_release(&self, _context: &ReleaseContext) -> Result<()> {
        Ok(())
    }
}
