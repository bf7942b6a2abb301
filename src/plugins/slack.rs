use async_trait::async_trait;
use regex::{Captures, Regex};
use serde_json::json;
use std::sync::{Arc, LazyLock};

use crate::config::{Config, SlackConfig};
use crate::error::{ReleaseError, Result};
use crate::hooks::{Plugin, ReleaseContext};

static BULLET: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(\s*)[-*]\s+").ok());
static HEADING: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.*)$").ok());
static BOLD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").ok());
static LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").ok());

/// Delivers a JSON payload to a Slack endpoint.
#[async_trait]
pub trait SlackTransport: Send + Sync {
    async fn post(&self, url: &str, payload: &serde_json::Value) -> Result<()>;
}

/// HTTP transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlackTransport for ReqwestTransport {
    async fn post(&self, url: &str, payload: &serde_json::Value) -> Result<()> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(ReleaseError::notify(format!(
                "Slack request failed with status {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}

/// Posts release notes to Slack after a release.
pub struct SlackPlugin {
    config: SlackConfig,
    skip_release_labels: Vec<String>,
    transport: Arc<dyn SlackTransport>,
}

impl SlackPlugin {
    pub fn new(config: SlackConfig, transport: Arc<dyn SlackTransport>) -> Self {
        SlackPlugin {
            config,
            skip_release_labels: Vec::new(),
            transport,
        }
    }

    /// Build the plugin from `config`; the token is passed separately.
    pub fn from_config(config: &Config, token: Option<String>, transport: Arc<dyn SlackTransport>) -> Self {
        Self::new(config.slack.clone().with_token(token), transport)
            .with_skip_release_labels(config.release.skip_release_labels.clone())
    }

    pub fn with_skip_release_labels(mut self, labels: Vec<String>) -> Self {
        self.skip_release_labels = labels;
        self
    }

    /// Whether a release context warrants a message.
    ///
    /// Nothing is posted without a version, in a dry run, without commits, or
    /// when every commit carries a skip-release label.
    pub fn should_post(&self, context: &ReleaseContext) -> bool {
        if context.version.is_none() || context.dry_run || context.commits.is_empty() {
            return false;
        }

        !context.commits.iter().all(|commit| {
            commit
                .labels
                .iter()
                .any(|label| self.skip_release_labels.contains(label))
        })
    }

    /// Endpoint to post to: the configured URL plus the access token, if any.
    pub fn endpoint(&self) -> Result<String> {
        let url = self
            .config
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ReleaseError::notify("Slack url must be set to post a message"))?;

        match self.config.token.as_deref() {
            Some(token) => {
                let separator = if url.contains('?') { '&' } else { '?' };
                Ok(format!("{}{}token={}", url, separator, token))
            }
            None => {
                tracing::warn!("No Slack token found, posting without one");
                Ok(url.to_string())
            }
        }
    }

    /// Post a release message for `version` unconditionally.
    pub async fn post_to_slack(&self, version: &str, release_notes: &str) -> Result<()> {
        let endpoint = self.endpoint()?;
        let payload = build_payload(version, release_notes, self.config.project_url.as_deref());

        tracing::info!(version, "posting release to Slack");
        self.transport.post(&endpoint, &payload).await
    }
}

#[async_trait]
impl Plugin for SlackPlugin {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn after_release(&self, context: &ReleaseContext) -> Result<()> {
        if !self.should_post(context) {
            tracing::debug!("skipping Slack notification");
            return Ok(());
        }

        match context.version.as_deref() {
            Some(version) => self.post_to_slack(version, &context.release_notes).await,
            None => Ok(()),
        }
    }
}

/// Slack message payload for a release.
pub fn build_payload(version: &str, release_notes: &str, project_url: Option<&str>) -> serde_json::Value {
    let release = match project_url {
        Some(url) => format!(
            "*<{}/releases/tag/{}|{}>*",
            url.trim_end_matches('/'),
            version,
            version
        ),
        None => format!("*{}*", version),
    };

    json!({
        "text": format!("@channel: New release {}\n{}", release, sanitize_markdown(release_notes)),
        "link_names": 1,
    })
}

/// Convert Markdown release notes to Slack mrkdwn.
pub fn sanitize_markdown(markdown: &str) -> String {
    markdown
        .lines()
        .map(|line| {
            let line = replace(&BULLET, line, "${1}• ");
            let line = heading(&line);
            let line = replace(&BOLD, &line, "*${1}*");
            replace(&LINK, &line, "<${2}|${1}>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Headings become bold; bold markers inside them are dropped first.
fn heading(line: &str) -> String {
    match HEADING.as_ref() {
        Some(re) => re
            .replace(line, |caps: &Captures<'_>| format!("*{}*", caps[1].replace("**", "")))
            .into_owned(),
        None => line.to_string(),
    }
}

fn replace(re: &LazyLock<Option<Regex>>, text: &str, replacement: &str) -> String {
    match re.as_ref() {
        Some(re) => re.replace_all(text, replacement).into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_markdown() {
        assert_eq!(
            sanitize_markdown("# My Notes\n- PR [some link](google.com)"),
            "*My Notes*\n• PR <google.com|some link>"
        );
    }

    #[test]
    fn test_sanitize_markdown_nested_bullets_and_bold() {
        assert_eq!(
            sanitize_markdown("#### Bug Fix\n  * **core:** fix it"),
            "*Bug Fix*\n  • *core:* fix it"
        );
    }

    #[test]
    fn test_sanitize_markdown_bold_heading() {
        assert_eq!(sanitize_markdown("# **Title**"), "*Title*");
        assert_eq!(sanitize_markdown("## Fixes in **core**"), "*Fixes in core*");
    }

    #[test]
    fn test_build_payload_with_project_url() {
        let payload = build_payload("1.0.0", "# Notes", Some("https://github.custom.com/"));
        assert_eq!(
            payload["text"],
            "@channel: New release *<https://github.custom.com/releases/tag/1.0.0|1.0.0>*\n*Notes*"
        );
        assert_eq!(payload["link_names"], 1);
    }

    #[test]
    fn test_build_payload_without_project_url() {
        let payload = build_payload("2.0.0", "notes", None);
        assert_eq!(payload["text"], "@channel: New release *2.0.0*\nnotes");
    }
}
