use std::sync::Arc;

use crate::error::Result;
use crate::hooks::{HookType, LogParse, Plugin, ReleaseContext};

/// Dispatches hooks to an explicit list of plugins
#[derive(Clone, Default)]
pub struct HookRunner {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl HookRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. Plugins are called in registration order.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        tracing::debug!(plugin = plugin.name(), "registered plugin");
        self.plugins.push(plugin);
    }

    /// Build a log parse pipeline with every plugin's parsers and normalizers installed
    pub fn create_log_parse(&self) -> LogParse {
        let mut log_parse = LogParse::new();
        for plugin in &self.plugins {
            tracing::debug!(
                hook = HookType::OnCreateLogParse.name(),
                plugin = plugin.name(),
                "running hook"
            );
            plugin.on_create_log_parse(&mut log_parse);
        }
        log_parse
    }

    /// Run every plugin's after-release hook
    ///
    /// Plugins run one after another; the first failure stops the run and is
    /// returned to the caller.
    pub async fn after_release(&self, context: &ReleaseContext) -> Result<()> {
        for plugin in &self.plugins {
            tracing::info!(
                hook = HookType::AfterRelease.name(),
                plugin = plugin.name(),
                "running hook"
            );
            plugin.after_release(context).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        calls: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl Plugin for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn after_release(&self, _context: &ReleaseContext) -> Result<()> {
            self.calls.lock().unwrap().push(self.name);
            if self.fail {
                return Err(ReleaseError::notify("failed"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_after_release_runs_in_order_and_stops_on_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut runner = HookRunner::new();
        for (name, fail) in [("first", false), ("second", true), ("third", false)] {
            runner.register(Arc::new(Recorder {
                name,
                calls: calls.clone(),
                fail,
            }));
        }

        let result = runner.after_release(&ReleaseContext::default()).await;
        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_create_log_parse_with_no_plugins() {
        let log_parse = HookRunner::new().create_log_parse();
        assert_eq!(log_parse.parser_count(), 0);
        assert_eq!(log_parse.normalizer_count(), 0);
    }
}
