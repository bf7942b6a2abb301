use std::sync::Arc;

use crate::classifier::{ClassifierRules, CommitClassifier};
use crate::config::Config;
use crate::error::Result;
use crate::git::CommitSource;
use crate::hooks::{LogParse, Plugin};
use crate::normalizer::LogNormalizer;

/// Labels commits from their conventional-commit prefixes and absorbs
/// label-less pull request heads into their labeled children.
pub struct ConventionalCommitsPlugin {
    classifier: Arc<CommitClassifier>,
    normalizer: Arc<LogNormalizer>,
}

impl ConventionalCommitsPlugin {
    pub fn new(rules: ClassifierRules, source: Arc<dyn CommitSource>) -> Self {
        let classifier = CommitClassifier::new(rules);
        ConventionalCommitsPlugin {
            normalizer: Arc::new(LogNormalizer::new(classifier.clone(), source)),
            classifier: Arc::new(classifier),
        }
    }

    /// Build the plugin from the label definitions and conventional commit rules in `config`
    pub fn from_config(config: &Config, source: Arc<dyn CommitSource>) -> Result<Self> {
        let rules = ClassifierRules::from_config(&config.conventional_commits, &config.labels)?;
        Ok(Self::new(rules, source))
    }
}

impl Plugin for ConventionalCommitsPlugin {
    fn name(&self) -> &'static str {
        "conventional-commits"
    }

    fn on_create_log_parse(&self, log_parse: &mut LogParse) {
        log_parse.add_parser(self.classifier.clone());
        log_parse.add_normalizer(self.normalizer.clone());
    }
}
