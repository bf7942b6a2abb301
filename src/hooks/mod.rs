//! Hook system for plugins
//!
//! Plugins take part in two points of a release:
//! - on-create-log-parse: install commit parsers and normalizers
//! - after-release: react to a finished release (notifications)

pub mod executor;
pub mod lifecycle;
pub mod log_parse;

pub use executor::HookRunner;
pub use lifecycle::{HookType, Plugin, ReleaseContext};
pub use log_parse::{CommitNormalizer, CommitParser, LogParse};
