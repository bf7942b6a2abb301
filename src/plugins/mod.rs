//! Release plugins

pub mod conventional_commits;
pub mod slack;

pub use conventional_commits::ConventionalCommitsPlugin;
pub use slack::{ReqwestTransport, SlackPlugin, SlackTransport};
