pub mod classifier;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod logger;
pub mod normalizer;
pub mod plugins;
pub mod ui;
pub mod version;
pub mod warning;

pub use error::{ReleaseError, Result};
