//! Workflows driven by the command line

pub mod orchestration;
