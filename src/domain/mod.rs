//! Domain types - commits and label definitions, independent of git I/O

pub mod commit;
pub mod label;

pub use commit::{Commit, ParsedCommit, PrCommit};
pub use label::{default_label_definitions, version_map, LabelDefinition, ReleaseType};
