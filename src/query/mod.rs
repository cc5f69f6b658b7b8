//! Passage resolution and navigation
//!
//! Resolves a CTS query against one work: exact nodes, hierarchical
//! descendants, and ranges, plus first/last/previous/next traversal.

mod navigate;
mod range;
mod types;

pub use navigate::Navigator;
pub use range::{resolve_range, IndexRange};
pub use types::{
    CatalogResult, CiteVersionResult, NodeResult, PassageNode, Status, UrnListResult,
    VersionResult, Versions,
};
