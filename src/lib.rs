//! citemicro: CTS citation resolution and navigation over CEX corpora
//!
//! Resolves Canonical Text Services URNs against the ordered text nodes of a
//! CEX source. A query may name a single passage, a hierarchical level (every
//! node one to four components below it), or a `start-end` range, and results
//! carry each node's neighbours in the full work for sequential navigation.
//!
//! # Layers
//!
//! - **urn**: structural validation, stem/reference split, hierarchical matching
//! - **ingest**: CEX block reading into text and catalog records
//! - **corpus**: works (ordered node sequences) and the catalog index
//! - **query**: the navigator and range resolver
//! - **api**: one entry point per service endpoint, folding errors into results
//!
//! # Example
//!
//! ```
//! use citemicro::{CtsUrn, Navigator, TextRecord, Work};
//!
//! let records = vec![
//!     TextRecord::new("urn:cts:ns:work:1.1", "one"),
//!     TextRecord::new("urn:cts:ns:work:1.2", "two"),
//! ];
//! let work = Work::build(&records, "urn:cts:ns:work");
//! let query = CtsUrn::parse("urn:cts:ns:work:1").unwrap();
//! let nodes = Navigator::new(&work).passage(&query).unwrap();
//! assert_eq!(nodes.len(), 2);
//! ```

pub mod api;
pub mod config;
pub mod corpus;
mod error;
pub mod fetch;
pub mod ingest;
pub mod query;
pub mod urn;

pub use api::{CiteApi, TEXTS_VERSION};
pub use config::{ConfigError, ServiceConfig};
pub use corpus::{Catalog, CatalogEntry, TextNode, TextRecord, Work};
pub use error::{CtsError, CtsResult};
pub use fetch::{ContentFetcher, FetchError, FileFetcher, StaticFetcher};
pub use ingest::IngestError;
pub use query::{
    CatalogResult, CiteVersionResult, IndexRange, Navigator, NodeResult, PassageNode, Status,
    UrnListResult, VersionResult,
};
pub use urn::{CtsUrn, MatchOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
