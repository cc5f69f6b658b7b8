//! Corpus structures built fresh for each resolution: works and catalogs

mod catalog;
mod work;

pub use catalog::{Catalog, CatalogEntry};
pub use work::{distinct_stems, select_stem, TextNode, TextRecord, Work};
