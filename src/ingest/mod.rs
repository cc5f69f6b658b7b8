//! Record ingestion from CEX sources
//!
//! Turns raw source text into the ordered records the resolution core
//! consumes. Field-count violations are collected per record instead of
//! aborting at the first bad line.

mod cex;

pub use cex::{extract_block, ingest_catalog_records, ingest_text_records};

use thiserror::Error;

/// A CEX block the ingester reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// `#!ctsdata`: `urn#text`
    CtsData,
    /// `#!ctscatalog`: `urn#citationScheme#groupName#workTitle#versionLabel#exemplarLabel#online[#lang]`
    CtsCatalog,
}

impl Block {
    pub fn marker(self) -> &'static str {
        match self {
            Self::CtsData => "#!ctsdata",
            Self::CtsCatalog => "#!ctscatalog",
        }
    }

    /// Field counts a record in this block may have
    pub fn expected_fields(self) -> &'static str {
        match self {
            Self::CtsData => "2",
            Self::CtsCatalog => "7 or 8",
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// A record line with the wrong number of fields for its block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    pub block: Block,
    /// 1-based, counted from the block marker line
    pub line: usize,
    pub found: usize,
    pub content: String,
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} line {}: expected {} fields, found {}",
            self.block,
            self.line,
            self.block.expected_fields(),
            self.found
        )
    }
}

/// Errors from reading a CEX source
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source has no {0} block")]
    MissingBlock(Block),

    #[error("{}", summarize(.0))]
    Malformed(Vec<MalformedRecord>),
}

fn summarize(records: &[MalformedRecord]) -> String {
    let details: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    format!("{} malformed record(s): {}", records.len(), details.join("; "))
}
