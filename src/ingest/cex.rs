//! CEX block reader
//!
//! A CEX source is plain text divided into blocks, each opened by a `#!name`
//! marker line and running to the next `#!`. Records are one per line with
//! `#`-delimited fields. Lines beginning with `//` are comments.

use super::{Block, IngestError, MalformedRecord};
use crate::corpus::{CatalogEntry, TextRecord};

/// Content of the first block introduced by `block`'s marker, up to the
/// next `#!`.
pub fn extract_block(source: &str, block: Block) -> Result<&str, IngestError> {
    let marker = block.marker();
    let start = source
        .find(marker)
        .map(|i| i + marker.len())
        .ok_or(IngestError::MissingBlock(block))?;
    let body = &source[start..];
    Ok(match body.find("#!") {
        Some(end) => &body[..end],
        None => body,
    })
}

/// Non-comment, non-blank lines of a block with their 1-based line numbers
/// (relative to the marker line).
fn record_lines(body: &str) -> impl Iterator<Item = (usize, &str)> {
    body.split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with("//"))
}

/// Split every record line into fields and convert it, collecting each line
/// whose field count `convert` rejects.
fn read_records<T>(
    source: &str,
    block: Block,
    convert: impl Fn(&[&str]) -> Option<T>,
) -> Result<Vec<T>, IngestError> {
    let body = extract_block(source, block)?;
    let mut records = Vec::new();
    let mut malformed = Vec::new();

    for (line, content) in record_lines(body) {
        let fields: Vec<&str> = content.split('#').collect();
        match convert(&fields) {
            Some(record) => records.push(record),
            None => {
                tracing::warn!(block = %block, line, found = fields.len(), "malformed record");
                malformed.push(MalformedRecord {
                    block,
                    line,
                    found: fields.len(),
                    content: content.to_string(),
                });
            }
        }
    }

    if malformed.is_empty() {
        Ok(records)
    } else {
        Err(IngestError::Malformed(malformed))
    }
}

/// Read the `#!ctsdata` block as ordered `(urn, text)` records.
pub fn ingest_text_records(source: &str) -> Result<Vec<TextRecord>, IngestError> {
    let records = read_records(source, Block::CtsData, |fields| match fields {
        [urn, text] => Some(TextRecord::new(*urn, *text)),
        _ => None,
    })?;
    tracing::debug!(count = records.len(), "ingested text records");
    Ok(records)
}

/// Read the `#!ctscatalog` block as catalog entries.
///
/// URNs are not validated here; the catalog index drops invalid ones.
pub fn ingest_catalog_records(source: &str) -> Result<Vec<CatalogEntry>, IngestError> {
    let records = read_records(source, Block::CtsCatalog, CatalogEntry::from_fields)?;
    tracing::debug!(count = records.len(), "ingested catalog records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "#!cexversion\n3.0\n\n\
#!ctscatalog\n\
urn#citationScheme#groupName#workTitle#versionLabel#exemplarLabel#online#lang\n\
urn:cts:greekLit:tlg0012.tlg001.msA:#book/line#Homeric Epic#Iliad#Venetus A##true#grc\n\
\n\
#!ctsdata\n\
// Iliad, book 1\n\
urn:cts:greekLit:tlg0012.tlg001.msA:1.1#Μῆνιν ἄειδε θεὰ\r\n\
urn:cts:greekLit:tlg0012.tlg001.msA:1.2#οὐλομένην, ἣ μυρί᾽\n\
\n\
#!relations\n\
a#b#c\n";

    #[test]
    fn extract_block_stops_at_next_marker() {
        let body = extract_block(SOURCE, Block::CtsData).unwrap();
        assert!(body.contains("1.2#"));
        assert!(!body.contains("a#b#c"));
    }

    #[test]
    fn missing_block_is_reported() {
        let err = extract_block("#!cexversion\n3.0\n", Block::CtsData).unwrap_err();
        assert!(matches!(err, IngestError::MissingBlock(Block::CtsData)));
    }

    #[test]
    fn text_records_skip_comments_and_carriage_returns() {
        let records = ingest_text_records(SOURCE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].urn, "urn:cts:greekLit:tlg0012.tlg001.msA:1.1");
        assert_eq!(records[0].text, "Μῆνιν ἄειδε θεὰ");
    }

    #[test]
    fn catalog_records_keep_header_row() {
        let records = ingest_catalog_records(SOURCE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].urn, "urn");
        assert_eq!(records[1].language.as_deref(), Some("grc"));
    }

    #[test]
    fn every_malformed_line_is_reported() {
        let source = "#!ctsdata\nurn:cts:ns:w:1#one\nurn:cts:ns:w:2\nurn:cts:ns:w:3#a#b\n";
        match ingest_text_records(source).unwrap_err() {
            IngestError::Malformed(bad) => {
                let lines: Vec<usize> = bad.iter().map(|r| r.line).collect();
                assert_eq!(lines, vec![3, 4]);
                assert_eq!(bad[0].found, 1);
                assert_eq!(bad[1].found, 3);
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
    }
}
