//! Work: the ordered sequence of citable nodes sharing one stem

use crate::error::{CtsError, CtsResult};
use crate::urn::stem_of;
use serde::{Deserialize, Serialize};

/// One ingested `urn#text` record, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub urn: String,
    pub text: String,
}

impl TextRecord {
    pub fn new(urn: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            urn: urn.into(),
            text: text.into(),
        }
    }
}

/// A citable node within a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    /// Full citation string
    pub urn: String,
    pub text: String,
    /// 1-based position in reading order
    pub sequence: usize,
}

/// The nodes of one work, in ingestion (reading) order.
///
/// Built per request and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    stem: String,
    nodes: Vec<TextNode>,
}

impl Work {
    /// Collect the records whose stem equals `stem`, numbering them 1..=N
    /// in the order encountered.
    ///
    /// Duplicate URNs are kept as separate nodes; exact lookups resolve to
    /// the first occurrence.
    pub fn build(records: &[TextRecord], stem: &str) -> Self {
        let nodes = records
            .iter()
            .filter(|r| stem_of(&r.urn) == Some(stem))
            .enumerate()
            .map(|(i, r)| TextNode {
                urn: r.urn.clone(),
                text: r.text.clone(),
                sequence: i + 1,
            })
            .collect();

        Self {
            stem: stem.to_string(),
            nodes,
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn nodes(&self) -> &[TextNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at a 0-based position
    pub fn get(&self, index: usize) -> Option<&TextNode> {
        self.nodes.get(index)
    }

    /// 0-based position of the node whose URN equals `urn`
    pub fn position(&self, urn: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.urn == urn)
    }

    /// URNs in sequence order
    pub fn urns(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.urn.as_str()).collect()
    }
}

/// Distinct work stems present in `records`, in first-seen order.
///
/// Records whose URN has fewer than four fields carry no stem and are skipped.
pub fn distinct_stems(records: &[TextRecord]) -> Vec<String> {
    let mut stems: Vec<String> = Vec::new();
    for stem in records.iter().filter_map(|r| stem_of(&r.urn)) {
        if !stems.iter().any(|s| s == stem) {
            stems.push(stem.to_string());
        }
    }
    stems
}

/// Select the stem a citation addresses: the one that equals `query` or
/// that `query` extends with `:`. Zero or several candidates is a
/// `NoMatchingWork`.
pub fn select_stem<'a>(stems: &'a [String], query: &str) -> CtsResult<&'a str> {
    let mut candidates = stems.iter().filter(|stem| {
        query == stem.as_str()
            || query
                .strip_prefix(stem.as_str())
                .is_some_and(|rest| rest.starts_with(':'))
    });

    match (candidates.next(), candidates.next()) {
        (Some(stem), None) => Ok(stem.as_str()),
        _ => Err(CtsError::NoMatchingWork(query.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<TextRecord> {
        vec![
            TextRecord::new("urn:cts:ns:a:1.1", "a one"),
            TextRecord::new("urn:cts:ns:b:1", "b one"),
            TextRecord::new("urn:cts:ns:a:1.2", "a two"),
            TextRecord::new("urn:cts:ns:a:2.1", "a three"),
        ]
    }

    #[test]
    fn build_numbers_matching_records_from_one() {
        let work = Work::build(&records(), "urn:cts:ns:a");
        assert_eq!(work.len(), 3);
        let seq: Vec<usize> = work.nodes().iter().map(|n| n.sequence).collect();
        assert_eq!(seq, vec![1, 2, 3]);
        assert_eq!(
            work.urns(),
            vec!["urn:cts:ns:a:1.1", "urn:cts:ns:a:1.2", "urn:cts:ns:a:2.1"]
        );
    }

    #[test]
    fn build_for_absent_stem_is_empty() {
        let work = Work::build(&records(), "urn:cts:ns:zzz");
        assert!(work.is_empty());
    }

    #[test]
    fn position_finds_first_occurrence() {
        let mut recs = records();
        recs.push(TextRecord::new("urn:cts:ns:a:1.1", "again"));
        let work = Work::build(&recs, "urn:cts:ns:a");
        assert_eq!(work.len(), 4);
        assert_eq!(work.position("urn:cts:ns:a:1.1"), Some(0));
        assert_eq!(work.position("urn:cts:ns:a:9"), None);
    }

    #[test]
    fn distinct_stems_preserves_first_seen_order() {
        assert_eq!(
            distinct_stems(&records()),
            vec!["urn:cts:ns:a".to_string(), "urn:cts:ns:b".to_string()]
        );
    }

    #[test]
    fn select_stem_requires_field_boundary() {
        let stems = vec!["urn:cts:ns:a".to_string(), "urn:cts:ns:ab".to_string()];
        assert_eq!(select_stem(&stems, "urn:cts:ns:a").unwrap(), "urn:cts:ns:a");
        assert_eq!(select_stem(&stems, "urn:cts:ns:ab:1.1").unwrap(), "urn:cts:ns:ab");
        assert!(matches!(
            select_stem(&stems, "urn:cts:ns:c:1"),
            Err(CtsError::NoMatchingWork(_))
        ));
    }
}
