//! CTS URN model: structural validation, stem/reference split, range detection

use crate::error::{CtsError, CtsResult};
use serde::{Deserialize, Serialize};

/// Number of colon-separated fields that make up a work stem
/// (`urn:cts:<namespace>:<work>`).
pub const STEM_FIELDS: usize = 4;

/// Maximum number of fields in a CTS URN (stem plus one reference field).
pub const MAX_FIELDS: usize = 5;

/// Returns true iff `s` is structurally a CTS URN: 4 or 5 colon-separated
/// fields, the first being `urn` and the second `cts`.
///
/// Namespace, work and reference contents are not inspected.
pub fn validate(s: &str) -> bool {
    let fields: Vec<&str> = s.split(':').collect();
    (STEM_FIELDS..=MAX_FIELDS).contains(&fields.len()) && fields[0] == "urn" && fields[1] == "cts"
}

/// Returns true iff `s` has a reference field and that field contains `-`.
pub fn is_range(s: &str) -> bool {
    s.split(':')
        .nth(STEM_FIELDS)
        .map(|reference| reference.contains('-'))
        .unwrap_or(false)
}

/// Truncate a URN to its first four fields.
///
/// Returns `None` when the string has fewer than four fields.
pub fn stem_of(s: &str) -> Option<&str> {
    let mut seen = 0;
    for (i, c) in s.char_indices() {
        if c == ':' {
            seen += 1;
            if seen == STEM_FIELDS {
                return Some(&s[..i]);
            }
        }
    }
    // Exactly four fields and no trailing separator
    (seen == STEM_FIELDS - 1).then_some(s)
}

/// Crop a URN to its work stem with a trailing `:`, the form catalog
/// entries are registered under.
///
/// Fails with `InvalidUrn` when the cropped stem is not itself a CTS URN.
pub fn crop_to_catalog_form(s: &str) -> CtsResult<String> {
    stem_of(s)
        .filter(|stem| validate(stem))
        .map(|stem| format!("{}:", stem))
        .ok_or_else(|| CtsError::InvalidUrn(s.to_string()))
}

/// A parsed CTS URN: work stem plus optional passage reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CtsUrn {
    stem: String,
    reference: Option<String>,
}

/// What a URN's reference field denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind<'a> {
    /// No reference: the URN addresses the whole work
    Absent,
    /// A single passage or hierarchical level
    Exact(&'a str),
    /// An inclusive span `start-end`
    Range { start: &'a str, end: &'a str },
}

impl CtsUrn {
    /// Parse and validate a citation string.
    ///
    /// An empty fifth field (`urn:cts:ns:work:`) is treated as no reference.
    pub fn parse(s: &str) -> CtsResult<Self> {
        if !validate(s) {
            return Err(CtsError::InvalidUrn(s.to_string()));
        }
        let fields: Vec<&str> = s.split(':').collect();
        let stem = fields[..STEM_FIELDS].join(":");
        let reference = fields
            .get(STEM_FIELDS)
            .filter(|r| !r.is_empty())
            .map(|r| r.to_string());
        Ok(Self { stem, reference })
    }

    /// Split a citation that must carry a reference into stem and reference.
    ///
    /// A 4-field URN is rejected with `InvalidUrn` rather than indexing past
    /// the last field.
    pub fn split(s: &str) -> CtsResult<Self> {
        let urn = Self::parse(s)?;
        if urn.reference.is_none() {
            return Err(CtsError::InvalidUrn(s.to_string()));
        }
        Ok(urn)
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Classify the reference as absent, exact, or a hierarchical range.
    ///
    /// A range splits on the first `-`; anything after a second `-` stays
    /// in the end boundary and is rejected by the range resolver.
    pub fn reference_kind(&self) -> ReferenceKind<'_> {
        match self.reference.as_deref() {
            None => ReferenceKind::Absent,
            Some(r) => match r.split_once('-') {
                Some((start, end)) => ReferenceKind::Range { start, end },
                None => ReferenceKind::Exact(r),
            },
        }
    }

    /// Full URN of a passage within this URN's work.
    pub fn with_reference(&self, reference: &str) -> String {
        format!("{}:{}", self.stem, reference)
    }
}

impl std::fmt::Display for CtsUrn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reference {
            Some(r) => write!(f, "{}:{}", self.stem, r),
            None => write!(f, "{}", self.stem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_four_and_five_fields() {
        assert!(validate("urn:cts:greekLit:tlg0012.tlg001"));
        assert!(validate("urn:cts:greekLit:tlg0012.tlg001:1.1"));
        assert!(validate("urn:cts:greekLit:tlg0012.tlg001.msA:"));
    }

    #[test]
    fn validate_rejects_wrong_shape() {
        assert!(!validate("foo:bar"));
        assert!(!validate("urn:cts:ns"));
        assert!(!validate("urn:cts:ns:work:1:2"));
        assert!(!validate("urn:cite:ns:work:1"));
        assert!(!validate("uri:cts:ns:work:1"));
        assert!(!validate(""));
    }

    #[test]
    fn is_range_only_looks_at_reference() {
        assert!(is_range("urn:cts:ns:work:1.1-2.1"));
        assert!(!is_range("urn:cts:ns:work:1.1"));
        assert!(!is_range("urn:cts:ns:some-work"));
    }

    #[test]
    fn stem_of_truncates_to_four_fields() {
        assert_eq!(stem_of("urn:cts:ns:work:1.1"), Some("urn:cts:ns:work"));
        assert_eq!(stem_of("urn:cts:ns:work:"), Some("urn:cts:ns:work"));
        assert_eq!(stem_of("urn:cts:ns:work"), Some("urn:cts:ns:work"));
        assert_eq!(stem_of("urn:cts:ns"), None);
    }

    #[test]
    fn crop_adds_trailing_colon() {
        assert_eq!(
            crop_to_catalog_form("urn:cts:ns:work.v1:3.4").unwrap(),
            "urn:cts:ns:work.v1:"
        );
        assert!(matches!(
            crop_to_catalog_form("urn:cts"),
            Err(CtsError::InvalidUrn(_))
        ));
        assert!(crop_to_catalog_form("foo:bar:baz:qux:1").is_err());
    }

    #[test]
    fn parse_splits_stem_and_reference() {
        let urn = CtsUrn::parse("urn:cts:ns:work:1.2").unwrap();
        assert_eq!(urn.stem(), "urn:cts:ns:work");
        assert_eq!(urn.reference(), Some("1.2"));
        assert_eq!(urn.reference_kind(), ReferenceKind::Exact("1.2"));
        assert_eq!(urn.to_string(), "urn:cts:ns:work:1.2");
    }

    #[test]
    fn parse_classifies_ranges() {
        let urn = CtsUrn::parse("urn:cts:ns:work:1.1-2.1").unwrap();
        assert_eq!(
            urn.reference_kind(),
            ReferenceKind::Range {
                start: "1.1",
                end: "2.1"
            }
        );
        assert_eq!(urn.with_reference("2.1"), "urn:cts:ns:work:2.1");
    }

    #[test]
    fn split_guards_missing_reference() {
        assert!(matches!(
            CtsUrn::split("urn:cts:ns:work"),
            Err(CtsError::InvalidUrn(_))
        ));
        assert!(CtsUrn::split("urn:cts:ns:work:1").is_ok());
        assert_eq!(
            CtsUrn::parse("urn:cts:ns:work").unwrap().reference_kind(),
            ReferenceKind::Absent
        );
    }
}
