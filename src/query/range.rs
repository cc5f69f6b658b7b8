//! Range resolution: `start-end` references to inclusive node spans
//!
//! Each boundary resolves by exact match first, then by the shallowest
//! hierarchical level at which any node descends from it. The start takes
//! the first such node and the end the last, so a coarse boundary captures
//! its whole subtree. A boundary that matches nothing falls back to the
//! start or end of the work.

use crate::corpus::Work;
use crate::error::{CtsError, CtsResult};
use crate::urn::{contains_at_level, matching_depth, CtsUrn, MatchOptions, ReferenceKind};

/// Inclusive span of 0-based node positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    /// Number of nodes covered
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Start,
    End,
}

fn boundary_index(urns: &[&str], target: &str, boundary: Boundary, options: MatchOptions) -> usize {
    let fallback = match boundary {
        Boundary::Start => 0,
        Boundary::End => urns.len() - 1,
    };

    let exact = |urn: &&str| *urn == target;
    let found = match boundary {
        Boundary::Start => urns.iter().position(exact),
        Boundary::End => urns.iter().rposition(exact),
    };
    if let Some(index) = found {
        return index;
    }

    let Some(depth) = matching_depth(urns.iter().copied(), target, options) else {
        return fallback;
    };
    let at_depth = |urn: &&str| contains_at_level(urn, target, depth, options.chars);
    let found = match boundary {
        Boundary::Start => urns.iter().position(at_depth),
        Boundary::End => urns.iter().rposition(at_depth),
    };
    found.unwrap_or(fallback)
}

/// Resolve a range URN to the span of `work` it denotes.
///
/// Fails with `NoMatchingNode` if `urn` is not a range or the work is
/// empty, and with `InvalidRange` if the end boundary contains another `-`
/// or resolves before the start.
pub fn resolve_range(work: &Work, urn: &CtsUrn, options: MatchOptions) -> CtsResult<IndexRange> {
    let ReferenceKind::Range { start, end } = urn.reference_kind() else {
        return Err(CtsError::NoMatchingNode(urn.to_string()));
    };
    let invalid = || CtsError::InvalidRange {
        urn: urn.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    };

    if end.contains('-') {
        return Err(invalid());
    }
    if work.is_empty() {
        return Err(CtsError::NoMatchingNode(urn.to_string()));
    }

    let urns = work.urns();
    let start_urn = urn.with_reference(start);
    let end_urn = urn.with_reference(end);
    let range = IndexRange {
        start: boundary_index(&urns, &start_urn, Boundary::Start, options),
        end: boundary_index(&urns, &end_urn, Boundary::End, options),
    };

    if range.start > range.end {
        tracing::debug!(urn = %urn, start = range.start, end = range.end, "reversed range");
        return Err(invalid());
    }
    Ok(range)
}
