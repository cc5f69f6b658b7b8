//! Sequential navigation and passage lookup over a work

use super::range::resolve_range;
use super::types::PassageNode;
use crate::corpus::Work;
use crate::error::{CtsError, CtsResult};
use crate::urn::{classify, Classification, CtsUrn, MatchOptions, ReferenceKind};

/// Navigation over one work's node sequence.
///
/// Neighbours are always taken from a node's absolute position in the
/// work, never relative to the subset a query matched.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'w> {
    work: &'w Work,
    options: MatchOptions,
}

impl<'w> Navigator<'w> {
    pub fn new(work: &'w Work) -> Self {
        Self {
            work,
            options: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Node at `index` with its previous/next URNs
    pub fn annotate(&self, index: usize) -> Option<PassageNode> {
        let node = self.work.get(index)?;
        let neighbour = |i: Option<usize>| i.and_then(|i| self.work.get(i)).map(|n| n.urn.clone());
        Some(PassageNode {
            urn: node.urn.clone(),
            text: Some(node.text.clone()),
            previous: neighbour(index.checked_sub(1)),
            next: neighbour(Some(index + 1)),
            sequence: node.sequence,
        })
    }

    fn annotate_all(&self, indices: impl IntoIterator<Item = usize>) -> Vec<PassageNode> {
        indices.into_iter().filter_map(|i| self.annotate(i)).collect()
    }

    fn exact_position(&self, urn: &str) -> CtsResult<usize> {
        self.work
            .position(urn)
            .ok_or_else(|| CtsError::NoMatchingNode(urn.to_string()))
    }

    /// First node of the work
    pub fn first(&self) -> CtsResult<PassageNode> {
        self.annotate(0)
            .ok_or_else(|| CtsError::NoMatchingNode(self.work.stem().to_string()))
    }

    /// Last node of the work
    pub fn last(&self) -> CtsResult<PassageNode> {
        self.work
            .len()
            .checked_sub(1)
            .and_then(|i| self.annotate(i))
            .ok_or_else(|| CtsError::NoMatchingNode(self.work.stem().to_string()))
    }

    /// Node preceding the node whose URN is exactly `urn`.
    ///
    /// `Ok(None)` when `urn` is the first node.
    pub fn previous(&self, urn: &str) -> CtsResult<Option<PassageNode>> {
        let index = self.exact_position(urn)?;
        Ok(index.checked_sub(1).and_then(|i| self.annotate(i)))
    }

    /// Node following the node whose URN is exactly `urn`.
    ///
    /// `Ok(None)` when `urn` is the last node.
    pub fn next(&self, urn: &str) -> CtsResult<Option<PassageNode>> {
        let index = self.exact_position(urn)?;
        Ok(self.annotate(index + 1))
    }

    /// Positions a query denotes: the exact node, every node at the
    /// shallowest matching depth, or a range span, in that precedence.
    pub fn positions(&self, query: &CtsUrn) -> CtsResult<Vec<usize>> {
        let request = query.to_string();
        let urns = self.work.urns();

        match classify(&urns, &request, self.options) {
            Classification::Exact(index) => Ok(vec![index]),
            Classification::Descendants { depth, positions } => {
                tracing::debug!(urn = %request, depth, matches = positions.len(), "hierarchical match");
                Ok(positions)
            }
            Classification::Unmatched => match query.reference_kind() {
                ReferenceKind::Range { .. } => {
                    let range = resolve_range(self.work, query, self.options)?;
                    Ok((range.start..=range.end).collect())
                }
                _ => Err(CtsError::NoMatchingNode(request)),
            },
        }
    }

    /// Passage text for a query, each node annotated with its neighbours
    pub fn passage(&self, query: &CtsUrn) -> CtsResult<Vec<PassageNode>> {
        Ok(self.annotate_all(self.positions(query)?))
    }

    /// URNs a query denotes, without text
    pub fn reff(&self, query: &CtsUrn) -> CtsResult<Vec<String>> {
        Ok(self
            .positions(query)?
            .into_iter()
            .filter_map(|i| self.work.get(i))
            .map(|n| n.urn.clone())
            .collect())
    }
}
