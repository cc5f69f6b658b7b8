//! Hierarchical reference matching
//!
//! A node URN is *contained* in a prefix URN at depth `L` when the node URN
//! begins with the prefix and the remainder consists of exactly `L`
//! components. Each component is one separator (`:` or `.`) followed by one
//! or more component characters, and nothing may trail the last component.
//!
//! The component character class is digits and lowercase ASCII letters.
//! In [`ComponentChars::PipeCompatible`] mode the literal `|` is accepted as
//! well, matching the character class `[0-9|a-z]` that earlier resolvers
//! used.

use serde::{Deserialize, Serialize};

/// Deepest hierarchical level consulted by default.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Which characters may appear inside a reference component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentChars {
    /// Digits, lowercase letters and the literal `|`
    #[default]
    PipeCompatible,
    /// Digits and lowercase letters only
    Strict,
}

impl ComponentChars {
    fn accepts(self, c: char) -> bool {
        c.is_ascii_digit() || c.is_ascii_lowercase() || (c == '|' && self == Self::PipeCompatible)
    }
}

/// Options controlling hierarchical matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub chars: ComponentChars,
    /// Deepest level tried, inclusive. Levels are tried from 1 upwards.
    pub max_depth: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            chars: ComponentChars::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MatchOptions {
    pub fn strict() -> Self {
        Self {
            chars: ComponentChars::Strict,
            ..Self::default()
        }
    }
}

fn is_separator(c: char) -> bool {
    c == ':' || c == '.'
}

/// Number of components in `remainder`, or `None` if it is not a
/// well-formed component sequence.
fn component_count(remainder: &str, chars: ComponentChars) -> Option<usize> {
    let mut count = 0;
    let mut component_len = 0;
    for (i, c) in remainder.chars().enumerate() {
        if is_separator(c) {
            // A separator must open the remainder and close a non-empty component
            if i > 0 && component_len == 0 {
                return None;
            }
            count += 1;
            component_len = 0;
        } else if i == 0 || !chars.accepts(c) {
            return None;
        } else {
            component_len += 1;
        }
    }
    (count > 0 && component_len > 0).then_some(count)
}

/// Depth at which `node_urn` descends from `prefix_urn`, if it does.
///
/// Exact equality is not a descent and yields `None`.
pub fn descent_depth(node_urn: &str, prefix_urn: &str, chars: ComponentChars) -> Option<usize> {
    node_urn
        .strip_prefix(prefix_urn)
        .and_then(|rest| component_count(rest, chars))
}

/// True iff `node_urn` descends from `prefix_urn` at exactly `level`.
pub fn contains_at_level(node_urn: &str, prefix_urn: &str, level: usize, chars: ComponentChars) -> bool {
    descent_depth(node_urn, prefix_urn, chars) == Some(level)
}

/// Shallowest level (1..=max_depth) at which any of `urns` descends from
/// `prefix_urn`.
pub fn matching_depth<'a, I>(urns: I, prefix_urn: &str, options: MatchOptions) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    urns.into_iter()
        .filter_map(|urn| descent_depth(urn, prefix_urn, options.chars))
        .filter(|depth| (1..=options.max_depth).contains(depth))
        .min()
}

/// True iff any of `urns` descends from `prefix_urn` at levels 1..=max_depth.
pub fn level_contains<'a, I>(urns: I, prefix_urn: &str, options: MatchOptions) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    matching_depth(urns, prefix_urn, options).is_some()
}

/// How a non-range query resolved against an ordered URN sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The query equals the URN at this position
    Exact(usize),
    /// The query is a prefix of these positions, all at `depth`
    Descendants { depth: usize, positions: Vec<usize> },
    /// Nothing matched
    Unmatched,
}

/// Classify `query` against `urns`, in precedence order: exact equality,
/// then depth 1, 2, ... up to `max_depth`. Only the first applicable
/// branch is taken.
pub fn classify(urns: &[&str], query: &str, options: MatchOptions) -> Classification {
    if let Some(pos) = urns.iter().position(|urn| *urn == query) {
        return Classification::Exact(pos);
    }

    match matching_depth(urns.iter().copied(), query, options) {
        Some(depth) => Classification::Descendants {
            depth,
            positions: urns
                .iter()
                .enumerate()
                .filter(|(_, urn)| contains_at_level(urn, query, depth, options.chars))
                .map(|(i, _)| i)
                .collect(),
        },
        None => Classification::Unmatched,
    }
}
