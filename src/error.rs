//! Error taxonomy for citation resolution

use crate::fetch::FetchError;
use crate::ingest::IngestError;
use thiserror::Error;

/// Errors that can occur while resolving a citation against a source
#[derive(Debug, Error)]
pub enum CtsError {
    #[error("{0} is not valid CTS.")]
    InvalidUrn(String),

    #[error("No results for {0}")]
    NoMatchingWork(String),

    #[error("Could not find node to {0} in source.")]
    NoMatchingNode(String),

    #[error("Invalid range {urn}: start {start} lies after end {end}")]
    InvalidRange {
        urn: String,
        start: String,
        end: String,
    },

    #[error("Source unavailable at {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    #[error("Malformed source: {0}")]
    MalformedSource(#[from] IngestError),
}

impl CtsError {
    /// Short machine-readable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrn(_) => "InvalidURN",
            Self::NoMatchingWork(_) => "NoMatchingWork",
            Self::NoMatchingNode(_) => "NoMatchingNode",
            Self::InvalidRange { .. } => "InvalidRange",
            Self::SourceUnavailable { .. } => "SourceUnavailable",
            Self::MalformedSource(_) => "MalformedSource",
        }
    }

    pub(crate) fn unavailable(location: impl Into<String>, err: FetchError) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            reason: err.to_string(),
        }
    }
}

/// Result type for resolution operations
pub type CtsResult<T> = Result<T, CtsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn messages_name_the_request() {
        let err = CtsError::InvalidUrn("foo:bar".into());
        assert_eq!(err.to_string(), "foo:bar is not valid CTS.");

        let err = CtsError::NoMatchingWork("urn:cts:ns:missing:1".into());
        assert_eq!(err.to_string(), "No results for urn:cts:ns:missing:1");
    }

    #[test]
    fn fetch_failures_become_source_unavailable() {
        let err = CtsError::unavailable("corpus.cex", FetchError::Timeout(Duration::from_secs(5)));
        assert_eq!(err.kind(), "SourceUnavailable");
        assert!(err.to_string().contains("corpus.cex"));
    }
}
