//! Source fetching: retrieves raw CEX bytes from a configured location
//!
//! Resolution never reads a source directly; it goes through a
//! `ContentFetcher` so the location scheme stays pluggable. Two
//! implementations:
//! - `FileFetcher`: reads local paths (production)
//! - `StaticFetcher`: serves preloaded sources from memory (testing)

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Errors from fetching a source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("source not available: {0}")]
    Unavailable(String),
    #[error("fetch timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetcher trait for reading a source by location.
///
/// A location is whatever the configuration produced: a file path or a
/// name the fetcher knows how to resolve.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}

/// Reads sources from the local filesystem, optionally under a base
/// directory.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locations against `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        match &self.base {
            Some(base) => base.join(location),
            None => PathBuf::from(location),
        }
    }
}

#[async_trait]
impl ContentFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(location);
        tracing::debug!(path = %path.display(), "reading source");
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::Unavailable(format!("{} not found", path.display())))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Serves preconfigured sources from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    sources: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content served for `location`.
    pub fn with_source(mut self, location: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.sources.insert(location.into(), content.into());
        self
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        self.sources
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::Unavailable(format!("no static source '{}'", location)))
    }
}

/// Fetch `location`, giving up after `deadline`.
pub async fn fetch_with_deadline(
    fetcher: &dyn ContentFetcher,
    location: &str,
    deadline: Duration,
) -> Result<Vec<u8>, FetchError> {
    match tokio::time::timeout(deadline, fetcher.fetch(location)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(location, secs = deadline.as_secs(), "source fetch timed out");
            Err(FetchError::Timeout(deadline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct StalledFetcher;

    #[async_trait]
    impl ContentFetcher for StalledFetcher {
        async fn fetch(&self, _location: &str) -> Result<Vec<u8>, FetchError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn static_fetcher_serves_registered_sources() {
        let fetcher = StaticFetcher::new().with_source("a.cex", "#!ctsdata\n");
        assert_eq!(fetcher.fetch("a.cex").await.unwrap(), b"#!ctsdata\n");
        assert!(matches!(
            fetcher.fetch("b.cex").await,
            Err(FetchError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn file_fetcher_reads_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("corpus.cex")).unwrap();
        file.write_all(b"#!ctsdata\nurn:cts:ns:w:1#one\n").unwrap();

        let fetcher = FileFetcher::with_base(dir.path());
        let bytes = fetcher.fetch("corpus.cex").await.unwrap();
        assert!(bytes.starts_with(b"#!ctsdata"));
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FileFetcher::with_base(dir.path());
        assert!(matches!(
            fetcher.fetch("absent.cex").await,
            Err(FetchError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn deadline_bounds_a_stalled_fetch() {
        let deadline = Duration::from_millis(50);
        let err = fetch_with_deadline(&StalledFetcher, "slow.cex", deadline)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(d) if d == deadline));
    }

    #[test]
    fn timeout_message_names_the_deadline() {
        let err = FetchError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "fetch timed out after 30s");
    }
}
