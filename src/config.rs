//! Service configuration
//!
//! Loaded once from a JSON or YAML file and injected into [`crate::CiteApi`].
//! Keys follow the CITE microservice `config.json` layout; keys this crate does not
//! use (`host`, `port`) are ignored.

use crate::urn::{ComponentChars, MatchOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Errors from loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Location prefix for named sources
    #[serde(default)]
    pub cex_source: String,
    /// Source used when a request names none
    #[serde(default)]
    pub test_cex_source: String,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    /// Reject `|` inside reference components
    #[serde(default)]
    pub strict_reference_chars: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cex_source: String::new(),
            test_cex_source: String::new(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            strict_reference_chars: false,
        }
    }
}

impl ServiceConfig {
    /// Read a config file, choosing the parser by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config = match extension.as_deref() {
            Some("json") => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Location of the named source, or the default source when unnamed.
    pub fn source_location(&self, name: Option<&str>) -> String {
        match name {
            Some(name) => format!("{}{}.cex", self.cex_source, name),
            None => self.test_cex_source.clone(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn match_options(&self) -> MatchOptions {
        let chars = if self.strict_reference_chars {
            ComponentChars::Strict
        } else {
            ComponentChars::PipeCompatible
        };
        MatchOptions {
            chars,
            ..MatchOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_microservice_json_layout() {
        let (_dir, path) = write_config(
            "config.json",
            r#"{
                "host": "127.0.0.1",
                "port": ":8080",
                "cex_source": "/data/cex/",
                "test_cex_source": "/data/cex/test.cex"
            }"#,
        );
        let config = ServiceConfig::load(&path).unwrap();
        assert_eq!(config.cex_source, "/data/cex/");
        assert_eq!(config.test_cex_source, "/data/cex/test.cex");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert!(!config.strict_reference_chars);
    }

    #[test]
    fn loads_yaml() {
        let (_dir, path) = write_config(
            "config.yml",
            "cex_source: /srv/\ntest_cex_source: /srv/t.cex\nfetch_timeout_secs: 5\nstrict_reference_chars: true\n",
        );
        let config = ServiceConfig::load(&path).unwrap();
        assert_eq!(config.fetch_timeout_secs, 5);
        assert_eq!(config.match_options(), MatchOptions::strict());
    }

    #[test]
    fn rejects_unknown_extension() {
        let (_dir, path) = write_config("config.toml", "cex_source = ''");
        assert!(matches!(
            ServiceConfig::load(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let (_dir, path) = write_config("config.json", "{ not json");
        assert!(matches!(ServiceConfig::load(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn named_sources_resolve_under_prefix() {
        let config = ServiceConfig {
            cex_source: "/data/".into(),
            test_cex_source: "/data/test.cex".into(),
            ..ServiceConfig::default()
        };
        assert_eq!(config.source_location(Some("iliad")), "/data/iliad.cex");
        assert_eq!(config.source_location(None), "/data/test.cex");
    }
}
