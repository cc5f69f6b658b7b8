//! Transport-independent API layer.
//!
//! `CiteApi` is the single entry point for consumer-facing operations, one
//! method per CITE service endpoint. Transports (the CLI, an HTTP server,
//! direct embedding) call these methods and serialize the result; they never
//! reach into ingestion or the resolution core directly.
//!
//! Every call resolves a source location, fetches and ingests it, runs the
//! query, and folds any failure into an `Exception` result. Nothing here
//! returns `Err`.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::corpus::{distinct_stems, select_stem, Catalog, Work};
use crate::error::{CtsError, CtsResult};
use crate::fetch::{fetch_with_deadline, ContentFetcher};
use crate::ingest::{ingest_catalog_records, ingest_text_records};
use crate::query::{
    CatalogResult, CiteVersionResult, Navigator, NodeResult, PassageNode, Status, UrnListResult,
    VersionResult, Versions,
};
use crate::urn::CtsUrn;

/// Version of the CTS text service offered
pub const TEXTS_VERSION: &str = "1.1.0";

/// Service labels carried on every result
pub mod service {
    pub const CITE: &str = "/cite";
    pub const TEXTS: &str = "/texts";
    pub const TEXTS_VERSION: &str = "/texts/version";
    pub const FIRST: &str = "/texts/first";
    pub const LAST: &str = "/texts/last";
    pub const PREVIOUS: &str = "/texts/previous";
    pub const NEXT: &str = "/texts/next";
    pub const URNS: &str = "/texts/urns";
    pub const CATALOG: &str = "/catalog";
}

/// Single entry point for all resolution requests.
#[derive(Clone)]
pub struct CiteApi {
    config: Arc<ServiceConfig>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl CiteApi {
    pub fn new(config: ServiceConfig, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // --- Source loading ---

    /// Fetch and decode the source for `name`. Invalid UTF-8 is replaced
    /// rather than rejected.
    async fn load_source(&self, name: Option<&str>) -> CtsResult<String> {
        let location = self.config.source_location(name);
        tracing::debug!(location = %location, named = name.is_some(), "using source");

        let deadline = self.config.fetch_timeout();
        let bytes = fetch_with_deadline(self.fetcher.as_ref(), &location, deadline)
            .await
            .map_err(|e| {
                tracing::warn!(location = %location, error = %e, "source fetch failed");
                CtsError::unavailable(location.as_str(), e)
            })?;

        Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
            tracing::warn!(location = %location, "source is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }))
    }

    /// Validate `urn`, then build the work it addresses.
    async fn work_for(&self, name: Option<&str>, urn: &str) -> CtsResult<(CtsUrn, Work)> {
        let parsed = CtsUrn::parse(urn)?;
        let source = self.load_source(name).await?;
        let records = ingest_text_records(&source)?;
        let stems = distinct_stems(&records);
        let stem = select_stem(&stems, urn)?;
        let work = Work::build(&records, stem);
        tracing::debug!(stem, nodes = work.len(), "built work");
        Ok((parsed, work))
    }

    fn navigator<'w>(&self, work: &'w Work) -> Navigator<'w> {
        Navigator::new(work).with_options(self.config.match_options())
    }

    // --- Versions ---

    pub async fn cite_versions(&self) -> CiteVersionResult {
        tracing::info!(service = service::CITE, "called");
        CiteVersionResult {
            status: Status::Success,
            service: service::CITE.to_string(),
            versions: Versions {
                texts: TEXTS_VERSION.to_string(),
                textcatalog: None,
            },
        }
    }

    pub async fn texts_version(&self) -> VersionResult {
        tracing::info!(service = service::TEXTS_VERSION, "called");
        VersionResult {
            status: Status::Success,
            service: service::TEXTS_VERSION.to_string(),
            version: TEXTS_VERSION.to_string(),
        }
    }

    // --- Texts ---

    /// Every work stem in the source, with a trailing `:`.
    pub async fn work_urns(&self, source: Option<&str>) -> UrnListResult {
        tracing::info!(service = service::TEXTS, "called");
        let result = self.load_source(source).await.and_then(|text| {
            let records = ingest_text_records(&text)?;
            Ok(distinct_stems(&records)
                .into_iter()
                .map(|stem| format!("{}:", stem))
                .collect())
        });
        urn_outcome(service::TEXTS, "", result)
    }

    pub async fn first(&self, source: Option<&str>, urn: &str) -> NodeResult {
        tracing::info!(service = service::FIRST, urn, "called");
        let result = self
            .work_for(source, urn)
            .await
            .and_then(|(_, work)| self.navigator(&work).first().map(|node| vec![node]));
        node_outcome(service::FIRST, urn, result)
    }

    pub async fn last(&self, source: Option<&str>, urn: &str) -> NodeResult {
        tracing::info!(service = service::LAST, urn, "called");
        let result = self
            .work_for(source, urn)
            .await
            .and_then(|(_, work)| self.navigator(&work).last().map(|node| vec![node]));
        node_outcome(service::LAST, urn, result)
    }

    /// Node before `urn`; empty when `urn` is the first node.
    pub async fn previous(&self, source: Option<&str>, urn: &str) -> NodeResult {
        tracing::info!(service = service::PREVIOUS, urn, "called");
        let result = self
            .work_for(source, urn)
            .await
            .and_then(|(_, work)| {
                self.navigator(&work)
                    .previous(urn)
                    .map(|node| node.into_iter().collect::<Vec<_>>())
            });
        node_outcome(service::PREVIOUS, urn, result)
    }

    /// Node after `urn`; empty when `urn` is the last node.
    pub async fn next(&self, source: Option<&str>, urn: &str) -> NodeResult {
        tracing::info!(service = service::NEXT, urn, "called");
        let result = self
            .work_for(source, urn)
            .await
            .and_then(|(_, work)| {
                self.navigator(&work)
                    .next(urn)
                    .map(|node| node.into_iter().collect::<Vec<_>>())
            });
        node_outcome(service::NEXT, urn, result)
    }

    /// URNs `urn` denotes, without text.
    pub async fn reff(&self, source: Option<&str>, urn: &str) -> UrnListResult {
        tracing::info!(service = service::URNS, urn, "called");
        let result = self
            .work_for(source, urn)
            .await
            .and_then(|(query, work)| self.navigator(&work).reff(&query));
        urn_outcome(service::URNS, urn, result)
    }

    /// Passage text for `urn`: one node, a hierarchical level, or a range.
    pub async fn passage(&self, source: Option<&str>, urn: &str) -> NodeResult {
        tracing::info!(service = service::TEXTS, urn, "called");
        let result = self
            .work_for(source, urn)
            .await
            .and_then(|(query, work)| self.navigator(&work).passage(&query));
        node_outcome(service::TEXTS, urn, result)
    }

    // --- Catalog ---

    /// Catalog membership of `urn`'s work, or every catalog URN when no
    /// URN is given.
    pub async fn catalog(&self, source: Option<&str>, urn: Option<&str>) -> CatalogResult {
        tracing::info!(service = service::CATALOG, urn = urn.unwrap_or(""), "called");

        // Structural validity is checked before the source is touched
        let cropped = match urn.map(crate::urn::crop_to_catalog_form).transpose() {
            Ok(cropped) => cropped,
            Err(e) => return catalog_exception(e),
        };

        let catalog = match self.load_catalog(source).await {
            Ok(catalog) => catalog,
            Err(e) => return catalog_exception(e),
        };

        let result = match cropped {
            None => CatalogResult::new(
                Status::Success,
                service::CATALOG,
                "No URN specified. Printing URNs in catalog",
                catalog.urns(),
            ),
            Some(cropped) if catalog.contains(&cropped) => CatalogResult::new(
                Status::Success,
                service::CATALOG,
                format!("{} is in the CTS Catalog.", cropped),
                Vec::new(),
            ),
            Some(cropped) => CatalogResult::new(
                Status::Exception,
                service::CATALOG,
                format!("{} is not in the CTS Catalog. Printing URNs in catalog", cropped),
                catalog.urns(),
            ),
        };
        tracing::info!(service = service::CATALOG, status = ?result.status, "completed");
        result
    }

    async fn load_catalog(&self, source: Option<&str>) -> CtsResult<Catalog> {
        let text = self.load_source(source).await?;
        let catalog = Catalog::build(ingest_catalog_records(&text)?);
        tracing::debug!(entries = catalog.len(), "built catalog");
        Ok(catalog)
    }
}

fn log_exception(service: &str, urn: &str, err: &CtsError) {
    tracing::info!(service, urn, kind = err.kind(), error = %err, "completed with exception");
}

fn node_outcome(service: &str, urn: &str, result: CtsResult<Vec<PassageNode>>) -> NodeResult {
    match result {
        Ok(nodes) => {
            tracing::info!(service, urn, nodes = nodes.len(), "completed");
            NodeResult::success(urn, service, nodes)
        }
        Err(e) => {
            log_exception(service, urn, &e);
            NodeResult::exception(urn, service, &e)
        }
    }
}

fn urn_outcome(service: &str, urn: &str, result: CtsResult<Vec<String>>) -> UrnListResult {
    match result {
        Ok(urns) => {
            tracing::info!(service, urn, urns = urns.len(), "completed");
            UrnListResult::success(urn, service, urns)
        }
        Err(e) => {
            log_exception(service, urn, &e);
            UrnListResult::exception(urn, service, &e)
        }
    }
}

fn catalog_exception(err: CtsError) -> CatalogResult {
    log_exception(service::CATALOG, "", &err);
    CatalogResult::exception(service::CATALOG, &err)
}
