//! Result shapes produced by resolution

use crate::error::CtsError;
use serde::{Deserialize, Serialize};

/// Outcome of a resolution request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Success,
    Exception,
}

/// A resolved node annotated with its neighbours in the full work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageNode {
    pub urn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// URN of the preceding node, `None` at the start of the work
    pub previous: Option<String>,
    /// URN of the following node, `None` at the end of the work
    pub next: Option<String>,
    /// 1-based position in the work
    pub sequence: usize,
}

/// Result of a passage or navigation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResult {
    #[serde(rename = "requestedURN")]
    pub request_urn: String,
    pub status: Status,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub nodes: Vec<PassageNode>,
}

impl NodeResult {
    pub fn success(request_urn: &str, service: &str, nodes: Vec<PassageNode>) -> Self {
        Self {
            request_urn: request_urn.to_string(),
            status: Status::Success,
            service: service.to_string(),
            message: None,
            nodes,
        }
    }

    pub fn exception(request_urn: &str, service: &str, error: &CtsError) -> Self {
        Self {
            request_urn: request_urn.to_string(),
            status: Status::Exception,
            service: service.to_string(),
            message: Some(error.to_string()),
            nodes: Vec::new(),
        }
    }
}

/// Result of a request that lists URNs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrnListResult {
    #[serde(rename = "requestedURN")]
    pub request_urn: String,
    pub status: Status,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub urns: Vec<String>,
}

impl UrnListResult {
    pub fn success(request_urn: &str, service: &str, urns: Vec<String>) -> Self {
        Self {
            request_urn: request_urn.to_string(),
            status: Status::Success,
            service: service.to_string(),
            message: None,
            urns,
        }
    }

    pub fn exception(request_urn: &str, service: &str, error: &CtsError) -> Self {
        Self {
            request_urn: request_urn.to_string(),
            status: Status::Exception,
            service: service.to_string(),
            message: Some(error.to_string()),
            urns: Vec::new(),
        }
    }
}

/// Result of a catalog request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResult {
    pub status: Status,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub urns: Vec<String>,
}

impl CatalogResult {
    pub fn new(status: Status, service: &str, message: impl Into<String>, urns: Vec<String>) -> Self {
        Self {
            status,
            service: service.to_string(),
            message: Some(message.into()),
            urns,
        }
    }

    pub fn exception(service: &str, error: &CtsError) -> Self {
        Self::new(Status::Exception, service, error.to_string(), Vec::new())
    }
}

/// Versions of the CITE services offered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    pub texts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textcatalog: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiteVersionResult {
    pub status: Status,
    pub service: String,
    pub versions: Versions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResult {
    pub status: Status,
    pub service: String,
    pub version: String,
}
