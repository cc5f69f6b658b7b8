//! Catalog index: registered work URNs and their descriptive fields

use crate::error::CtsResult;
use crate::urn::{crop_to_catalog_form, validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `#!ctscatalog` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub urn: String,
    pub citation_scheme: String,
    pub group_name: String,
    pub work_title: String,
    pub version_label: String,
    pub exemplar_label: String,
    pub online: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CatalogEntry {
    /// Build an entry from 7 or 8 catalog fields; any other count yields `None`.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        if !(7..=8).contains(&fields.len()) {
            return None;
        }
        Some(Self {
            urn: fields[0].to_string(),
            citation_scheme: fields[1].to_string(),
            group_name: fields[2].to_string(),
            work_title: fields[3].to_string(),
            version_label: fields[4].to_string(),
            exemplar_label: fields[5].to_string(),
            online: fields[6].to_string(),
            language: fields.get(7).map(|l| l.to_string()),
        })
    }

    /// Whether the entry is flagged as online (`true`, case-insensitive)
    pub fn is_online(&self) -> bool {
        self.online.trim().eq_ignore_ascii_case("true")
    }
}

/// Deduplicated catalog entries, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    urns: HashSet<String>,
    /// Every entry URN in cropped `stem:` form
    registered: HashSet<String>,
}

impl Catalog {
    /// Keep entries whose URN passes structural validation, first
    /// occurrence per URN. Header rows and other malformed URNs drop out
    /// silently.
    pub fn build(records: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in records {
            if !validate(&entry.urn) {
                tracing::debug!(urn = %entry.urn, "dropping catalog entry with invalid URN");
                continue;
            }
            if catalog.urns.insert(entry.urn.clone()) {
                if let Ok(cropped) = crop_to_catalog_form(&entry.urn) {
                    catalog.registered.insert(cropped);
                }
                catalog.entries.push(entry);
            }
        }
        catalog
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered URNs in first-seen order
    pub fn urns(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.urn.clone()).collect()
    }

    pub fn get(&self, urn: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.urn == urn)
    }

    /// Exact membership of an already-cropped `stem:` URN
    pub fn contains(&self, urn: &str) -> bool {
        self.registered.contains(urn)
    }

    /// Crop `urn` to its stem plus `:` and test membership.
    ///
    /// Returns the cropped form alongside the answer. Fails with
    /// `InvalidUrn` when `urn` has fewer than four fields.
    pub fn membership(&self, urn: &str) -> CtsResult<(String, bool)> {
        let cropped = crop_to_catalog_form(urn)?;
        let member = self.contains(&cropped);
        Ok((cropped, member))
    }
}
