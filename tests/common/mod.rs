//! Common test utilities for resolution tests
//!
//! A small fixture corpus with two works, a catalog block, and an API wired
//! to it through a `StaticFetcher`.

#![allow(dead_code)]

use citemicro::{CiteApi, ServiceConfig, StaticFetcher};
use std::sync::Arc;

pub const STEM: &str = "urn:cts:ns:work";

/// Default (unnamed) source location
pub const DEFAULT_SOURCE: &str = "fixtures/test.cex";

/// Prefix named sources resolve under
pub const SOURCE_PREFIX: &str = "fixtures/";

pub const FIXTURE: &str = "#!cexversion\n\
3.0\n\
\n\
#!citelibrary\n\
name#Fixture library\n\
\n\
#!ctscatalog\n\
urn#citationScheme#groupName#workTitle#versionLabel#exemplarLabel#online#lang\n\
urn:cts:ns:work:#book/line#Group#Work#Edition##true#grc\n\
urn:cts:ns:poem.deep:#book/poem/line/word#Group#Poem#Edition##true#lat\n\
\n\
#!ctsdata\n\
// book 1\n\
urn:cts:ns:work:1.1#Sing, goddess\n\
urn:cts:ns:work:1.2#the wrath\n\
// book 2\n\
urn:cts:ns:work:2.1#of Achilles\n\
urn:cts:ns:poem.deep:1.1.1.1#alpha\n\
urn:cts:ns:poem.deep:1.1.1.2#beta\n\
urn:cts:ns:poem.deep:1.1.2.1#gamma\n\
urn:cts:ns:poem.deep:2.1.1.1#delta\n";

/// Named source with a single-node work
pub const SINGLE: &str = "#!ctsdata\nurn:cts:ns:solo:1#only\n";

/// Full URN of `reference` in the fixture's main work
pub fn urn(reference: &str) -> String {
    format!("{}:{}", STEM, reference)
}

pub fn config() -> ServiceConfig {
    ServiceConfig {
        cex_source: SOURCE_PREFIX.into(),
        test_cex_source: DEFAULT_SOURCE.into(),
        ..ServiceConfig::default()
    }
}

pub fn fetcher() -> StaticFetcher {
    StaticFetcher::new()
        .with_source(DEFAULT_SOURCE, FIXTURE)
        .with_source(format!("{}single.cex", SOURCE_PREFIX), SINGLE)
}

pub fn api() -> CiteApi {
    CiteApi::new(config(), Arc::new(fetcher()))
}
