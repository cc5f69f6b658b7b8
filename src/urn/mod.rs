//! CTS URN model and hierarchical reference matching

mod ctsurn;
pub mod matcher;

pub use ctsurn::{
    crop_to_catalog_form, is_range, stem_of, validate, CtsUrn, ReferenceKind, MAX_FIELDS,
    STEM_FIELDS,
};
pub use matcher::{
    classify, contains_at_level, descent_depth, level_contains, matching_depth, Classification,
    ComponentChars, MatchOptions, DEFAULT_MAX_DEPTH,
};
