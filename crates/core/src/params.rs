//! Persisted search parameters and their migration between versions
//!
//! Version 0 stored the category filter (`partof`) as an integer index into
//! [`crate::categories::PARTOF_V0`]. Version 1 stores the category key itself,
//! with `""` meaning no filter. Only version 1 parameters reach the fetcher.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{self, NO_FILTER};

pub const QUERY_KEY: &str = "q";
pub const CATEGORY_KEY: &str = "partof";

/// The `partof` field, in whichever version it was stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategorySelector {
    /// v0: ordinal into the category list
    LegacyIndexed(i64),
    /// v1: category key, or the "no filter" sentinel
    NamedFilter(String),
}

impl Default for CategorySelector {
    fn default() -> Self {
        CategorySelector::NamedFilter(NO_FILTER.to_string())
    }
}

impl CategorySelector {
    /// Convert to the current representation.
    pub fn migrate(self) -> CategorySelector {
        match self {
            CategorySelector::LegacyIndexed(index) => {
                CategorySelector::NamedFilter(categories::key_for_index(index).to_string())
            }
            named => named,
        }
    }

    /// Category key to filter on, `None` when no filter applies.
    ///
    /// Legacy values are resolved through the same lookup the migration uses.
    pub fn category_key(&self) -> Option<&str> {
        let key = match self {
            CategorySelector::LegacyIndexed(index) => categories::key_for_index(*index),
            CategorySelector::NamedFilter(name) => name.as_str(),
        };
        (key != NO_FILTER).then_some(key)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, CategorySelector::LegacyIndexed(_))
    }
}

/// Search parameters as stored by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "q", default)]
    pub query: String,

    #[serde(rename = "partof", default)]
    pub category: CategorySelector,

    /// Host fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>, category: CategorySelector) -> Self {
        SearchParams {
            query: query.into(),
            category,
            extra: Map::new(),
        }
    }
}

/// Bring parameters up to the current version. Idempotent.
pub fn migrate(params: SearchParams) -> SearchParams {
    SearchParams {
        category: params.category.migrate(),
        ..params
    }
}

/// Migrate a raw parameter dictionary without interpreting its other keys.
///
/// Anything that is not an object, or has no integer `partof`, is returned
/// unchanged.
pub fn migrate_value(mut params: Value) -> Value {
    if let Some(object) = params.as_object_mut() {
        if let Some(slot) = object.get_mut(CATEGORY_KEY) {
            if let Some(index) = legacy_index(slot) {
                *slot = Value::String(categories::key_for_index(index).to_string());
            }
        }
    }
    params
}

fn legacy_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if n.is_i64() => n.as_i64(),
        // Too large for i64, so certainly out of range.
        Value::Number(n) if n.is_u64() => Some(i64::MAX),
        _ => None,
    }
}
