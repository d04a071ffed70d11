//! Column schema for Library of Congress search results
//!
//! Maps record fields from the search API onto a fixed, ordered set of output
//! columns. Records from the API are heterogeneous: any field may be missing,
//! and list fields occasionally arrive as scalars.

use serde_json::Value;

/// Separator used when flattening multi-valued fields
pub const LIST_SEPARATOR: &str = "; ";

/// How a raw JSON value becomes a cell string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Keep the value as-is (stringified)
    Identity,
    /// Join a list of values with [`LIST_SEPARATOR`]
    JoinList,
}

impl Normalize {
    pub fn apply(self, value: &Value) -> String {
        match (self, value) {
            (Normalize::JoinList, Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(stringify)
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            _ => stringify(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub source_key: &'static str,
    pub output_name: &'static str,
    pub normalize: Normalize,
}

const fn column(
    source_key: &'static str,
    output_name: &'static str,
    normalize: Normalize,
) -> ColumnDefinition {
    ColumnDefinition {
        source_key,
        output_name,
        normalize,
    }
}

/// Output columns, in output order.
pub static COLUMNS: [ColumnDefinition; 10] = [
    column("id", "id", Normalize::Identity),
    column("title", "Title", Normalize::Identity),
    column("contributor", "Contributor", Normalize::JoinList),
    column("subject", "Subject", Normalize::JoinList),
    column("original_format", "Original format", Normalize::JoinList),
    column("location", "Location", Normalize::JoinList),
    column("description", "Description", Normalize::JoinList),
    // Date formats vary by source collection, so they stay raw strings.
    column("date", "Date", Normalize::Identity),
    column("number_lccn", "LCCN", Normalize::JoinList),
    column("language", "Languages", Normalize::JoinList),
];

/// Output column names in order
pub fn column_names() -> Vec<String> {
    COLUMNS.iter().map(|c| c.output_name.to_string()).collect()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract one column's values from a page of records.
///
/// Returns one entry per record. A field that is absent or `null` becomes
/// `None`, which is distinct from a field that is present but empty.
pub fn parse_series(records: &[Value], column: &ColumnDefinition) -> Vec<Option<String>> {
    records
        .iter()
        .map(|record| match record.get(column.source_key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(column.normalize.apply(value)),
        })
        .collect()
}
