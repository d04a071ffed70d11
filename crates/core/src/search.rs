//! Pure pieces of the Library of Congress search: request construction,
//! response model and the pagination policy.
//!
//! The shell owns the HTTP loop; everything it decides on lives here so it
//! can be tested with fixture data.

use serde::Deserialize;
use serde_json::Value;

use crate::categories;
use crate::error::SearchError;
use crate::table::ResultTable;

pub const BASE_URL: &str = "https://www.loc.gov/search/";

/// Records per page. The highest value the API lists in
/// `pagination.perpage_options`.
pub const PER_PAGE: usize = 150;

/// Upper bound on pages fetched for a single search, so a huge result set
/// cannot keep a job running forever.
pub const MAX_PAGES: usize = 5;

pub const MAX_RECORDS: usize = PER_PAGE * MAX_PAGES;

/// A validated search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    facet: Option<String>,
}

impl SearchRequest {
    /// Validate the inputs of a search.
    ///
    /// `category` is a category key such as `house_bills`; `None` and the
    /// empty sentinel both mean no filter.
    pub fn new(query: impl Into<String>, category: Option<&str>) -> Result<Self, SearchError> {
        let query = query.into();
        if query.is_empty() {
            return Err(SearchError::MissingQuery);
        }

        let facet = category
            .and_then(categories::facet_value)
            .map(|value| format!("partof:{value}"));

        Ok(SearchRequest { query, facet })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The `fa` clause, e.g. `partof:house bills`
    pub fn facet(&self) -> Option<&str> {
        self.facet.as_deref()
    }

    /// Query-string parameters shared by every page request
    pub fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query.clone()),
            ("fo", "json".to_string()),
            ("c", PER_PAGE.to_string()),
            ("at", "results,pagination".to_string()),
        ];

        if let Some(facet) = &self.facet {
            params.push(("fa", facet.clone()));
        }

        params
    }

    /// Parameters for a 1-based page number
    pub fn page_params(&self, page: usize) -> Vec<(&'static str, String)> {
        let mut params = self.base_params();
        params.push(("sp", page.to_string()));
        params
    }

    /// Full URL of a 1-based page
    pub fn page_url(&self, base_url: &str, page: usize) -> String {
        let query_string = self
            .page_params(page)
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{base_url}?{query_string}")
    }
}

/// One page of search results as returned by the API
#[derive(Debug, Deserialize, Clone)]
pub struct SearchPage {
    pub results: Vec<Value>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Pagination {
    /// Total number of records matching the query
    pub of: u64,
}

/// Pure transformation: one API page into a table page
pub fn transform_search_page(page: &SearchPage) -> ResultTable {
    ResultTable::from_records(&page.results)
}

/// Whether to stop after `pages_fetched` pages, given the server-reported total.
///
/// Counts full pages rather than returned rows, so a short page can never
/// extend the loop.
pub fn should_stop(pages_fetched: usize, total_reported: u64) -> bool {
    let fetched = pages_fetched * PER_PAGE;
    fetched as u64 >= total_reported || fetched >= MAX_RECORDS
}

/// Number of pages a search will request for a given total.
///
/// At least one page is always requested since the total is only known from
/// the first response.
pub fn expected_page_count(total_reported: u64) -> usize {
    let mut pages = 1;
    while !should_stop(pages, total_reported) {
        pages += 1;
    }
    pages
}

/// Result of a search as seen by a host: a table, or an error the user can read
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Table(ResultTable),
    Failed(SearchError),
}

impl SearchOutcome {
    pub fn into_result(self) -> Result<ResultTable, SearchError> {
        match self {
            SearchOutcome::Table(table) => Ok(table),
            SearchOutcome::Failed(err) => Err(err),
        }
    }
}

impl From<Result<ResultTable, SearchError>> for SearchOutcome {
    fn from(result: Result<ResultTable, SearchError>) -> Self {
        match result {
            Ok(table) => SearchOutcome::Table(table),
            Err(err) => SearchOutcome::Failed(err),
        }
    }
}
