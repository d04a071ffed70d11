use crate::prelude::*;
use locsearch_core::search::{should_stop, transform_search_page, SearchPage, SearchRequest};
use locsearch_core::{ResultTable, SearchError, SearchOutcome};

use super::transport::{ReqwestTransport, Transport};

/// Public data function - used by both CLI and MCP
///
/// Builds a fresh HTTP client for this search and drops it when done.
pub async fn search_data(
    query: &str,
    category: Option<&str>,
    base_url: &str,
) -> Result<SearchOutcome> {
    let transport = ReqwestTransport::new()?;
    fetch(&transport, base_url, query, category).await
}

/// Search with a caller-provided transport.
///
/// An empty query fails before the transport is touched.
pub async fn fetch<T: Transport>(
    transport: &T,
    base_url: &str,
    query: &str,
    category: Option<&str>,
) -> Result<SearchOutcome> {
    match SearchRequest::new(query, category) {
        Ok(request) => fetch_paginated(transport, base_url, &request).await,
        Err(err) => Ok(SearchOutcome::Failed(err)),
    }
}

/// Fetch pages one after another until the reported total or the page cap is
/// reached, then concatenate them.
///
/// HTTP and network failures end the search with [`SearchOutcome::Failed`].
/// A body that is not a search page is an `Err`: the API no longer looks the
/// way this code expects and nothing sensible can be shown.
pub async fn fetch_paginated<T: Transport>(
    transport: &T,
    base_url: &str,
    request: &SearchRequest,
) -> Result<SearchOutcome> {
    let mut pages: Vec<ResultTable> = Vec::new();

    loop {
        let page_number = pages.len() + 1;
        let url = request.page_url(base_url, page_number);
        log::debug!("GET {url}");

        let response = match transport.get(&url).await {
            Ok(response) => response,
            Err(err) => return Ok(SearchOutcome::Failed(err)),
        };

        if !response.is_success() {
            return Ok(SearchOutcome::Failed(SearchError::Http {
                status: response.status,
                message: response.reason,
            }));
        }

        let page: SearchPage = serde_json::from_str(&response.body)
            .with_context(|| f!("Unexpected search response for page {page_number} ({url})"))?;

        log::debug!(
            "page {page_number}: {} records of {} total",
            page.results.len(),
            page.pagination.of
        );

        pages.push(transform_search_page(&page));

        if should_stop(pages.len(), page.pagination.of) {
            break;
        }
    }

    Ok(SearchOutcome::Table(ResultTable::concat(pages)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc::transport::HttpResponse;
    use locsearch_core::search::{MAX_RECORDS, PER_PAGE};
    use serde_json::json;
    use std::sync::Mutex;

    const BASE: &str = "https://loc.test/search/";

    /// Serves a canned result set and records every requested URL
    struct FakeCatalog {
        total: usize,
        failure: Option<(u16, &'static str)>,
        body_override: Option<&'static str>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn with_total(total: usize) -> Self {
            FakeCatalog {
                total,
                failure: None,
                body_override: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16, reason: &'static str) -> Self {
            FakeCatalog {
                failure: Some((status, reason)),
                ..FakeCatalog::with_total(10)
            }
        }

        fn returning(body: &'static str) -> Self {
            FakeCatalog {
                body_override: Some(body),
                ..FakeCatalog::with_total(10)
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        fn page_from_url(url: &str) -> usize {
            url.rsplit("sp=").next().unwrap().parse().unwrap()
        }
    }

    impl Transport for FakeCatalog {
        async fn get(&self, url: &str) -> std::result::Result<HttpResponse, SearchError> {
            self.requests.lock().unwrap().push(url.to_string());

            if let Some((status, reason)) = self.failure {
                return Ok(HttpResponse {
                    status,
                    reason: reason.to_string(),
                    body: String::new(),
                });
            }

            if let Some(body) = self.body_override {
                return Ok(HttpResponse {
                    status: 200,
                    reason: "OK".to_string(),
                    body: body.to_string(),
                });
            }

            let page = Self::page_from_url(url);
            let start = (page - 1) * PER_PAGE;
            let end = (start + PER_PAGE).min(self.total);
            let results: Vec<serde_json::Value> = (start..end)
                .map(|i| json!({"id": f!("item-{i}"), "title": f!("Record {i}")}))
                .collect();

            Ok(HttpResponse {
                status: 200,
                reason: "OK".to_string(),
                body: json!({"results": results, "pagination": {"of": self.total}}).to_string(),
            })
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        async fn get(&self, _url: &str) -> std::result::Result<HttpResponse, SearchError> {
            Err(SearchError::Network("connection refused".to_string()))
        }
    }

    fn table(outcome: SearchOutcome) -> ResultTable {
        match outcome {
            SearchOutcome::Table(table) => table,
            SearchOutcome::Failed(err) => panic!("expected a table, got {err}"),
        }
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_requests() {
        let catalog = FakeCatalog::with_total(10);

        let outcome = fetch(&catalog, BASE, "", Some("bills")).await.unwrap();

        assert_eq!(outcome, SearchOutcome::Failed(SearchError::MissingQuery));
        assert!(catalog.requests().is_empty());
    }

    #[tokio::test]
    async fn test_single_page() {
        let catalog = FakeCatalog::with_total(42);

        let table = table(fetch(&catalog, BASE, "football", None).await.unwrap());

        assert_eq!(table.len(), 42);
        assert_eq!(catalog.requests().len(), 1);
        assert_eq!(table.cell(0, "id"), Some("item-0"));
        assert_eq!(table.cell(41, "Title"), Some("Record 41"));
        assert_eq!(table.cell(0, "Subject"), None);
    }

    #[tokio::test]
    async fn test_page_count_and_row_count() {
        for total in [0, 1, 150, 151, 300, 449, 750, 751, 10_000] {
            let catalog = FakeCatalog::with_total(total);

            let table = table(fetch(&catalog, BASE, "q", None).await.unwrap());

            let expected_pages = total.div_ceil(PER_PAGE).clamp(1, 5);
            assert_eq!(catalog.requests().len(), expected_pages, "total {total}");
            assert_eq!(table.len(), total.min(MAX_RECORDS), "total {total}");
        }
    }

    #[tokio::test]
    async fn test_pages_are_requested_in_order_and_concatenated() {
        let catalog = FakeCatalog::with_total(320);

        let table = table(fetch(&catalog, BASE, "q", None).await.unwrap());

        let pages: Vec<usize> = catalog
            .requests()
            .iter()
            .map(|url| FakeCatalog::page_from_url(url))
            .collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert_eq!(table.cell(149, "id"), Some("item-149"));
        assert_eq!(table.cell(150, "id"), Some("item-150"));
        assert_eq!(table.cell(319, "id"), Some("item-319"));
    }

    #[tokio::test]
    async fn test_no_filter_has_no_facet() {
        let catalog = FakeCatalog::with_total(1);

        fetch(&catalog, BASE, "football", None).await.unwrap();
        fetch(&catalog, BASE, "football", Some("")).await.unwrap();

        assert!(catalog.requests().iter().all(|url| !url.contains("fa=")));
    }

    #[tokio::test]
    async fn test_filter_is_sent_on_every_page() {
        let catalog = FakeCatalog::with_total(200);

        fetch(&catalog, BASE, "tariff", Some("house_bills"))
            .await
            .unwrap();

        let requests = catalog.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|url| url.contains("fa=partof%3Ahouse%20bills")));
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let catalog = FakeCatalog::failing(503, "Service Unavailable");

        let outcome = fetch(&catalog, BASE, "football", None).await.unwrap();

        let SearchOutcome::Failed(err) = outcome else {
            panic!("expected failure");
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("Service Unavailable"));
        assert_eq!(catalog.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_network_error_is_reported() {
        let outcome = fetch(&Unreachable, BASE, "football", None).await.unwrap();

        assert_eq!(
            outcome,
            SearchOutcome::Failed(SearchError::Network("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_fatal() {
        let catalog = FakeCatalog::returning("<html>maintenance</html>");

        let result = fetch(&catalog, BASE, "football", None).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_pagination_is_fatal() {
        let catalog = FakeCatalog::returning(r#"{"results": []}"#);

        let result = fetch(&catalog, BASE, "football", None).await;

        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("page 1"));
    }
}
