//! TFE HTTP client for API interactions

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{api, defaults, Config};
use crate::error::{Result, TfeError};
use crate::hcp::helpers::Query;
use crate::hcp::jsonapi;
use crate::hcp::retry::{RetryPolicy, RATE_LIMIT_RESET_HEADER};
use crate::hcp::traits::{ApiListResponse, ApiResponse, ListPage, PaginatedResponse};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("tfe-rs/", env!("CARGO_PKG_VERSION"));

/// TFE API client
///
/// Cloning is cheap: clones share the connection pool and configuration.
#[derive(Clone)]
pub struct TfeClient {
    http: Client,
    config: Arc<Config>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for TfeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfeClient")
            .field("config", &self.config)
            .finish()
    }
}

impl TfeClient {
    /// Create a new TFE client with optimized connection settings
    pub fn new(config: Config) -> Result<Self> {
        reqwest::Url::parse(&config.address).map_err(|e| {
            TfeError::Config(format!("invalid address '{}': {}", config.address, e))
        })?;
        if config.token.is_empty() {
            return Err(TfeError::Config("API token is required".to_string()));
        }

        let http = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            // TCP keepalive to maintain connections
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::limited(defaults::MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()?;

        let retry = RetryPolicy::from_config(&config);
        Ok(Self {
            http,
            config: Arc::new(config),
            retry,
        })
    }

    /// Create a client from `TFE_ADDRESS`/`TFE_TOKEN` and the Terraform
    /// credentials file
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// Full URL for an API path such as `/workspaces/ws-123`
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let mut builder = builder
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", api::CONTENT_TYPE)
            .header("Accept", api::CONTENT_TYPE);
        for (name, value) in &self.config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    /// Create a request builder for an API path with standard headers
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        self.with_headers(self.http.request(method, url))
    }

    /// Create a request builder for a pre-signed URL (no API headers)
    pub(crate) fn raw_request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    /// Send a request, retrying according to the configured policy
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let mut attempt = 0u32;
        loop {
            // Streaming bodies cannot be replayed
            let Some(current) = builder.try_clone() else {
                return Ok(builder.send().await?);
            };

            let result = current.send().await;
            let (retryable, status, reset) = match &result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    (
                        self.retry.should_retry_status(status),
                        Some(status),
                        rate_limit_reset(response),
                    )
                }
                Err(e) => (self.retry.should_retry_error(e), None, None),
            };

            if !retryable || attempt >= self.retry.retry_max {
                return result.map_err(TfeError::from);
            }

            attempt += 1;
            let wait = self.retry.backoff(attempt, status, reset);
            match status {
                Some(status) => warn!(
                    "Request returned {}, retrying in {:?} (attempt {}/{})",
                    status, wait, attempt, self.retry.retry_max
                ),
                None => warn!(
                    "Request failed, retrying in {:?} (attempt {}/{})",
                    wait, attempt, self.retry.retry_max
                ),
            }
            self.retry.notify(attempt, status);
            tokio::time::sleep(wait).await;
        }
    }

    /// Send a request and map non-success statuses to errors
    pub(crate) async fn execute(&self, builder: RequestBuilder, label: &str) -> Result<Response> {
        let response = self.send(builder).await?;
        check_response(response, label).await
    }

    /// Parse a JSON response body
    pub(crate) async fn parse_api_response<T>(&self, response: Response, label: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| TfeError::Json(format!("Failed to parse {}: {}", label, e)))
    }

    /// Fetch a single resource by API path
    pub(crate) async fn fetch_resource<T>(&self, path: &str, label: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(self.request(Method::GET, path), label).await?;
        let wrapper: ApiResponse<T> = self.parse_api_response(response, label).await?;
        Ok(wrapper.data)
    }

    /// Fetch one page of a list endpoint
    pub(crate) async fn fetch_page<T>(
        &self,
        path: &str,
        query: &Query,
        label: &str,
    ) -> Result<ListPage<T>>
    where
        T: DeserializeOwned,
    {
        let path = query.append_to(path);
        let response = self.execute(self.request(Method::GET, &path), label).await?;
        let list: ApiListResponse<T> = self.parse_api_response(response, label).await?;
        debug!("Fetched {} {}", list.data.len(), label);
        Ok(list.into())
    }

    /// Send a JSON:API document and parse the returned resource
    pub(crate) async fn send_document<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        label: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .request(method, path)
            .body(serde_json::to_vec(body)?);
        let response = self.execute(builder, label).await?;
        let wrapper: ApiResponse<T> = self.parse_api_response(response, label).await?;
        Ok(wrapper.data)
    }

    /// POST a document to a collection and return the created resource
    pub(crate) async fn create_resource<B, T>(&self, path: &str, body: &B, label: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_document(Method::POST, path, body, label).await
    }

    /// PATCH a resource and return its new representation
    pub(crate) async fn update_resource<B, T>(&self, path: &str, body: &B, label: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_document(Method::PATCH, path, body, label).await
    }

    /// DELETE a resource
    pub(crate) async fn delete_resource(&self, path: &str, label: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, path), label)
            .await?;
        Ok(())
    }

    /// Send a request with an optional JSON body, ignoring any response body
    pub(crate) async fn send_without_result<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        label: &str,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        self.execute(builder, label).await?;
        Ok(())
    }

    /// Download bytes from an API path
    pub(crate) async fn fetch_bytes(&self, path: &str, label: &str) -> Result<Vec<u8>> {
        let response = self.execute(self.request(Method::GET, path), label).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Download bytes from a pre-signed URL
    pub(crate) async fn fetch_raw_bytes(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        let response = self
            .execute(self.raw_request(Method::GET, url), label)
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Download bytes from an absolute URL on the API host, with credentials
    pub(crate) async fn fetch_url_bytes(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let builder = self.with_headers(self.http.request(Method::GET, url));
        let response = self.execute(builder, label).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch all pages from a paginated API endpoint with parallel fetching
    ///
    /// Page 1 is fetched first to learn `total-pages`, then the remaining
    /// pages are fetched in parallel (with concurrency limit) and returned in
    /// page order. Endpoints that omit `total-pages` are walked sequentially
    /// through `next-page`.
    ///
    /// # Arguments
    /// * `path` - API path, optionally with a query string
    /// * `label` - Context for error messages (e.g., "workspaces for organization 'my-org'")
    pub async fn fetch_all_pages<T, R>(&self, path: &str, label: &str) -> Result<Vec<T>>
    where
        T: Send,
        R: DeserializeOwned + PaginatedResponse<T> + Send,
    {
        let first: R = self.fetch_page_number(path, 1, label).await?;
        let pagination = first.meta().and_then(|m| m.pagination.clone());
        let mut all_items = first.into_data();

        let pagination = match pagination {
            Some(p) => p,
            None => return Ok(all_items), // No pagination info = single page
        };

        let total_pages = match pagination.total_pages {
            Some(total) => total,
            None => {
                let mut next = pagination.next_page;
                while let Some(page_num) = next {
                    let resp: R = self.fetch_page_number(path, page_num, label).await?;
                    next = resp
                        .meta()
                        .and_then(|m| m.pagination.as_ref())
                        .and_then(|p| p.next_page);
                    all_items.extend(resp.into_data());
                }
                return Ok(all_items);
            }
        };

        debug!(
            "Page 1/{}, total items: {}",
            total_pages,
            pagination.total_count.unwrap_or_default()
        );

        if total_pages <= 1 {
            return Ok(all_items);
        }

        debug!(
            "Fetching {} remaining pages in parallel (max {} concurrent)",
            total_pages - 1,
            api::MAX_CONCURRENT_PAGE_REQUESTS
        );

        let page_futures = (2..=total_pages).map(|page_num| async move {
            let resp: R = self.fetch_page_number(path, page_num, label).await?;
            Ok::<_, TfeError>((page_num, resp.into_data()))
        });

        let results: Vec<Result<(u32, Vec<T>)>> = stream::iter(page_futures)
            .buffer_unordered(api::MAX_CONCURRENT_PAGE_REQUESTS)
            .collect()
            .await;

        let mut page_results = results.into_iter().collect::<Result<Vec<_>>>()?;
        page_results.sort_by_key(|(page_num, _)| *page_num);

        for (_, items) in page_results {
            all_items.extend(items);
        }

        debug!("Fetched {} total items for {}", all_items.len(), label);
        Ok(all_items)
    }

    /// Fetch a single numbered page (helper for `fetch_all_pages`)
    async fn fetch_page_number<R>(&self, path: &str, page_num: u32, label: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let mut query = Query::new();
        query
            .push("page[number]", page_num)
            .push("page[size]", api::DEFAULT_PAGE_SIZE);
        let path = query.append_to(path);
        let page_label = format!("{} (page {})", label, page_num);
        let response = self
            .execute(self.request(Method::GET, &path), &page_label)
            .await?;
        self.parse_api_response(response, &page_label).await
    }
}

/// Map a response to an error unless it is a 2xx
pub(crate) async fn check_response(response: Response, label: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status.as_u16() {
        401 => Err(TfeError::Unauthorized),
        404 => Err(TfeError::NotFound(label.to_string())),
        code => {
            let body = response.text().await.unwrap_or_default();
            Err(TfeError::Api {
                status: code,
                message: format!("{}: {}", label, jsonapi::error_message(&body, status)),
            })
        }
    }
}

fn rate_limit_reset(response: &Response) -> Option<f64> {
    response
        .headers()
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_rate_limit_reset)
}

fn parse_rate_limit_reset(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
impl TfeClient {
    /// Configuration pointing at a mock server, with fast retries
    pub(crate) fn test_config(base_url: &str) -> Config {
        let mut config = Config::new(base_url, "test-token");
        config.base_path = "/".to_string();
        config.retry_max = 3;
        config.retry_wait_min = Duration::from_millis(1);
        config.retry_wait_max = Duration::from_millis(5);
        config
    }

    /// Build a client from a test configuration
    pub(crate) fn from_test_config(config: Config) -> Self {
        let mut client = Self::new(config).expect("test client");
        client.retry.server_wait_min = Duration::from_millis(1);
        client.retry.server_wait_max = Duration::from_millis(2);
        client
    }

    /// Create a test client with mock base URL
    pub fn test_client(base_url: &str) -> Self {
        Self::from_test_config(Self::test_config(base_url))
    }
}


#[cfg(test)]
mod pagination_tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_item_json(id: &str) -> serde_json::Value {
        serde_json::json!({ "id": id })
    }

    fn page_json(items: &[&str], current: u32, total_pages: u32) -> serde_json::Value {
        serde_json::json!({
            "data": items.iter().map(|i| test_item_json(i)).collect::<Vec<_>>(),
            "meta": {
                "pagination": {
                    "current-page": current,
                    "total-pages": total_pages,
                    "total-count": total_pages * 2
                }
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_all_pages_single_page() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["item-1", "item-2"], 1, 1)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<serde_json::Value, ApiListResponse<serde_json::Value>>(
                "/test-items",
                "test items",
            )
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_multiple_pages_parallel() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        for (page, ids) in [(1, ["item-1", "item-2"]), (2, ["item-3", "item-4"]), (3, ["item-5", "item-6"])] {
            Mock::given(method("GET"))
                .and(path("/test-items"))
                .and(query_param("page[number]", page.to_string()))
                .and(query_param("page[size]", api::DEFAULT_PAGE_SIZE.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&ids, page, 3)))
                .mount(&mock_server)
                .await;
        }

        let items = client
            .fetch_all_pages::<serde_json::Value, ApiListResponse<serde_json::Value>>(
                "/test-items",
                "test items",
            )
            .await
            .unwrap();

        // Page order is preserved
        let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["item-1", "item-2", "item-3", "item-4", "item-5", "item-6"]);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_follows_next_page_without_totals() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/runs"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [test_item_json("run-1")],
                "meta": {"pagination": {"current-page": 1, "next-page": 2}}
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/runs"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [test_item_json("run-2")],
                "meta": {"pagination": {"current-page": 2, "prev-page": 1, "next-page": null}}
            })))
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<serde_json::Value, ApiListResponse<serde_json::Value>>("/runs", "runs")
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["id"], "run-2");
    }

    #[tokio::test]
    async fn test_fetch_all_pages_no_pagination_meta() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [test_item_json("item-1")]
            })))
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<serde_json::Value, ApiListResponse<serde_json::Value>>(
                "/test-items",
                "test items",
            )
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_api_error_on_subsequent_page() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["item-1"], 1, 2)))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client
            .fetch_all_pages::<serde_json::Value, ApiListResponse<serde_json::Value>>(
                "/test-items",
                "test items",
            )
            .await;

        match result {
            Err(TfeError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("page 2"));
            }
            other => panic!("Expected TfeError::Api, got {:?}", other.map(|v| v.len())),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_pages_with_existing_query_params() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .and(query_param("search[name]", "test"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["item-1"], 1, 1)))
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<serde_json::Value, ApiListResponse<serde_json::Value>>(
                "/test-items?search[name]=test",
                "test items",
            )
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_empty_result() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/test-items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[], 1, 0)))
            .mount(&mock_server)
            .await;

        let items = client
            .fetch_all_pages::<serde_json::Value, ApiListResponse<serde_json::Value>>(
                "/test-items",
                "test items",
            )
            .await
            .unwrap();
        assert!(items.is_empty());
    }
}
