//! Pure Naver shop-search open API client.
//!
//! A minimal client for the `/v1/search/shop.json` endpoint. Supports single
//! page fetches and an offset cursor that walks the full result window with
//! inter-page pacing.
//!
//! # Example
//!
//! ```rust,ignore
//! use naver_client::NaverShopClient;
//!
//! let client = NaverShopClient::new(client_id, client_secret);
//! let mut cursor = client.search("프리스타일 리브레2");
//! while let Some(items) = cursor.next_page().await? {
//!     for item in &items {
//!         println!("{} {}", item.total_price(), item.title);
//!     }
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{NaverError, Result};
pub use types::{ShopItem, ShopSearchResponse};

use std::time::Duration;

const BASE_URL: &str = "https://openapi.naver.com/v1/search/shop.json";

/// Upstream maximum items per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Upstream maximum result-window offset.
pub const MAX_START: u32 = 1000;

/// Client for the Naver shop-search open API, keyed by a credential pair.
#[derive(Clone)]
pub struct NaverShopClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    page_size: u32,
    max_start: u32,
    page_delay: Duration,
}

impl NaverShopClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            page_size: MAX_PAGE_SIZE,
            max_start: MAX_START,
            page_delay: Duration::from_millis(200),
        }
    }

    /// Override the per-page item count (clamped to the upstream maximum).
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Override the offset ceiling (clamped to the upstream limit).
    pub fn with_max_start(mut self, max_start: u32) -> Self {
        self.max_start = max_start.clamp(1, MAX_START);
        self
    }

    /// Override the pause applied between successive page fetches.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn max_start(&self) -> u32 {
        self.max_start
    }

    /// Fetch a single relevance-sorted result page.
    pub async fn search_page(
        &self,
        query: &str,
        start: u32,
        display: u32,
    ) -> Result<ShopSearchResponse> {
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("query", query.to_string()),
                ("display", display.to_string()),
                ("start", start.to_string()),
                ("sort", "sim".to_string()),
            ])
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NaverError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Start an offset cursor over the full result window for `query`.
    pub fn search(&self, query: impl Into<String>) -> SearchCursor {
        SearchCursor {
            client: self.clone(),
            query: query.into(),
            start: 1,
            fetched_any: false,
            done: false,
        }
    }
}

/// Offset cursor over a shop search.
///
/// Yields `Ok(Some(items))` per page and `Ok(None)` once the result window is
/// exhausted (empty page or offset ceiling). Pacing between pages happens
/// here, so callers can simply drain the cursor. An error terminates the
/// cursor; there is no retry.
pub struct SearchCursor {
    client: NaverShopClient,
    query: String,
    start: u32,
    fetched_any: bool,
    done: bool,
}

impl SearchCursor {
    pub async fn next_page(&mut self) -> Result<Option<Vec<ShopItem>>> {
        if self.done {
            return Ok(None);
        }
        if self.start > self.client.max_start {
            tracing::debug!(query = %self.query, start = self.start, "offset ceiling reached");
            self.done = true;
            return Ok(None);
        }

        if self.fetched_any {
            tokio::time::sleep(self.client.page_delay).await;
        }

        let page = match self
            .client
            .search_page(&self.query, self.start, self.client.page_size)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        self.fetched_any = true;
        if page.items.is_empty() {
            self.done = true;
            return Ok(None);
        }

        tracing::debug!(
            query = %self.query,
            start = self.start,
            fetched = page.items.len(),
            total = page.total,
            "page fetched"
        );

        self.start += self.client.page_size;
        Ok(Some(page.items))
    }
}
