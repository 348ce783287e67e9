//! Naver-backed implementation of the classifier's listing source.

use async_trait::async_trait;
use classifier::{ListingSource, RawListing};
use naver_client::{NaverError, SearchCursor};

/// Adapts a paging [`SearchCursor`] into the pipeline's listing supply.
pub struct NaverListingSource {
    cursor: SearchCursor,
}

impl NaverListingSource {
    pub fn new(cursor: SearchCursor) -> Self {
        Self { cursor }
    }
}

#[async_trait]
impl ListingSource for NaverListingSource {
    type Error = NaverError;

    async fn next_page(&mut self) -> Result<Option<Vec<RawListing>>, Self::Error> {
        let Some(items) = self.cursor.next_page().await? else {
            return Ok(None);
        };

        let listings = items
            .into_iter()
            .map(|item| RawListing {
                total_price: item.total_price(),
                category_path: item.category_path(),
                title: item.title,
                mall_name: item.mall_name,
                link: item.link,
                image_url: item.image,
            })
            .collect();

        Ok(Some(listings))
    }
}
