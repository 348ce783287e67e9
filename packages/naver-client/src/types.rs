//! Wire types for the Naver shop-search open API.

use serde::Deserialize;

/// One page of shop-search results.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopSearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub display: u32,
    #[serde(default)]
    pub items: Vec<ShopItem>,
}

/// A single search result item.
///
/// `title` may carry `<b>` emphasis around matched keywords and `lprice` is a
/// stringly-typed integer. Both quirks are passed through untouched; this
/// crate reports what the API said.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub lprice: String,
    #[serde(default, rename = "mallName")]
    pub mall_name: String,
    #[serde(default)]
    pub category1: String,
    #[serde(default)]
    pub category2: String,
    #[serde(default)]
    pub category3: String,
    #[serde(default)]
    pub category4: String,
}

impl ShopItem {
    /// Listed price for the whole bundle. Absent or unparseable prices
    /// coerce to 0.
    pub fn total_price(&self) -> u64 {
        self.lprice.trim().parse().unwrap_or(0)
    }

    /// Non-empty category labels, outermost first.
    pub fn category_path(&self) -> Vec<String> {
        [
            &self.category1,
            &self.category2,
            &self.category3,
            &self.category4,
        ]
        .into_iter()
        .filter(|c| !c.is_empty())
        .cloned()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_search_response() {
        let body = r#"{
            "lastBuildDate": "Mon, 03 Aug 2026 12:00:00 +0900",
            "total": 1234,
            "start": 1,
            "display": 2,
            "items": [
                {
                    "title": "<b>프리스타일 리브레2</b> 센서 2개",
                    "link": "https://smartstore.naver.com/item/1",
                    "image": "https://shopping-phinf.pstatic.net/1.jpg",
                    "lprice": "180000",
                    "hprice": "",
                    "mallName": "글루코샵",
                    "productId": "1",
                    "productType": "2",
                    "brand": "애보트",
                    "maker": "",
                    "category1": "생활/건강",
                    "category2": "건강관리용품",
                    "category3": "혈당계",
                    "category4": ""
                },
                {
                    "title": "센서 커버",
                    "link": "https://smartstore.naver.com/item/2",
                    "image": "",
                    "lprice": "",
                    "mallName": "",
                    "category1": "생활/건강"
                }
            ]
        }"#;

        let page: ShopSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.total, 1234);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.total_price(), 180_000);
        assert_eq!(
            first.category_path(),
            vec!["생활/건강", "건강관리용품", "혈당계"]
        );
        assert_eq!(first.mall_name, "글루코샵");

        // Unknown fields are ignored, missing fields default.
        let second = &page.items[1];
        assert_eq!(second.total_price(), 0);
        assert_eq!(second.category_path(), vec!["생활/건강"]);
    }

    #[test]
    fn garbage_price_coerces_to_zero() {
        let item = ShopItem {
            lprice: "문의".to_string(),
            ..empty_item()
        };
        assert_eq!(item.total_price(), 0);

        let item = ShopItem {
            lprice: " 95000 ".to_string(),
            ..empty_item()
        };
        assert_eq!(item.total_price(), 95_000);
    }

    fn empty_item() -> ShopItem {
        serde_json::from_str("{}").unwrap()
    }
}
