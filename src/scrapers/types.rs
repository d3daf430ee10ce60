use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const BASE_URL: &str = "https://auctions.yahoo.co.jp";
pub const SEARCH_URL: &str = "https://auctions.yahoo.co.jp/search/search";

/// Listings the site returns per search page
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Field a search result page is ordered by
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Time until the auction ends
    #[default]
    End,
    /// Current bid price
    CurrentPrice,
    /// Buy-it-now price
    BuyNowPrice,
    /// Time the listing was added
    Listed,
    /// Number of bids
    Bids,
}

impl SortField {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortField::End => "end",
            SortField::CurrentPrice => "cbids",
            SortField::BuyNowPrice => "bidorbuy",
            SortField::Listed => "acc",
            SortField::Bids => "bids",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "a",
            SortOrder::Descending => "d",
        }
    }
}

/// Search parameters for one results page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Search query, sent as-is (Japanese or model numbers)
    pub query: String,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    pub sort: SortField,
    pub order: SortOrder,
    /// Minimum price (JPY)
    pub min_price: Option<i64>,
    /// Maximum price (JPY)
    pub max_price: Option<i64>,
    /// Site condition filter code
    pub condition: Option<String>,
    /// Site shipping filter code
    pub shipping: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: SortField::End,
            order: SortOrder::Ascending,
            min_price: None,
            max_price: None,
            condition: None,
            shipping: None,
        }
    }
}

impl SearchParams {
    /// First page for `query`, soonest-ending listings first
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// The same search moved to another page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Index of the first listing on this page, as the site counts them
    pub fn first_index(&self) -> u32 {
        self.page.max(1).saturating_sub(1) * self.per_page + 1
    }

    pub fn to_url(&self) -> Result<Url> {
        let mut params: Vec<(&str, String)> = vec![
            ("p", self.query.clone()),
            ("b", self.first_index().to_string()),
            ("n", self.per_page.to_string()),
            ("s1", self.sort.as_param().to_string()),
            ("o1", self.order.as_param().to_string()),
        ];
        if let Some(min) = self.min_price {
            params.push(("va", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("ve", max.to_string()));
        }
        if let Some(condition) = &self.condition {
            params.push(("cond", condition.clone()));
        }
        if let Some(shipping) = &self.shipping {
            params.push(("ship", shipping.clone()));
        }

        Url::parse_with_params(SEARCH_URL, &params).context("Failed to build search URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_defaults() {
        let url = SearchParams::new("DualSense").to_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://auctions.yahoo.co.jp/search/search?p=DualSense&b=1&n=50&s1=end&o1=a"
        );
    }

    #[test]
    fn later_pages_offset_by_page_size() {
        let params = SearchParams::new("kindle").with_page(3);
        assert_eq!(params.first_index(), 101);
    }

    #[test]
    fn filters_and_sorting() {
        let params = SearchParams {
            sort: SortField::Bids,
            order: SortOrder::Descending,
            min_price: Some(1000),
            max_price: Some(5000),
            ..SearchParams::new("Switch")
        };
        let url = params.to_url().unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("s1".into(), "bids".into())));
        assert!(pairs.contains(&("o1".into(), "d".into())));
        assert!(pairs.contains(&("va".into(), "1000".into())));
        assert!(pairs.contains(&("ve".into(), "5000".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "cond"));
    }

    #[test]
    fn japanese_query_is_encoded() {
        let url = SearchParams::new("PS Vita本体").to_url().unwrap();
        let p = url.query_pairs().find(|(k, _)| k == "p").unwrap().1;
        assert_eq!(p, "PS Vita本体");
    }
}
