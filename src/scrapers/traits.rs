use crate::scrapers::parser::PageExtraction;
use crate::scrapers::types::SearchParams;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for listing sources.
/// The page loop in `runner` only talks to this, so it can be driven by a
/// canned source in tests.
#[async_trait]
pub trait ScraperTrait: Send + Sync {
    /// Fetch and extract one search result page, with any fields that
    /// could not be read
    async fn search(&self, params: &SearchParams) -> Result<PageExtraction>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
