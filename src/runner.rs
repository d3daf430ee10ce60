use crate::models::Listing;
use crate::scrapers::{PageExtraction, ScraperTrait, SearchParams};
use std::time::Duration;
use tracing::{info, warn};

/// Pause between consecutive page requests
pub const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Walk the result pages of one search until a page comes back empty, a
/// fetch fails, or `max_pages` pages have been read.
///
/// A failed page ends the walk but keeps what was already collected,
/// diagnostics included.
pub async fn collect_pages(
    scraper: &dyn ScraperTrait,
    search: &SearchParams,
    max_pages: Option<u32>,
    delay: Duration,
) -> PageExtraction {
    let mut all = PageExtraction::default();
    let mut page = search.page.max(1);

    loop {
        if max_pages.is_some_and(|max| page > max) {
            break;
        }

        info!("Fetching page {} from {}...", page, scraper.source_name());
        let extraction = match scraper.search(&search.with_page(page)).await {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!("Error fetching page {}: {:#}", page, e);
                break;
            }
        };

        if extraction.listings.is_empty() {
            info!("No listings on page {}", page);
            break;
        }

        info!("Found {} listings", extraction.listings.len());
        all.extend(extraction);
        page += 1;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    all
}

/// Price and bid statistics for one search, plus how many fields could not
/// be read along the way
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub count: usize,
    pub average_price: f64,
    pub min_price: i64,
    pub max_price: i64,
    pub total_bids: u64,
    pub unreadable_fields: usize,
}

impl RunSummary {
    /// `None` when no listings were extracted
    pub fn of(extraction: &PageExtraction) -> Option<Self> {
        let listings: &[Listing] = &extraction.listings;
        let min_price = listings.iter().map(|l| l.price).min()?;
        let max_price = listings.iter().map(|l| l.price).max()?;
        let total: i128 = listings.iter().map(|l| i128::from(l.price)).sum();

        Some(Self {
            count: listings.len(),
            average_price: total as f64 / listings.len() as f64,
            min_price,
            max_price,
            total_bids: listings.iter().map(|l| u64::from(l.bid_count)).sum(),
            unreadable_fields: extraction.diagnostics.len(),
        })
    }

    pub fn log(&self) {
        info!("Total listings found: {}", self.count);
        info!("Average price: {:.0}円", self.average_price);
        info!("Minimum price: {}円", self.min_price);
        info!("Maximum price: {}円", self.max_price);
        info!("Total bids: {}", self.total_bids);
        if self.unreadable_fields > 0 {
            warn!("{} field(s) could not be read and were left at defaults", self.unreadable_fields);
        }
    }
}
