use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One auction listing as extracted from a search or detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    /// Current price in yen
    pub price: i64,
    pub bid_count: u32,
    /// Remaining/end time exactly as the site renders it ("3日", "12時間", ...)
    pub end_time_text: String,
    pub seller_id: String,
    pub seller_name: String,
    pub url: String,
    pub image_url: String,
    /// Shipping note shown on search cards ("送料無料", ...)
    pub shipping: String,
    /// Item description, detail pages only
    pub description: String,
    /// Category breadcrumb, detail pages only
    pub category: String,
    pub quantity: u32,
    pub status: String,
    /// Proxy the page was fetched through, empty for direct fetches
    pub proxy: String,
    pub scraped_at: DateTime<Utc>,
}

impl Listing {
    /// Create a listing with every optional field at its default
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: 0,
            bid_count: 0,
            end_time_text: String::new(),
            seller_id: String::new(),
            seller_name: String::new(),
            url: String::new(),
            image_url: String::new(),
            shipping: String::new(),
            description: String::new(),
            category: String::new(),
            quantity: 1,
            status: String::new(),
            proxy: String::new(),
            scraped_at: Utc::now(),
        }
    }
}

/// A row of the spreadsheet export, columns in their fixed order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportRow {
    pub title: String,
    /// Price converted to the export currency, rounded to cents
    pub price: f64,
    pub quantity: u32,
    pub url: String,
    pub end_time: String,
    pub added_at: String,
    pub status: String,
    pub price_jpy: i64,
}

impl ExportRow {
    /// Column headers in the order the values are written
    pub const HEADERS: [&'static str; 8] = [
        "Title",
        "Price (EUR)",
        "Quantity",
        "URL",
        "End time",
        "Added",
        "Status",
        "Price (JPY)",
    ];
}
