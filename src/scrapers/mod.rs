pub mod parser;
pub mod rotation;
pub mod traits;
pub mod types;
pub mod yahoo;

pub use parser::{parse_detail_page, parse_search_page, Diagnostic, PageExtraction};
pub use rotation::Rotator;
pub use traits::ScraperTrait;
pub use types::SearchParams;
pub use yahoo::YahooScraper;
