//! Field extraction for Yahoo! Auctions markup.
//!
//! The selectors below follow the site's class names; a markup change on
//! the site breaks extraction here rather than anywhere downstream.

use crate::classify::normalize_digits;
use crate::error::{FieldError, FieldResult};
use crate::models::Listing;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.Products__list li.Product").unwrap());
static CARD_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.Product__titleLink").unwrap());
static CARD_PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.Product__priceValue").unwrap());
static CARD_BID: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.Product__bid").unwrap());
static CARD_TIME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.Product__time").unwrap());
static CARD_SELLER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.Product__seller").unwrap());
static CARD_IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img.Product__imageData").unwrap());
static CARD_SHIPPING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.Product__shipping").unwrap());

static DETAIL_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1.ProductTitle__text").unwrap());
static DETAIL_PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.ProductInformation__price").unwrap());
static DETAIL_BID: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.ProductInformation__bid").unwrap());
static DETAIL_TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.ProductInformation__time").unwrap());
static DETAIL_SELLER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.Seller__name").unwrap());
static DETAIL_IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img.ProductImage__main").unwrap());
static DETAIL_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ProductDescription__text").unwrap());
static DETAIL_CATEGORY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ProductCategory__name").unwrap());

static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Seller id attributes, in the order they are tried
const SELLER_ID_ATTRS: &[&str] = &["data-seller-id", "data-userid"];

/// The CSS hooks one page layout exposes its fields through
struct Layout {
    price: &'static LazyLock<Selector>,
    bid: &'static LazyLock<Selector>,
    /// How this layout writes its bid count
    parse_bids: fn(&str) -> FieldResult<u32>,
    time: &'static LazyLock<Selector>,
    seller: &'static LazyLock<Selector>,
    image: &'static LazyLock<Selector>,
    shipping: Option<&'static LazyLock<Selector>>,
    description: Option<&'static LazyLock<Selector>>,
    category: Option<&'static LazyLock<Selector>>,
}

static SEARCH_CARD_LAYOUT: Layout = Layout {
    price: &CARD_PRICE,
    bid: &CARD_BID,
    parse_bids: parse_bid_count,
    time: &CARD_TIME,
    seller: &CARD_SELLER,
    image: &CARD_IMAGE,
    shipping: Some(&CARD_SHIPPING),
    description: None,
    category: None,
};

static DETAIL_LAYOUT: Layout = Layout {
    price: &DETAIL_PRICE,
    bid: &DETAIL_BID,
    parse_bids: parse_first_number,
    time: &DETAIL_TIME,
    seller: &DETAIL_SELLER,
    image: &DETAIL_IMAGE,
    shipping: None,
    description: Some(&DETAIL_DESCRIPTION),
    category: Some(&DETAIL_CATEGORY),
};

/// A field of a listing that was present but unreadable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub listing_id: String,
    pub error: FieldError,
}

/// Listings from one page, plus whatever fields had to fall back to defaults
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    pub listings: Vec<Listing>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PageExtraction {
    /// Append another page's listings and diagnostics
    pub fn extend(&mut self, other: PageExtraction) {
        self.listings.extend(other.listings);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Extract every listing card from a search results page.
///
/// Cards without a title link, or whose link carries no item id, are
/// skipped silently. Order follows the page.
pub fn parse_search_page(html: &str) -> PageExtraction {
    let document = Html::parse_document(html);
    let mut extraction = PageExtraction::default();

    let cards: Vec<_> = document.select(&CARD).collect();
    debug!("Found {} listing cards in HTML", cards.len());

    for (idx, card) in cards.iter().enumerate() {
        let Some(link) = card.select(&CARD_TITLE).next() else {
            debug!("Skipped card {}: no title link", idx);
            continue;
        };
        let href = link.value().attr("href").unwrap_or("").trim();
        let id = last_path_segment(href);
        if id.is_empty() {
            debug!("Skipped card {}: no item id in {:?}", idx, href);
            continue;
        }

        let mut listing = Listing::new(id, element_text(&link));
        listing.url = href.to_string();
        fill_fields(&mut listing, card, &SEARCH_CARD_LAYOUT, &mut extraction.diagnostics);

        extraction.listings.push(listing);
    }

    extraction
}

/// Extract a listing from an item detail page fetched from `page_url`.
///
/// Returns `None` when the page has no title or the URL carries no item id.
pub fn parse_detail_page(html: &str, page_url: &str) -> Option<(Listing, Vec<Diagnostic>)> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = root.select(&DETAIL_TITLE).next().map(|el| element_text(&el))?;
    let id = last_path_segment(page_url);
    if id.is_empty() {
        debug!("No item id in detail page URL {}", page_url);
        return None;
    }

    let mut listing = Listing::new(id, title);
    listing.url = page_url.to_string();
    let mut diagnostics = Vec::new();
    fill_fields(&mut listing, &root, &DETAIL_LAYOUT, &mut diagnostics);

    Some((listing, diagnostics))
}

fn fill_fields(listing: &mut Listing, scope: &ElementRef, layout: &Layout, diagnostics: &mut Vec<Diagnostic>) {
    let price = select_text(scope, layout.price, "price").and_then(|raw| parse_yen(&raw));
    listing.price = or_default(price, &listing.id, diagnostics);

    let bids = select_text(scope, layout.bid, "bid_count").and_then(|raw| (layout.parse_bids)(&raw));
    listing.bid_count = or_default(bids, &listing.id, diagnostics);

    listing.end_time_text = select_text(scope, layout.time, "end_time").unwrap_or_default();

    if let Some(seller) = scope.select(layout.seller).next() {
        listing.seller_name = element_text(&seller);
        listing.seller_id = SELLER_ID_ATTRS
            .iter()
            .find_map(|attr| seller.value().attr(attr))
            .unwrap_or("")
            .to_string();
    }

    listing.image_url = scope
        .select(layout.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or("")
        .to_string();

    let optional_text = |selector: Option<&'static LazyLock<Selector>>, field: &'static str| {
        selector
            .map(|sel| select_text(scope, sel, field).unwrap_or_default())
            .unwrap_or_default()
    };
    listing.shipping = optional_text(layout.shipping, "shipping");
    listing.description = optional_text(layout.description, "description");
    listing.category = optional_text(layout.category, "category");
}

/// Resolve a field result to its value, recording unreadable fields.
fn or_default<T: Default>(result: FieldResult<T>, listing_id: &str, diagnostics: &mut Vec<Diagnostic>) -> T {
    match result {
        Ok(value) => value,
        Err(error) if error.is_missing() => T::default(),
        Err(error) => {
            warn!("Listing {}: {}", listing_id, error);
            diagnostics.push(Diagnostic {
                listing_id: listing_id.to_string(),
                error,
            });
            T::default()
        }
    }
}

fn select_text(scope: &ElementRef, selector: &Selector, field: &'static str) -> FieldResult<String> {
    scope
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .ok_or(FieldError::Missing { field })
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// `"1,280円"` -> 1280
pub fn parse_yen(raw: &str) -> FieldResult<i64> {
    let cleaned = raw.replace(['円', ','], "");
    cleaned.trim().parse().map_err(|_| FieldError::Unparsable {
        field: "price",
        raw: raw.to_string(),
    })
}

/// `"12入札"` or `"12"` -> 12
pub fn parse_bid_count(raw: &str) -> FieldResult<u32> {
    raw.replace("入札", "").trim().parse().map_err(|_| FieldError::Unparsable {
        field: "bid_count",
        raw: raw.to_string(),
    })
}

/// First digit run in the text: `"12件"` or `"入札 12"` -> 12
pub fn parse_first_number(raw: &str) -> FieldResult<u32> {
    let text = normalize_digits(raw);
    RE_DIGITS
        .find(&text)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| FieldError::Unparsable {
            field: "bid_count",
            raw: raw.to_string(),
        })
}

/// Item id from a listing URL: the last path segment, ignoring query,
/// fragment and trailing slashes.
pub fn last_path_segment(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("").to_string()
}
