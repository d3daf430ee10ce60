use super::numerals::normalize_digits;
use regex::Regex;
use std::sync::LazyLock;

/// Model numbers such as `PCH-2000ZA23` or `S2011-002-S`. Their digits are
/// never quantities, so they are cut out before counting.
static RE_PRODUCT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9-]*\d{2,}[A-Za-z0-9-]*").unwrap());

/// A digit run followed by a counter word. The run is matched whole so that
/// a number never starts in the middle of a longer one; runs longer than two
/// digits are rejected afterwards.
static RE_COUNTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:個セット|点セット|個|台|点|本|枚|セット|口|pcs|units|unit|set)").unwrap()
});

/// Lot markers that imply more than one item without saying how many.
const BULK_KEYWORDS: &[&str] = &["まとめ", "大量", "ダブルパック", "パック", "セット", "set", "units"];

/// Count assumed for a bulk lot whose size is not stated.
const UNSTATED_BULK_QUANTITY: u32 = 2;

/// Infer how many items a listing title offers.
///
/// The smallest explicitly counted number wins; a bare bulk marker gives 2;
/// anything else is a single item.
pub fn extract_quantity(title: &str) -> u32 {
    let stripped = RE_PRODUCT_CODE.replace_all(title, "");
    let text = normalize_digits(&stripped);

    let counted = RE_COUNTED
        .captures_iter(&text)
        .filter_map(|caps| {
            let digits = caps.get(1)?.as_str();
            if digits.chars().count() > 2 {
                return None;
            }
            digits.parse::<u32>().ok()
        })
        .min();

    match counted {
        Some(n) => n,
        None if BULK_KEYWORDS.iter().any(|kw| text.contains(kw)) => UNSTATED_BULK_QUANTITY,
        None => 1,
    }
}
