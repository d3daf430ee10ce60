use super::numerals::normalize_digits;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_DAYS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)日").unwrap());
static RE_HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)時間").unwrap());

const MAX_DAYS: u64 = 1;
const MAX_HOURS: u64 = 24;

/// Whether a remaining-time string such as `"1日"`, `"12時間"` or `"59分"`
/// means the auction ends within about a day.
///
/// Units are checked from largest to smallest and the first one present
/// decides. A unit marker without a readable count is treated as not urgent.
pub fn is_ending_soon(end_time_text: &str) -> bool {
    if end_time_text.is_empty() {
        return false;
    }
    let text = normalize_digits(end_time_text);

    if text.contains('日') {
        return match leading_count(&RE_DAYS, &text) {
            Some(days) => days <= MAX_DAYS,
            None => {
                debug!("Unreadable day count in end time {:?}", end_time_text);
                false
            }
        };
    }
    if text.contains("時間") {
        return match leading_count(&RE_HOURS, &text) {
            Some(hours) => hours <= MAX_HOURS,
            None => {
                debug!("Unreadable hour count in end time {:?}", end_time_text);
                false
            }
        };
    }
    // any number of minutes left counts as soon
    text.contains('分')
}

fn leading_count(re: &Regex, text: &str) -> Option<u64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days() {
        assert!(is_ending_soon("1日"));
        assert!(is_ending_soon("0日"));
        assert!(!is_ending_soon("3日"));
    }

    #[test]
    fn hours() {
        assert!(is_ending_soon("12時間"));
        assert!(is_ending_soon("24時間"));
        assert!(!is_ending_soon("25時間"));
    }

    #[test]
    fn minutes_are_always_soon() {
        assert!(is_ending_soon("59分"));
        assert!(is_ending_soon("1分"));
    }

    #[test]
    fn day_unit_takes_precedence() {
        assert!(!is_ending_soon("2日 3時間"));
        assert!(is_ending_soon("1日 23時間"));
    }

    #[test]
    fn full_width_counts() {
        assert!(is_ending_soon("１日"));
        assert!(!is_ending_soon("３日"));
    }

    #[test]
    fn unrecognized_or_malformed() {
        assert!(!is_ending_soon(""));
        assert!(!is_ending_soon("終了"));
        assert!(!is_ending_soon("日曜日"));
        assert!(!is_ending_soon("99999999999999999999999日"));
    }
}
