use regex::Regex;
use std::sync::LazyLock;

/// Substrings marking accessory, part, manual or otherwise non-device lots.
const EXCLUDED_KEYWORDS: &[&str] = &[
    // accessories and parts
    "バッテリー", "充電器", "電池", "カバー", "フィルム",
    "保護フィルム", "シート", "ケース", "アクセサリー",
    "交換用", "パーツ", "部品", "修理用", "補修品",
    // "only this accessory" phrasing
    "のみ", "だけ", "専用", "付属品", "附属品", "オプション",
    // books and manuals
    "マニュアル", "指南", "解説", "方法", "ガイド", "本",
    "書籍", "出版", "Kindle本", "電子書籍",
    // explicit "X only" phrases
    "箱のみ", "説明書のみ", "充電器のみ", "ケースのみ",
    "カバーのみ", "フィルムのみ", "付属品のみ",
    "保護フィルムとガラス", "充電器、ケースのみ",
    // repair and junk
    "修理", "ジャンク", "故障", "分解", "再生品",
    "中古品", "再生部品", "修理キット",
    // certification and compatibles
    "PSE認証", "適合品", "互換品", "汎用", "互換",
];

/// `【充電器のみ】` and the like.
static RE_BRACKETED_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"【.+のみ】").unwrap());

/// A title that is nothing but a model code.
static RE_BARE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zＡ-Ｚａ-ｚ0-9０-９\-－]+$").unwrap());

/// Part numbers such as `1234-567`.
static RE_PART_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{3}").unwrap());

/// Whether a listing should be dropped as out of scope.
pub fn is_excluded(title: &str) -> bool {
    EXCLUDED_KEYWORDS.iter().any(|kw| title.contains(kw))
        || RE_BRACKETED_ONLY.is_match(title)
        || RE_BARE_CODE.is_match(title)
        || RE_PART_NUMBER.is_match(title)
}
