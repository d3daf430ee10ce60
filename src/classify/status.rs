/// Condition markers in priority order. The first substring found in a
/// title decides its label, so longer phrases must precede any shorter
/// entry they contain.
const STATUS_RULES: &[(&str, &str)] = &[
    // new
    ("新品", "New"),
    ("未使用", "Unused"),
    ("未開封", "Sealed"),
    // used
    ("中古", "Used"),
    ("使用済", "Used"),
    ("美品", "Used (Excellent condition)"),
    // not working / for parts
    ("ジャンク", "Junk/For parts"),
    ("訳あり", "Defective/Junk"),
    ("故障", "Broken"),
    ("破損", "Damaged"),
    ("動作未確認", "Untested"),
    ("動作しない", "Not working"),
    ("不良品", "Defective"),
    ("要修理", "Needs repair"),
    ("部品取り", "For parts"),
    ("外装のみ", "Case only"),
    ("本体のみ", "Device only (no accessories)"),
    ("電源入らず", "Won't power on"),
    // packaging
    ("箱無し", "No original box"),
    ("箱破損", "Damaged box"),
    ("付属品なし", "No accessories"),
    // bulk
    ("まとめ売り", "Bulk lot"),
    ("大量", "Wholesale"),
    ("業者向け", "For resellers"),
    ("卸売", "Wholesale"),
];

/// Map a title to a normalized condition label, or `""` when no marker is
/// present.
pub fn classify_status(title: &str) -> &'static str {
    STATUS_RULES
        .iter()
        .find(|(marker, _)| title.contains(marker))
        .map(|(_, label)| *label)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rule_in_table_order_wins() {
        // contains both 新品 and 未開封; 新品 is listed first
        assert_eq!(classify_status("新品未開封"), "New");
        assert_eq!(classify_status("未開封 未使用品"), "Unused");
        assert_eq!(classify_status("PS Vita 本体 3台セット ジャンク"), "Junk/For parts");
    }

    #[test]
    fn labels_each_category() {
        assert_eq!(classify_status("DualShock 4 美品"), "Used (Excellent condition)");
        assert_eq!(classify_status("3DS 電源入らず"), "Won't power on");
        assert_eq!(classify_status("Kindle 箱無し"), "No original box");
        assert_eq!(classify_status("Switch まとめ売り"), "Bulk lot");
        assert_eq!(classify_status("コントローラー 業者向け"), "For resellers");
    }

    #[test]
    fn no_marker_is_empty() {
        assert_eq!(classify_status("normal title with no markers"), "");
        assert_eq!(classify_status(""), "");
    }

    #[test]
    fn is_deterministic() {
        let title = "中古 動作未確認 箱破損";
        assert_eq!(classify_status(title), classify_status(title));
        assert_eq!(classify_status(title), "Used");
    }
}
