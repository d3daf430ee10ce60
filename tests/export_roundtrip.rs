use auction_scout::export::{read_listings, write_listings, CsvWorkbook};
use auction_scout::models::Listing;
use auction_scout::pipeline::{process_results, Passthrough, ProcessOptions};
use chrono::{Local, TimeZone};
use std::fs;

fn sample_listings() -> Vec<Listing> {
    let mut first = Listing::new("x100", "Nintendo Switch 有機ELモデル, ホワイト \"美品\"");
    first.price = 28_500;
    first.bid_count = 12;
    first.end_time_text = "3日".into();
    first.seller_id = "s_1".into();
    first.seller_name = "ゲーム館".into();
    first.url = "https://page.auctions.yahoo.co.jp/jp/auction/x100".into();
    first.image_url = "https://auc-pctr.c.yimg.jp/i/x100.jpg".into();
    first.shipping = "送料無料".into();
    first.description = "動作確認済み, 箱あり\n付属品: ケーブル".into();
    first.category = "テレビゲーム > Nintendo Switch".into();
    first.quantity = 1;
    first.status = "Used (Excellent condition)".into();
    first.proxy = "45.80.1.2:50100".into();

    let mut second = Listing::new("y200", "DualSense 2個");
    second.price = 9_000;
    second.end_time_text = "12時間".into();
    second.url = "https://page.auctions.yahoo.co.jp/jp/auction/y200".into();
    second.quantity = 2;

    vec![first, second]
}

#[test]
fn csv_round_trip_preserves_fields() {
    let listings = sample_listings();
    let mut buf = Vec::new();
    write_listings(&mut buf, &listings).unwrap();

    let read = read_listings(buf.as_slice()).unwrap();
    assert_eq!(read.len(), listings.len());
    for (original, restored) in listings.iter().zip(&read) {
        let mut restored = restored.clone();
        restored.scraped_at = original.scraped_at;
        assert_eq!(&restored, original);
    }
}

#[test]
fn process_exports_and_archives() {
    let scratch = tempfile::tempdir().unwrap();
    let results = scratch.path().join("results");
    let archive = scratch.path().join("archive");
    fs::create_dir_all(&results).unwrap();

    let mut listings = sample_listings();
    listings.push(Listing::new("z300", "PS Vita 説明書のみ"));
    let file = fs::File::create(results.join("Switch_20260307_0905.csv")).unwrap();
    write_listings(file, &listings).unwrap();

    let now = Local.with_ymd_and_hms(2026, 3, 8, 10, 0, 0).unwrap();
    let mut workbook = CsvWorkbook::create(&scratch.path().join("sheets"), now).unwrap();
    let options = ProcessOptions {
        results_dir: results.clone(),
        archive_dir: archive.clone(),
        yen_per_eur: 150.0,
        added_at: "2026-03-08 00:00".into(),
    };

    let summary = process_results(&options, &Passthrough, &mut workbook).unwrap();
    assert_eq!(summary.files, 1);
    assert_eq!(summary.rows, 2);
    assert!(summary.failed.is_empty());

    assert!(workbook.dir().ends_with("yahoo_20260308_1000"));
    let sheet = fs::read_to_string(workbook.sheet_path("Switch")).unwrap();
    let lines: Vec<&str> = sheet.lines().collect();
    assert_eq!(lines.len(), 3);
    // ending within a day comes first
    assert!(lines[1].starts_with("DualSense 2個,60.0,2,https://zenmarket.jp/ru/auction.aspx?itemCode=y200,12時間,2026-03-08 00:00,,9000"));
    assert!(lines[2].contains(",190.0,1,"));

    assert!(!results.join("Switch_20260307_0905.csv").exists());
    assert!(archive.join("Switch_20260307_0905.csv").exists());
}

#[test]
fn missing_results_dir_is_an_error() {
    let scratch = tempfile::tempdir().unwrap();
    let mut workbook = CsvWorkbook::create(scratch.path(), Local::now()).unwrap();
    let options = ProcessOptions {
        results_dir: scratch.path().join("nope"),
        archive_dir: scratch.path().join("archive"),
        yen_per_eur: 165.0,
        added_at: String::new(),
    };
    assert!(process_results(&options, &Passthrough, &mut workbook).is_err());
}
