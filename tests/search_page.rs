use auction_scout::classify::{extract_quantity, is_excluded};
use auction_scout::pipeline::enrich;
use auction_scout::scrapers::parse_search_page;

const TWO_CARDS: &str = r#"<!DOCTYPE html>
<html><body>
<div class="Products__list">
  <ul class="Products__items">
    <li class="Product">
      <div class="Product__image">
        <img class="Product__imageData" src="https://auc-pctr.c.yimg.jp/i/p1.jpg" alt="">
      </div>
      <div class="Product__detail">
        <h3 class="Product__title">
          <a class="Product__titleLink" href="https://page.auctions.yahoo.co.jp/jp/auction/x1098765432">PS Vita 本体 3台セット ジャンク</a>
        </h3>
        <span class="Product__priceValue">12,800円</span>
        <span class="Product__bid">17</span>
        <span class="Product__time">1日</span>
        <span class="Product__seller" data-seller-id="retro_games">レトロゲーム館</span>
      </div>
    </li>
    <li class="Product">
      <div class="Product__detail">
        <span class="Product__priceValue">3,000円</span>
        <span class="Product__bid">2</span>
      </div>
    </li>
  </ul>
</div>
</body></html>"#;

#[test]
fn card_without_title_is_skipped() {
    let page = parse_search_page(TWO_CARDS);
    assert_eq!(page.listings.len(), 1);
    assert!(page.diagnostics.is_empty());

    let listing = &page.listings[0];
    assert_eq!(listing.id, "x1098765432");
    assert_eq!(listing.title, "PS Vita 本体 3台セット ジャンク");
    assert_eq!(listing.price, 12800);
    assert_eq!(listing.bid_count, 17);
    assert_eq!(listing.end_time_text, "1日");
    assert_eq!(listing.seller_id, "retro_games");
    assert_eq!(listing.seller_name, "レトロゲーム館");
    assert_eq!(listing.url, "https://page.auctions.yahoo.co.jp/jp/auction/x1098765432");
    assert_eq!(listing.image_url, "https://auc-pctr.c.yimg.jp/i/p1.jpg");
    assert_eq!(listing.quantity, 1);
    assert_eq!(listing.status, "");
}

#[test]
fn extraction_keeps_page_order() {
    let html = r#"<div class="Products__list"><ul>
        <li class="Product"><a class="Product__titleLink" href="/jp/auction/a">DualSense ホワイト</a></li>
        <li class="Product"><a class="Product__titleLink" href="/jp/auction/b">DualShock 4 ブラック</a></li>
        <li class="Product"><a class="Product__titleLink" href="/jp/auction/c">Kindle Paperwhite 第11世代</a></li>
    </ul></div>"#;
    let ids: Vec<String> = parse_search_page(html).listings.into_iter().map(|l| l.id).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn extracted_titles_flow_through_enrichment() {
    let page = parse_search_page(TWO_CARDS);
    let title = page.listings[0].title.clone();

    // ジャンク is on the exclusion list, so this lot never reaches export
    assert!(is_excluded(&title));
    assert_eq!(extract_quantity(&title), 3);
    assert!(enrich(page.listings).is_empty());
}
