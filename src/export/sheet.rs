use crate::models::{ExportRow, Listing};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static RE_AUCTION_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/auction/([a-zA-Z0-9]+)").unwrap());
static RE_DATED_CSV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(_\d{8}_\d{4})?\.csv$").unwrap());

const PARTNER_AUCTION_URL: &str = "https://zenmarket.jp/ru/auction.aspx?itemCode=";
const MAX_SHEET_NAME_CHARS: usize = 100;

/// Destination for export rows, one named sheet per source file
pub trait Spreadsheet {
    /// Append rows to `sheet`, creating it (with its header row) on first use
    fn append_rows(&mut self, sheet: &str, rows: &[ExportRow]) -> Result<()>;
}

/// A workbook kept as a directory with one CSV file per sheet
#[derive(Debug)]
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Create `root/yahoo_<YYYYmmdd_HHMM>/`
    pub fn create(root: &Path, now: DateTime<Local>) -> Result<Self> {
        let dir = root.join(format!("yahoo_{}", now.format("%Y%m%d_%H%M")));
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create workbook {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet))
    }
}

impl Spreadsheet for CsvWorkbook {
    fn append_rows(&mut self, sheet: &str, rows: &[ExportRow]) -> Result<()> {
        let path = self.sheet_path(sheet);
        let is_new = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open sheet {}", path.display()))?;

        write_rows(file, rows, is_new)?;
        debug!("Appended {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

/// Write export rows, optionally preceded by the header row
pub fn write_rows<W: Write>(writer: W, rows: &[ExportRow], with_header: bool) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    if with_header {
        wtr.write_record(ExportRow::HEADERS).context("Failed to write header row")?;
    }
    for row in rows {
        wtr.serialize(row).context("Failed to write export row")?;
    }
    wtr.flush().context("Failed to flush sheet")?;
    Ok(())
}

/// Rewrite an auction URL to the partner site's page for the same item.
/// URLs without an auction code are returned unchanged.
pub fn partner_url(url: &str) -> String {
    match RE_AUCTION_CODE.captures(url) {
        Some(caps) => format!("{}{}", PARTNER_AUCTION_URL, &caps[1]),
        None => url.to_string(),
    }
}

/// Sheet name for a raw results file: the date suffix and extension dropped
pub fn sheet_name(file_name: &str) -> String {
    RE_DATED_CSV
        .replace(file_name, "")
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect()
}

/// Build the export row for an enriched listing
pub fn to_export_row(listing: &Listing, title: String, yen_per_eur: f64, added_at: &str) -> ExportRow {
    ExportRow {
        title,
        price: round_cents(listing.price as f64 / yen_per_eur),
        quantity: listing.quantity,
        url: partner_url(&listing.url),
        end_time: listing.end_time_text.clone(),
        added_at: added_at.to_string(),
        status: listing.status.clone(),
        price_jpy: listing.price,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
