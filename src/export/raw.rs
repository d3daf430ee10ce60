use crate::models::Listing;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w]").unwrap());

const QUERY_STEM_CHARS: usize = 20;

/// Write listings as CSV with a header row
pub fn write_listings<W: Write>(writer: W, listings: &[Listing]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for listing in listings {
        wtr.serialize(listing).context("Failed to write listing row")?;
    }
    wtr.flush().context("Failed to flush CSV")?;
    Ok(())
}

/// Read listings back. Rows that do not deserialize are logged and skipped.
pub fn read_listings<R: Read>(reader: R) -> Result<Vec<Listing>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut listings = Vec::new();
    for (line, row) in rdr.deserialize::<Listing>().enumerate() {
        match row {
            Ok(listing) => listings.push(listing),
            Err(e) => warn!("Skipping row {}: {}", line + 1, e),
        }
    }
    Ok(listings)
}

/// `<query with non-word chars as _, 20 chars>_<YYYYmmdd_HHMM>.csv`
pub fn results_file_name(query: &str, now: DateTime<Local>) -> String {
    let stem: String = RE_NON_WORD
        .replace_all(query, "_")
        .chars()
        .take(QUERY_STEM_CHARS)
        .collect();
    format!("{}_{}.csv", stem, now.format("%Y%m%d_%H%M"))
}

/// Save one keyword's listings under `dir`, returning the file path
pub fn save_listings(dir: &Path, query: &str, listings: &[Listing]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(results_file_name(query, Local::now()));
    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_listings(file, listings)?;
    info!("💾 Saved {} listings to {}", listings.len(), path.display());
    Ok(path)
}
