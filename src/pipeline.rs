//! Turning extracted listings into export rows: exclusion, enrichment,
//! urgency ordering, translation and the per-file processing loop.

use crate::classify::{classify_status, extract_quantity, is_ending_soon, is_excluded};
use crate::export::raw::read_listings;
use crate::export::sheet::{sheet_name, to_export_row, Spreadsheet};
use crate::models::{ExportRow, Listing};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Rows sent to the spreadsheet per call
pub const BATCH_SIZE: usize = 100;

/// Title translation collaborator
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String>;
}

/// Leaves titles in their original language
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Translator for Passthrough {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Drop out-of-scope listings and fill in quantity and status from the title.
/// Order is preserved.
pub fn enrich(listings: Vec<Listing>) -> Vec<Listing> {
    let total = listings.len();
    let kept: Vec<Listing> = listings
        .into_iter()
        .filter(|listing| {
            let excluded = is_excluded(&listing.title);
            if excluded {
                debug!("Excluded {}: {}", listing.id, listing.title);
            }
            !excluded
        })
        .map(|mut listing| {
            listing.quantity = extract_quantity(&listing.title);
            listing.status = classify_status(&listing.title).to_string();
            listing
        })
        .collect();

    info!("Kept {} of {} listings after exclusion", kept.len(), total);
    kept
}

/// Move listings ending within about a day to the front, keeping the
/// relative order inside each group.
pub fn prioritize(listings: &mut [Listing]) {
    listings.sort_by_key(|listing| !is_ending_soon(&listing.end_time_text));
}

/// Build export rows; a failed translation keeps the original title
pub fn build_rows(listings: &[Listing], translator: &dyn Translator, yen_per_eur: f64, added_at: &str) -> Vec<ExportRow> {
    listings
        .iter()
        .map(|listing| {
            let title = translator.translate(&listing.title).unwrap_or_else(|e| {
                warn!("Translation failed for {}: {:#}", listing.id, e);
                listing.title.clone()
            });
            to_export_row(listing, title, yen_per_eur, added_at)
        })
        .collect()
}

/// Settings for one `process` run
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub results_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub yen_per_eur: f64,
    /// Value of the "added" column for every row
    pub added_at: String,
}

/// Outcome of processing a results directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub files: usize,
    pub rows: usize,
    pub failed: Vec<PathBuf>,
}

/// Export every raw CSV in the results directory into `sheet`, one sheet
/// per file, archiving each file once written. A failing file is logged and
/// left in place.
pub fn process_results(
    options: &ProcessOptions,
    translator: &dyn Translator,
    sheet: &mut dyn Spreadsheet,
) -> Result<ProcessSummary> {
    let mut summary = ProcessSummary::default();

    for path in result_files(&options.results_dir)? {
        info!("Processing file: {}", path.display());
        match process_file(&path, options, translator, sheet) {
            Ok(rows) => {
                info!("File {} processed, {} rows added", path.display(), rows);
                summary.files += 1;
                summary.rows += rows;
                if let Err(e) = archive_file(&path, &options.archive_dir) {
                    warn!("Could not archive {}: {:#}", path.display(), e);
                }
            }
            Err(e) => {
                warn!("Failed to process {}: {:#}", path.display(), e);
                summary.failed.push(path);
            }
        }
    }

    Ok(summary)
}

fn process_file(
    path: &Path,
    options: &ProcessOptions,
    translator: &dyn Translator,
    sheet: &mut dyn Spreadsheet,
) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut listings = enrich(read_listings(file)?);
    prioritize(&mut listings);

    let rows = build_rows(&listings, translator, options.yen_per_eur, &options.added_at);
    let name = sheet_name(&path.file_name().unwrap_or_default().to_string_lossy());

    if rows.is_empty() {
        sheet.append_rows(&name, &[])?;
    }
    for chunk in rows.chunks(BATCH_SIZE) {
        sheet.append_rows(&name, chunk)?;
        debug!("Added {} rows...", chunk.len());
    }
    Ok(rows.len())
}

/// `*.csv` files directly inside `dir`, sorted by name
fn result_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        anyhow::bail!("Results directory {} not found", dir.display());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();
    Ok(files)
}

/// Move a processed file into the archive directory
pub fn archive_file(path: &Path, archive_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(archive_dir).with_context(|| format!("Failed to create {}", archive_dir.display()))?;
    let file_name = path.file_name().context("Archived path has no file name")?;
    let target = archive_dir.join(file_name);
    fs::rename(path, &target).with_context(|| format!("Failed to move {} to archive", path.display()))?;
    info!("File moved to archive: {}", archive_dir.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, title: &str, end: &str) -> Listing {
        let mut l = Listing::new(id, title);
        l.end_time_text = end.to_string();
        l
    }

    #[test]
    fn enrich_drops_excluded_and_labels_the_rest() {
        let out = enrich(vec![
            listing("1", "Switch 有機EL まとめ売り", "3日"),
            listing("2", "PS Vita 説明書のみ", "1日"),
            listing("3", "DualSense 新品 2個", "5時間"),
        ]);
        let ids: Vec<&str> = out.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!((out[0].quantity, out[0].status.as_str()), (2, "Bulk lot"));
        assert_eq!((out[1].quantity, out[1].status.as_str()), (2, "New"));
    }

    #[test]
    fn prioritize_is_stable() {
        let mut listings = vec![
            listing("a", "x", "3日"),
            listing("b", "x", "12時間"),
            listing("c", "x", ""),
            listing("d", "x", "59分"),
        ];
        prioritize(&mut listings);
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "a", "c"]);
    }

    struct Failing;

    impl Translator for Failing {
        fn translate(&self, _: &str) -> Result<String> {
            anyhow::bail!("service unavailable")
        }
    }

    #[test]
    fn failed_translation_keeps_title() {
        let rows = build_rows(&[listing("1", "DualSense", "")], &Failing, 165.0, "2026-01-01 00:00");
        assert_eq!(rows[0].title, "DualSense");
    }
}
