//! Tabular output: raw listing CSVs from the scrape stage and the
//! spreadsheet-shaped export built from them.

pub mod raw;
pub mod sheet;

pub use raw::{read_listings, results_file_name, save_listings, write_listings};
pub use sheet::{partner_url, sheet_name, to_export_row, CsvWorkbook, Spreadsheet};
