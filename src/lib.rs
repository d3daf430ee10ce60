//! Yahoo! Auctions listing scout: search page extraction, title
//! classification and tabular export.

pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod runner;
pub mod scrapers;
