//! Title heuristics: numeral normalization, quantity, condition status,
//! exclusion and end-time urgency.
//!
//! Everything here is a pure function of its input string. None of these
//! functions can fail; unusual input falls back to the documented default.

pub mod exclusion;
pub mod numerals;
pub mod quantity;
pub mod status;
pub mod urgency;

pub use exclusion::is_excluded;
pub use numerals::normalize_digits;
pub use quantity::extract_quantity;
pub use status::classify_status;
pub use urgency::is_ending_soon;
