//! Per-endpoint mappers from raw cell matrices to response payloads.
//!
//! Row-shaped ranges include their header row; columns are located by
//! header name instead of fixed position, so reordering columns in the
//! spreadsheet cannot silently shift fields.
//!
//! Each endpoint has its own documented default for bad cells:
//! - performance summary: empty cell -> "0"
//! - trade history: row missing any required field -> filtered out
//! - pnl series: unparseable pnl cell -> filtered out

pub mod performance;
pub mod pnl;
pub mod trades;

/// Locate a column by header name, case-insensitively.
pub(crate) fn find_column(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
}

/// A trimmed, non-empty cell, or None.
pub(crate) fn cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(|s| s.trim()).filter(|s| !s.is_empty())
}
