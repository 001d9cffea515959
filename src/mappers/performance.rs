//! Performance summary: two single-row ranges into four labeled entries.

use serde::Serialize;

/// One labeled P&L figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub title: String,
    pub value: String,
    pub change: String,
}

const TITLES: [&str; 4] = ["Weekly P&L", "Last Week P&L", "Monthly P&L", "Yearly P&L"];

/// Assemble the four summary entries. `current` supplies the values and
/// `previous` the period-over-period changes, one row each, one cell per
/// entry. Empty or missing cells default to "0".
pub fn map_performance(current: &[Vec<String>], previous: &[Vec<String>]) -> Vec<SummaryEntry> {
    let values = current.first().map(Vec::as_slice).unwrap_or(&[]);
    let changes = previous.first().map(Vec::as_slice).unwrap_or(&[]);

    TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| SummaryEntry {
            title: (*title).to_string(),
            value: cell_or_zero(values, i),
            change: cell_or_zero(changes, i),
        })
        .collect()
}

fn cell_or_zero(row: &[String], idx: usize) -> String {
    match super::cell(row, idx) {
        Some(s) => s.to_string(),
        None => "0".to_string(),
    }
}
