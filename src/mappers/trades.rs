//! Trade history: header-addressed rows into trade records, newest first.

use serde::Serialize;

use crate::config::ColumnsConfig;
use crate::error::{ApiError, Result};

/// One executed trade. `pnl` stays the source string; parsing it is the
/// pnl-series endpoint's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub date: String,
    pub name: String,
    pub trade_type: String,
    pub pnl: String,
}

/// Map a matrix whose first row is the header. Rows missing any required
/// field are dropped. Output is reversed so the most recent trade comes
/// first. An empty matrix maps to an empty list, not an error.
pub fn map_trades(rows: &[Vec<String>], cols: &ColumnsConfig) -> Result<Vec<TradeRecord>> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let date_idx = required_column(header, &cols.date)?;
    let symbol_idx = required_column(header, &cols.symbol)?;
    let direction_idx = required_column(header, &cols.direction)?;
    let pnl_idx = required_column(header, &cols.pnl)?;

    let mut records: Vec<TradeRecord> = data
        .iter()
        .filter_map(|row| {
            Some(TradeRecord {
                date: super::cell(row, date_idx)?.to_string(),
                name: super::cell(row, symbol_idx)?.to_string(),
                trade_type: super::cell(row, direction_idx)?.to_string(),
                pnl: super::cell(row, pnl_idx)?.to_string(),
            })
        })
        .collect();

    records.reverse();
    Ok(records)
}

pub(super) fn required_column(header: &[String], name: &str) -> Result<usize> {
    super::find_column(header, name)
        .ok_or_else(|| ApiError::Upstream(format!("missing column '{name}' in header row")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn cols() -> ColumnsConfig {
        ColumnsConfig::default()
    }

    #[test]
    fn rows_map_and_reverse() {
        let rows = matrix(&[
            &["Date", "Symbol", "Direction", "PnL"],
            &["2024-01-01", "BTC", "long", "150.5"],
            &["2024-01-02", "ETH", "short", "-20"],
        ]);

        let records = map_trades(&rows, &cols()).unwrap();
        assert_eq!(
            records,
            vec![
                TradeRecord {
                    date: "2024-01-02".into(),
                    name: "ETH".into(),
                    trade_type: "short".into(),
                    pnl: "-20".into(),
                },
                TradeRecord {
                    date: "2024-01-01".into(),
                    name: "BTC".into(),
                    trade_type: "long".into(),
                    pnl: "150.5".into(),
                },
            ]
        );
    }

    #[test]
    fn incomplete_rows_are_filtered() {
        let rows = matrix(&[
            &["Date", "Symbol", "Direction", "PnL"],
            &["2024-01-01", "BTC", "long", "150.5"],
            &["2024-01-02", "", "short", "-20"],
            &["2024-01-03", "SOL", "long"],
        ]);

        let records = map_trades(&rows, &cols()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "BTC");
    }

    #[test]
    fn header_lookup_survives_column_reorder() {
        let rows = matrix(&[
            &["PnL", "Date", "Symbol", "Direction"],
            &["150.5", "2024-01-01", "BTC", "long"],
        ]);

        let records = map_trades(&rows, &cols()).unwrap();
        assert_eq!(records[0].pnl, "150.5");
        assert_eq!(records[0].name, "BTC");
    }

    #[test]
    fn missing_header_column_is_an_error() {
        let rows = matrix(&[&["Date", "Symbol", "PnL"], &["2024-01-01", "BTC", "1"]]);
        assert!(map_trades(&rows, &cols()).is_err());
    }

    #[test]
    fn empty_matrix_maps_to_empty_list() {
        assert!(map_trades(&[], &cols()).unwrap().is_empty());
    }

    #[test]
    fn header_only_maps_to_empty_list() {
        let rows = matrix(&[&["Date", "Symbol", "Direction", "PnL"]]);
        assert!(map_trades(&rows, &cols()).unwrap().is_empty());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let rows = matrix(&[
            &["Date", "Symbol", "Direction", "PnL"],
            &["2024-01-02", "ETH", "short", "-20"],
        ]);
        let records = map_trades(&rows, &cols()).unwrap();
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({
                "date": "2024-01-02",
                "name": "ETH",
                "tradeType": "short",
                "pnl": "-20",
            })
        );
    }
}
