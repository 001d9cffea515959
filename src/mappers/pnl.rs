//! P&L time series: header-addressed rows into (date, pnl) points.

use serde::Serialize;

use crate::config::ColumnsConfig;
use crate::error::Result;

use super::trades::required_column;

/// One point of the P&L series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlPoint {
    pub date: String,
    pub pnl: f64,
}

/// Map a matrix whose first row is the header. Rows whose pnl cell does
/// not parse as a number are dropped, as are rows missing a date. Output
/// is reversed, most recent first. An empty matrix maps to an empty list.
pub fn map_pnl(rows: &[Vec<String>], cols: &ColumnsConfig) -> Result<Vec<PnlPoint>> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let date_idx = required_column(header, &cols.date)?;
    let pnl_idx = required_column(header, &cols.pnl)?;

    let mut points: Vec<PnlPoint> = data
        .iter()
        .filter_map(|row| {
            let date = super::cell(row, date_idx)?.to_string();
            let pnl = super::cell(row, pnl_idx)?.parse::<f64>().ok()?;
            Some(PnlPoint { date, pnl })
        })
        .collect();

    points.reverse();
    Ok(points)
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
    fn parses_filters_and_reverses() {
        let rows = matrix(&[
            &["Date", "PnL"],
            &["2024-01-01", "150.5"],
            &["2024-01-02", "n/a"],
            &["2024-01-03", "-20"],
            &["", "7"],
        ]);

        let points = map_pnl(&rows, &cols()).unwrap();
        assert_eq!(
            points,
            vec![
                PnlPoint {
                    date: "2024-01-03".into(),
                    pnl: -20.0,
                },
                PnlPoint {
                    date: "2024-01-01".into(),
                    pnl: 150.5,
                },
            ]
        );
    }

    #[test]
    fn empty_matrix_maps_to_empty_list() {
        assert!(map_pnl(&[], &cols()).unwrap().is_empty());
    }

    #[test]
    fn missing_pnl_header_is_an_error() {
        let rows = matrix(&[&["Date", "Amount"], &["2024-01-01", "1"]]);
        assert!(map_pnl(&rows, &cols()).is_err());
    }
}
