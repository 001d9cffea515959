//! A1-notation range addressing.

/// A (sheet, cell range) pair identifying a rectangular region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub sheet: String,
    pub cells: String,
}

impl RangeQuery {
    pub fn new(sheet: impl Into<String>, cells: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            cells: cells.into(),
        }
    }

    /// Render as an A1 range. The sheet name is always single-quoted with
    /// embedded quotes doubled, so arbitrary names survive the URL path.
    pub fn to_a1(&self) -> String {
        format!("'{}'!{}", self.sheet.replace('\'', "''"), self.cells)
    }
}

impl std::fmt::Display for RangeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_a1())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sheet_name_is_quoted() {
        assert_eq!(RangeQuery::new("Trades", "A1:D").to_a1(), "'Trades'!A1:D");
    }

    #[test]
    fn sheet_name_with_spaces_and_quotes() {
        assert_eq!(
            RangeQuery::new("Bob's PnL", "A1:B").to_a1(),
            "'Bob''s PnL'!A1:B"
        );
    }
}
