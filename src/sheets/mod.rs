//! Read-only access to a range-addressed spreadsheet.

pub mod client;
pub mod range;
pub mod service_account;

use async_trait::async_trait;

use crate::error::Result;
use range::RangeQuery;

/// Read access to the tabular source. Handlers depend on this trait so
/// tests can substitute a fake.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the raw cell matrix for one range. An absent range yields an
    /// empty matrix, not an error.
    async fn values_get(&self, range: &RangeQuery) -> Result<Vec<Vec<String>>>;
}
