//! Thin read-only client for the Sheets values-get API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, Result};

use super::range::RangeQuery;
use super::service_account::ServiceAccountSigner;
use super::SheetSource;

/// Leave this much slack before a cached access token's expiry.
const TOKEN_EXPIRY_SLACK_SECS: i64 = 30;

/// Explicit outbound timeout; the upstream ranges are tiny.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

struct CachedToken {
    value: String,
    expires_at: i64,
}

/// Reads cell ranges from one spreadsheet, minting and caching the
/// service-account access token as needed. Created once at startup and
/// shared read-only across requests.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    signer: ServiceAccountSigner,
    token: Mutex<Option<CachedToken>>,
}

impl SheetsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let signer = ServiceAccountSigner::from_config(&config.google)?;
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            http,
            base_url: config.google.sheets_base_url.clone(),
            spreadsheet_id: config.sheets.spreadsheet_id.clone(),
            signer,
            token: Mutex::new(None),
        })
    }

    /// Return a cached access token, minting a new one when missing or
    /// within the expiry slack.
    async fn bearer_token(&self) -> Result<String> {
        let now = Utc::now().timestamp();

        if let Some(cached) = self.token.lock().as_ref() {
            if cached.expires_at - TOKEN_EXPIRY_SLACK_SECS > now {
                return Ok(cached.value.clone());
            }
        }

        let fetched = self.signer.fetch_access_token(&self.http).await?;
        debug!(expires_in = fetched.expires_in, "minted sheets access token");

        let value = fetched.access_token.clone();
        *self.token.lock() = Some(CachedToken {
            value: fetched.access_token,
            expires_at: now + fetched.expires_in as i64,
        });
        Ok(value)
    }

    fn values_url(&self, range: &RangeQuery) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("bad sheets base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config("sheets base url cannot be a base".into()))?
            .extend(&[
                "v4",
                "spreadsheets",
                &self.spreadsheet_id,
                "values",
                &range.to_a1(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl SheetSource for SheetsClient {
    async fn values_get(&self, range: &RangeQuery) -> Result<Vec<Vec<String>>> {
        let token = self.bearer_token().await?;
        let url = self.values_url(range)?;

        let response = self.http.get(url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "sheets api returned {} for {}",
                response.status(),
                range
            )));
        }

        let body: ValueRange = response.json().await?;
        debug!(range = %range, rows = body.values.len(), "sheets range read");

        // Cells arrive as JSON values; numbers are rendered back to their
        // string form so the mappers see one cell type.
        Ok(body
            .values
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect())
    }
}
