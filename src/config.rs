//! Configuration — TOML file defaults + environment variable overrides.
//!
//! Range addresses and header names live in `config/default.toml`.
//! Secrets (service-account key, JWT secret, login hash) come from
//! environment variables.

use serde::Deserialize;
use std::env;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means same-origin only.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Email of the single configured account.
    #[serde(default)]
    pub login_email: String,
    /// Argon2 PHC hash of the account password.
    #[serde(default)]
    pub password_hash: String,
    /// HMAC-SHA256 signing secret for issued tokens.
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

fn default_token_ttl() -> i64 {
    86_400
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_email: String::new(),
            password_hash: String::new(),
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub client_email: String,
    /// PEM-encoded service-account private key. When set through an env
    /// var the newlines arrive escaped and are unescaped in `load()`.
    #[serde(default)]
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".into()
}
fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".into()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            client_email: String::new(),
            private_key: String::new(),
            token_uri: default_token_uri(),
            sheets_base_url: default_sheets_base_url(),
        }
    }
}

/// Where each endpoint reads from. Sheet names and cell ranges are split so
/// the pnl endpoint can substitute a caller-selected sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default = "default_summary_sheet")]
    pub summary_sheet: String,
    #[serde(default = "default_summary_current")]
    pub summary_current_cells: String,
    #[serde(default = "default_summary_previous")]
    pub summary_previous_cells: String,
    #[serde(default = "default_trades_sheet")]
    pub trades_sheet: String,
    #[serde(default = "default_trades_cells")]
    pub trades_cells: String,
    #[serde(default = "default_pnl_sheet")]
    pub pnl_default_sheet: String,
    #[serde(default = "default_pnl_allowed")]
    pub pnl_allowed_sheets: Vec<String>,
    #[serde(default = "default_pnl_cells")]
    pub pnl_cells: String,
    #[serde(default = "default_test_cell")]
    pub test_cells: String,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

fn default_summary_sheet() -> String {
    "Dashboard".into()
}
fn default_summary_current() -> String {
    "B2:E2".into()
}
fn default_summary_previous() -> String {
    "B3:E3".into()
}
fn default_trades_sheet() -> String {
    "Trades".into()
}
fn default_trades_cells() -> String {
    "A1:D".into()
}
fn default_pnl_sheet() -> String {
    "PnL".into()
}
fn default_pnl_allowed() -> Vec<String> {
    vec!["PnL".into()]
}
fn default_pnl_cells() -> String {
    "A1:B".into()
}
fn default_test_cell() -> String {
    "A1".into()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            summary_sheet: default_summary_sheet(),
            summary_current_cells: default_summary_current(),
            summary_previous_cells: default_summary_previous(),
            trades_sheet: default_trades_sheet(),
            trades_cells: default_trades_cells(),
            pnl_default_sheet: default_pnl_sheet(),
            pnl_allowed_sheets: default_pnl_allowed(),
            pnl_cells: default_pnl_cells(),
            test_cells: default_test_cell(),
            columns: ColumnsConfig::default(),
        }
    }
}

/// Header names used for named-column lookup in row-shaped ranges. Columns
/// are found by header, not position, so a spreadsheet reorder cannot
/// silently corrupt the output.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_col_date")]
    pub date: String,
    #[serde(default = "default_col_symbol")]
    pub symbol: String,
    #[serde(default = "default_col_direction")]
    pub direction: String,
    #[serde(default = "default_col_pnl")]
    pub pnl: String,
}

fn default_col_date() -> String {
    "Date".into()
}
fn default_col_symbol() -> String {
    "Symbol".into()
}
fn default_col_direction() -> String {
    "Direction".into()
}
fn default_col_pnl() -> String {
    "PnL".into()
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            date: default_col_date(),
            symbol: default_col_symbol(),
            direction: default_col_direction(),
            pnl: default_col_pnl(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json_output: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_output: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticsConfig {
    /// Include underlying error text in `details`. Never enable in
    /// production.
    #[serde(default)]
    pub expose_details: bool,
}

impl Config {
    /// Load configuration from `config/default.toml` merged with env vars.
    /// Secrets come from env vars prefixed with `SB__` or the well-known
    /// names below.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("SB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Config = builder.try_deserialize()?;

        // Override secrets from env (these should never be in TOML)
        if let Ok(v) = env::var("SPREADSHEET_ID") {
            cfg.sheets.spreadsheet_id = v;
        }
        if let Ok(v) = env::var("GOOGLE_PROJECT_ID") {
            cfg.google.project_id = v;
        }
        if let Ok(v) = env::var("GOOGLE_CLIENT_EMAIL") {
            cfg.google.client_email = v;
        }
        if let Ok(v) = env::var("GOOGLE_PRIVATE_KEY") {
            cfg.google.private_key = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            cfg.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("LOGIN_EMAIL") {
            cfg.auth.login_email = v;
        }
        if let Ok(v) = env::var("LOGIN_PASSWORD_HASH") {
            cfg.auth.password_hash = v;
        }
        if let Ok(v) = env::var("ALLOWED_ORIGINS") {
            cfg.server.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("PORT") {
            if let Ok(p) = v.parse() {
                cfg.server.port = p;
            }
        }

        // Keys pasted into env vars carry literal "\n" sequences.
        if cfg.google.private_key.contains("\\n") {
            cfg.google.private_key = cfg.google.private_key.replace("\\n", "\n");
        }

        Ok(cfg)
    }
}
