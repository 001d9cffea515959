//! HTTP route handlers.

use axum::{
    extract::{Query, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::{login, Claims};
use crate::error::ApiError;
use crate::mappers::{performance, pnl, trades};
use crate::sheets::range::RangeQuery;

use super::error::WebError;
use super::guard;
use super::server::AppState;

/// Build the full route set.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/verify-token", get(verify_token))
        .route("/api/test-sheets", get(test_sheets))
        .route("/api/performance-data", get(performance_data))
        .route("/api/trade-history", get(trade_history))
        .route("/api/pnl-data", get(pnl_data))
        .route_layer(middleware::from_fn_with_state(state, guard::require_bearer));

    Router::new()
        .route("/", get(liveness))
        .route("/test", get(liveness))
        .route("/api/login", post(handle_login))
        .merge(protected)
        .fallback(not_found)
}

/// GET / and /test — liveness message.
async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "sheetboard" }))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// POST /api/login — credential pair in, signed token out.
async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, WebError> {
    let issued = login::authenticate(&state.config.auth, &req.email, &req.password)
        .map_err(|e| state.web_err(e))?;

    info!(email = %req.email, "login succeeded");
    Ok(Json(
        json!({ "token": issued.token, "expiresIn": issued.expires_in }),
    ))
}

/// GET /api/verify-token — echo the decoded identity claims.
async fn verify_token(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({ "email": claims.sub, "iat": claims.iat, "exp": claims.exp }))
}

/// GET /api/test-sheets — round-trip one fixed cell to confirm
/// connectivity.
async fn test_sheets(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    let cfg = &state.config.sheets;
    let range = RangeQuery::new(&cfg.summary_sheet, &cfg.test_cells);

    let rows = state
        .sheets
        .values_get(&range)
        .await
        .map_err(|e| state.web_err(e))?;
    let value = rows
        .first()
        .and_then(|r| r.first())
        .cloned()
        .unwrap_or_default();

    Ok(Json(json!({ "ok": true, "value": value })))
}

/// GET /api/performance-data — weekly/last-week/monthly/yearly summary.
/// The two range reads run concurrently; either failing is a 500, either
/// coming back empty is a 404.
async fn performance_data(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    let cfg = &state.config.sheets;
    let current = RangeQuery::new(&cfg.summary_sheet, &cfg.summary_current_cells);
    let previous = RangeQuery::new(&cfg.summary_sheet, &cfg.summary_previous_cells);

    let (current_rows, previous_rows) = tokio::try_join!(
        state.sheets.values_get(&current),
        state.sheets.values_get(&previous),
    )
    .map_err(|e| state.web_err(e))?;

    if current_rows.is_empty() || previous_rows.is_empty() {
        return Err(state.web_err(ApiError::NoData("summary ranges returned no values".into())));
    }

    let entries = performance::map_performance(&current_rows, &previous_rows);
    Ok(Json(json!(entries)))
}

/// GET /api/trade-history — trade records, most recent first. Zero data
/// rows is an empty list, not an error.
async fn trade_history(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    let cfg = &state.config.sheets;
    let range = RangeQuery::new(&cfg.trades_sheet, &cfg.trades_cells);

    let rows = state
        .sheets
        .values_get(&range)
        .await
        .map_err(|e| state.web_err(e))?;
    let records = trades::map_trades(&rows, &cfg.columns).map_err(|e| state.web_err(e))?;

    Ok(Json(json!(records)))
}

#[derive(Debug, Deserialize)]
struct PnlQuery {
    sheet: Option<String>,
}

/// GET /api/pnl-data — P&L series, most recent first. `?sheet=` selects
/// the source sheet, checked against the configured allowlist.
async fn pnl_data(
    State(state): State<AppState>,
    Query(query): Query<PnlQuery>,
) -> Result<Json<Value>, WebError> {
    let cfg = &state.config.sheets;

    let sheet = match query.sheet {
        Some(s) if cfg.pnl_allowed_sheets.iter().any(|a| a == &s) => s,
        Some(s) => return Err(WebError::not_found(format!("unknown sheet '{s}'"))),
        None => cfg.pnl_default_sheet.clone(),
    };

    let range = RangeQuery::new(sheet, &cfg.pnl_cells);
    let rows = state
        .sheets
        .values_get(&range)
        .await
        .map_err(|e| state.web_err(e))?;
    let points = pnl::map_pnl(&rows, &cfg.columns).map_err(|e| state.web_err(e))?;

    Ok(Json(json!(points)))
}

async fn not_found() -> WebError {
    WebError::not_found("not found")
}
