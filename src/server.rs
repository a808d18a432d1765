// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON API over the store and the derived dashboard views.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregate::{self, BudgetOverview};
use crate::error::ValidationError;
use crate::insights;
use crate::ledger::Ledger;
use crate::models::{
    parse_month_name, Investment, NewBudget, NewInvestment, NewTransaction, Period, Regime,
    TxnType,
};
use crate::snapshot::{self, Snapshot};
use crate::store;
use crate::tax;
use crate::utils::{fmt_currency, fmt_percent};

const DEFAULT_CHART_MONTHS: usize = 6;

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        // multi-statement writes run in SQLite transactions, so the
        // connection behind a poisoned lock is still consistent
        let mut guard = self.conn.lock().unwrap_or_else(|poisoned| {
            log::warn!("recovering database lock released by a panicked request");
            poisoned.into_inner()
        });
        f(&mut guard)
    }

    /// Derived views never fail: an unreadable store shows as empty.
    fn ledger(&self) -> Ledger {
        self.with_conn(|c| Ok(Ledger::load_or_empty(c)))
            .unwrap_or_default()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/api/investments",
            get(list_investments).post(create_investment),
        )
        .route("/api/budgets", get(list_budgets).post(upsert_budget))
        .route(
            "/api/tax-records",
            get(list_tax_records).post(create_tax_record),
        )
        .route("/api/tax/estimate", axum::routing::post(estimate_tax))
        .route("/api/dashboard-summary", get(dashboard_summary))
        .route("/api/budget-status", get(budget_status))
        .route("/api/insights", get(insights_handler))
        .route("/api/chart", get(chart))
        .route("/api/export", get(export_snapshot))
        .route("/api/import", axum::routing::post(import_snapshot))
        .fallback(not_found_handler)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn run_http_server(state: AppState, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("fintrack API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/dashboard-summary");

    axum::serve(listener, app).await
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

/// Validation problems are the caller's fault; anything else is ours.
fn failure_response(err: anyhow::Error) -> Response {
    if let Some(v) = err.downcast_ref::<ValidationError>() {
        return error_response(StatusCode::BAD_REQUEST, &v.to_string());
    }
    log::error!("request failed: {:#}", err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("{:#}", err))
}

fn rejection_response(rejection: JsonRejection) -> Response {
    error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
}

#[derive(Serialize)]
struct Created {
    id: i64,
}

fn created(res: Result<i64>) -> Response {
    match res {
        Ok(id) => json_response(StatusCode::OK, Created { id }),
        Err(e) => failure_response(e),
    }
}

fn listed<T: Serialize>(res: Result<T>) -> Response {
    match res {
        Ok(rows) => json_response(StatusCode::OK, rows),
        Err(e) => failure_response(e),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// --- transactions ---

#[derive(Debug, Deserialize)]
pub struct TransactionPayload {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub r#type: Option<String>,
}

impl TransactionPayload {
    fn into_new(self, today: NaiveDate) -> Result<NewTransaction, ValidationError> {
        Ok(NewTransaction {
            date: self.date.unwrap_or(today),
            description: self.description.ok_or(ValidationError::Missing("description"))?,
            amount: self.amount.ok_or(ValidationError::Missing("amount"))?,
            category: self.category.ok_or(ValidationError::Missing("category"))?,
            r#type: self
                .r#type
                .ok_or(ValidationError::Missing("type"))?
                .parse::<TxnType>()?,
        })
    }
}

async fn list_transactions(State(state): State<AppState>) -> Response {
    listed(state.with_conn(|c| store::list_transactions(c)))
}

async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };
    let new = match payload.into_new(today()) {
        Ok(n) => n,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    created(state.with_conn(|c| store::add_transaction(c, &new)))
}

// --- investments ---

#[derive(Debug, Deserialize)]
pub struct InvestmentPayload {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub amount_invested: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub date_invested: Option<NaiveDate>,
}

impl InvestmentPayload {
    fn into_new(self, today: NaiveDate) -> Result<NewInvestment, ValidationError> {
        Ok(NewInvestment {
            name: self.name.ok_or(ValidationError::Missing("name"))?,
            r#type: self.r#type.ok_or(ValidationError::Missing("type"))?,
            amount_invested: self
                .amount_invested
                .ok_or(ValidationError::Missing("amount_invested"))?,
            current_value: self.current_value,
            date_invested: self.date_invested.unwrap_or(today),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct InvestmentView {
    #[serde(flatten)]
    pub investment: Investment,
    pub gain: Decimal,
    pub return_percent: Option<Decimal>,
    pub gain_display: String,
    pub return_display: String,
}

impl From<Investment> for InvestmentView {
    fn from(investment: Investment) -> Self {
        let gain = aggregate::investment_gain(&investment);
        let return_percent = aggregate::return_percent(&investment);
        InvestmentView {
            gain_display: fmt_currency(gain),
            return_display: fmt_percent(return_percent),
            investment,
            gain,
            return_percent,
        }
    }
}

async fn list_investments(State(state): State<AppState>) -> Response {
    let rows = state.with_conn(|c| store::list_investments(c));
    listed(rows.map(|rows| rows.into_iter().map(InvestmentView::from).collect::<Vec<_>>()))
}

async fn create_investment(
    State(state): State<AppState>,
    payload: Result<Json<InvestmentPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };
    let new = match payload.into_new(today()) {
        Ok(n) => n,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    created(state.with_conn(|c| store::add_investment(c, &new)))
}

// --- budgets ---

#[derive(Debug, Default, Deserialize)]
pub struct BudgetQuery {
    pub month: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetPayload {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub month: Option<String>,
    pub year: Option<i32>,
}

impl BudgetPayload {
    fn into_new(self, now: Period) -> Result<NewBudget, ValidationError> {
        Ok(NewBudget {
            category: self.category.ok_or(ValidationError::Missing("category"))?,
            amount: self.amount.ok_or(ValidationError::Missing("amount"))?,
            month: self.month.unwrap_or_else(|| now.month_name().to_string()),
            year: self.year.unwrap_or(now.year()),
        })
    }
}

async fn list_budgets(State(state): State<AppState>, Query(q): Query<BudgetQuery>) -> Response {
    let now = Period::current();
    let month = q.month.unwrap_or_else(|| now.month_name().to_string());
    let year = q.year.unwrap_or(now.year());
    listed(state.with_conn(|c| store::list_budgets(c, &month, year)))
}

async fn upsert_budget(
    State(state): State<AppState>,
    payload: Result<Json<BudgetPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };
    let new = match payload.into_new(Period::current()) {
        Ok(n) => n,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    created(state.with_conn(|c| store::upsert_budget(c, &new)))
}

/// Spend against every budget for `month`/`year` (default: this month).
async fn budget_status(State(state): State<AppState>, Query(q): Query<BudgetQuery>) -> Response {
    let period = match period_from_query(&q) {
        Ok(p) => p,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let ledger = state.ledger();
    let overview: BudgetOverview =
        aggregate::budget_status(&ledger.budgets, &ledger.transactions, period);
    json_response(StatusCode::OK, overview)
}

fn period_from_query(q: &BudgetQuery) -> Result<Period, ValidationError> {
    let now = Period::current();
    let month = match &q.month {
        Some(m) => parse_month_name(m)?.number_from_month(),
        None => now.month(),
    };
    let year = q.year.unwrap_or(now.year());
    Period::new(year, month).ok_or(ValidationError::InvalidYear(year))
}

// --- tax ---

async fn list_tax_records(State(state): State<AppState>) -> Response {
    listed(state.with_conn(|c| store::list_tax_records(c)))
}

#[derive(Debug, Deserialize)]
pub struct TaxRecordPayload {
    pub financial_year: Option<String>,
    pub gross_income: Option<Decimal>,
    pub taxable_income: Option<Decimal>,
    pub tax_paid: Option<Decimal>,
    pub regime: Option<String>,
    pub deductions: Option<Decimal>,
}

impl TaxRecordPayload {
    fn into_new(self) -> Result<crate::models::NewTaxRecord, ValidationError> {
        Ok(crate::models::NewTaxRecord {
            financial_year: self
                .financial_year
                .ok_or(ValidationError::Missing("financial_year"))?,
            gross_income: self
                .gross_income
                .ok_or(ValidationError::Missing("gross_income"))?,
            taxable_income: self
                .taxable_income
                .ok_or(ValidationError::Missing("taxable_income"))?,
            tax_paid: self.tax_paid.ok_or(ValidationError::Missing("tax_paid"))?,
            regime: self
                .regime
                .ok_or(ValidationError::Missing("regime"))?
                .parse::<Regime>()?,
            deductions: self.deductions.unwrap_or(Decimal::ZERO),
        })
    }
}

async fn create_tax_record(
    State(state): State<AppState>,
    payload: Result<Json<TaxRecordPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };
    let new = match payload.into_new() {
        Ok(n) => n,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    created(state.with_conn(|c| store::add_tax_record(c, &new)))
}

#[derive(Debug, Deserialize)]
pub struct EstimatePayload {
    pub gross_income: Option<Decimal>,
    pub regime: Option<String>,
    pub deductions: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct EstimateResponse {
    #[serde(flatten)]
    estimate: tax::TaxEstimate,
    record_id: i64,
    financial_year: String,
    tax_payable_display: String,
    in_hand_display: String,
}

/// Estimates, then records the estimate as a tax record.
async fn estimate_tax(
    State(state): State<AppState>,
    payload: Result<Json<EstimatePayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };
    let estimate = payload
        .regime
        .ok_or(ValidationError::Missing("regime"))
        .and_then(|r| r.parse::<Regime>())
        .and_then(|regime| {
            tax::estimate_tax(
                payload.gross_income.unwrap_or(Decimal::ZERO),
                regime,
                payload.deductions.unwrap_or(Decimal::ZERO),
            )
        });
    let estimate = match estimate {
        Ok(e) => e,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let financial_year = tax::financial_year_for(today());
    let record = estimate.to_record(financial_year.clone());
    match state.with_conn(|c| store::add_tax_record(c, &record)) {
        Ok(record_id) => json_response(
            StatusCode::OK,
            EstimateResponse {
                tax_payable_display: fmt_currency(estimate.tax_payable),
                in_hand_display: fmt_currency(estimate.in_hand),
                estimate,
                record_id,
                financial_year,
            },
        ),
        Err(e) => failure_response(e),
    }
}

// --- derived views ---

async fn dashboard_summary(State(state): State<AppState>) -> Response {
    let ledger = state.ledger();
    json_response(
        StatusCode::OK,
        aggregate::dashboard_summary(&ledger, Period::current()),
    )
}

#[derive(Debug, Serialize)]
struct InsightsResponse {
    insights: Vec<String>,
    healthy: bool,
}

async fn insights_handler(State(state): State<AppState>) -> Response {
    let ledger = state.ledger();
    let found = insights::for_ledger(&ledger, Period::current());
    json_response(
        StatusCode::OK,
        InsightsResponse {
            healthy: found.is_empty(),
            insights: insights::messages(&found),
        },
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub months: Option<usize>,
}

async fn chart(State(state): State<AppState>, Query(q): Query<ChartQuery>) -> Response {
    let months = q
        .months
        .unwrap_or(DEFAULT_CHART_MONTHS)
        .clamp(1, aggregate::MAX_SERIES_MONTHS);
    let ledger = state.ledger();
    json_response(
        StatusCode::OK,
        aggregate::monthly_series(&ledger.transactions, Period::current(), months),
    )
}

// --- interchange ---

async fn export_snapshot(State(state): State<AppState>) -> Response {
    match state.with_conn(|c| Ledger::load(c)) {
        Ok(ledger) => json_response(
            StatusCode::OK,
            Snapshot::capture(&ledger, chrono::Utc::now()),
        ),
        Err(e) => failure_response(e),
    }
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    transactions: usize,
    investments: usize,
    budgets: usize,
}

async fn import_snapshot(State(state): State<AppState>, body: String) -> Response {
    let ledger = match Snapshot::parse(&body) {
        Ok(snap) => snap.into_imported_ledger(),
        // parse and validation failures leave the store as it was
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &format!("{:#}", e)),
    };
    match state.with_conn(|c| snapshot::apply(c, &ledger)) {
        Ok(()) => json_response(
            StatusCode::OK,
            ImportResponse {
                transactions: ledger.transactions.len(),
                investments: ledger.investments.len(),
                budgets: ledger.budgets.len(),
            },
        ),
        Err(e) => failure_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    fn state() -> AppState {
        AppState::new(crate::db::open_in_memory().unwrap())
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn payload<T: serde::de::DeserializeOwned>(v: Value) -> Result<Json<T>, JsonRejection> {
        Ok(Json(serde_json::from_value(v).unwrap()))
    }

    #[tokio::test]
    async fn created_transaction_shows_in_summary() {
        let st = state();
        let today = today().to_string();
        let resp = create_transaction(
            State(st.clone()),
            payload(json!({"date": today, "description": "Salary", "amount": 1000, "category": "salary", "type": "income"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["id"], 1);

        let resp = create_transaction(
            State(st.clone()),
            payload(json!({"description": "Groceries", "amount": "400", "category": "food", "type": "expense"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let summary = body_json(dashboard_summary(State(st)).await).await;
        assert_eq!(summary["current_balance"], "600");
        assert_eq!(summary["monthly_expenses"], "400");
        assert_eq!(summary["total_investments"], "0");
    }

    #[tokio::test]
    async fn missing_amount_is_a_bad_request() {
        let st = state();
        let resp = create_transaction(
            State(st.clone()),
            payload(json!({"description": "Lunch", "category": "food", "type": "expense"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "amount is required");

        let listed = body_json(list_transactions(State(st)).await).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn investment_defaults_current_value_and_reports_na() {
        let st = state();
        let resp = create_investment(
            State(st.clone()),
            payload(json!({"name": "Gift shares", "type": "stocks", "amount_invested": 0})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = create_investment(
            State(st.clone()),
            payload(json!({"name": "Nifty fund", "type": "mutual-fund", "amount_invested": 1000, "current_value": 1100, "date_invested": "2020-01-01"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let rows = body_json(list_investments(State(st)).await).await;
        let rows = rows.as_array().unwrap();
        let gift = rows.iter().find(|r| r["name"] == "Gift shares").unwrap();
        assert_eq!(gift["current_value"], "0");
        assert_eq!(gift["return_display"], "N/A");
        assert_eq!(gift["return_percent"], Value::Null);
        let fund = rows.iter().find(|r| r["name"] == "Nifty fund").unwrap();
        assert_eq!(fund["return_display"], "10.00%");
        assert_eq!(fund["gain_display"], "₹100.00");
    }

    #[tokio::test]
    async fn estimate_persists_one_record() {
        let st = state();
        let resp = estimate_tax(
            State(st.clone()),
            payload(json!({"gross_income": 1000000, "regime": "old"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["tax_payable_display"], "₹1,12,500.00");

        let records = body_json(list_tax_records(State(st)).await).await;
        assert_eq!(records.as_array().unwrap().len(), 1);
        assert_eq!(records[0]["regime"], "old");
    }

    #[tokio::test]
    async fn unknown_regime_is_rejected_without_record() {
        let st = state();
        let resp = estimate_tax(
            State(st.clone()),
            payload(json!({"gross_income": 500000, "regime": "flat"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let records = body_json(list_tax_records(State(st)).await).await;
        assert_eq!(records, json!([]));
    }

    #[tokio::test]
    async fn budget_defaults_to_current_month() {
        let st = state();
        let resp = upsert_budget(
            State(st.clone()),
            payload(json!({"category": "food", "amount": 5000})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let rows = body_json(list_budgets(State(st), Query(BudgetQuery::default())).await).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["month"], Period::current().month_name());
    }

    #[tokio::test]
    async fn chart_returns_requested_months() {
        let st = state();
        let rows = body_json(chart(State(st), Query(ChartQuery { months: Some(3) })).await).await;
        assert_eq!(rows.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn invalid_import_leaves_data_alone() {
        let st = state();
        create_transaction(
            State(st.clone()),
            payload(json!({"description": "Salary", "amount": 10, "category": "salary", "type": "income"})),
        )
        .await;

        let resp = import_snapshot(State(st.clone()), "{\"transactions\": [".to_string()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let listed = body_json(list_transactions(State(st)).await).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn oversized_investment_renders_and_server_keeps_serving() {
        let st = state();
        let resp = create_investment(
            State(st.clone()),
            payload(json!({"name": "Moonshot", "type": "crypto", "amount_invested": "0.01", "current_value": "10000000000000000000000000"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = list_investments(State(st.clone())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let rows = body_json(resp).await;
        assert_eq!(rows[0]["return_display"], "N/A");

        let resp = create_transaction(
            State(st),
            payload(json!({"description": "Salary", "amount": 10, "category": "salary", "type": "income"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn overflowing_import_is_applied_without_panicking() {
        let st = state();
        let max = "79228162514264337593543950335";
        let doc = json!({
            "transactions": [
                {"id": 1, "date": "2025-01-01", "description": "a", "amount": max, "category": "x", "type": "income"},
                {"id": 2, "date": "2025-01-02", "description": "b", "amount": max, "category": "x", "type": "income"}
            ]
        });
        let resp = import_snapshot(State(st.clone()), doc.to_string()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let summary = body_json(dashboard_summary(State(st)).await).await;
        assert_eq!(summary["current_balance"], max);
    }

    #[tokio::test]
    async fn poisoned_lock_is_recovered() {
        let st = state();
        let shared = st.conn.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.lock().unwrap();
            panic!("handler failed while holding the connection");
        })
        .join();
        assert!(st.conn.is_poisoned());

        let resp = create_transaction(
            State(st.clone()),
            payload(json!({"description": "Salary", "amount": 10, "category": "salary", "type": "income"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed = body_json(list_transactions(State(st)).await).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed() {
        use axum::body::Body;
        use axum::http::{Method, Request};
        use tower::ServiceExt;

        let app = router(state());
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard-summary")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let preflight = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/transactions")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(preflight.status().is_success());
        assert_eq!(preflight.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn healthy_ledger_gets_affirmation() {
        let st = state();
        create_transaction(
            State(st.clone()),
            payload(json!({"description": "Salary", "amount": 1000, "category": "salary", "type": "income"})),
        )
        .await;
        let body = body_json(insights_handler(State(st)).await).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["insights"][0], insights::HEALTHY);
    }
}
