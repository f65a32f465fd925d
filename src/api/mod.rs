use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::core::{
    CalculatorLimits, CalculatorState, DEFAULT_TERMS, LoanQuote, LoanTerms, quote,
};
use crate::error::AppError;
use crate::store::RecordStore;
use crate::submissions::{APPLICATION_TABLE, CALLBACK_TABLE, CallbackRequest, LoanApplication};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const ABOUT_HTML: &str = include_str!("../../web/about.html");
const SERVICES_HTML: &str = include_str!("../../web/services.html");
const CONTACT_HTML: &str = include_str!("../../web/contact.html");
const APPLY_HTML: &str = include_str!("../../web/apply.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

pub type SharedStore = Arc<dyn RecordStore>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct QuotePayload {
    #[serde(alias = "loanAmount", alias = "amount")]
    principal: Option<f64>,
    #[serde(alias = "interestRate", alias = "rate")]
    annual_rate_percent: Option<f64>,
    #[serde(alias = "loanTerm", alias = "tenure")]
    term_months: Option<u32>,
}

impl QuotePayload {
    fn into_terms(self) -> LoanTerms {
        LoanTerms {
            principal: self.principal.unwrap_or(DEFAULT_TERMS.principal),
            annual_rate_percent: self
                .annual_rate_percent
                .unwrap_or(DEFAULT_TERMS.annual_rate_percent),
            term_months: self.term_months.unwrap_or(DEFAULT_TERMS.term_months),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculatorResponse {
    inputs: LoanTerms,
    results: LoanQuote,
    limits: CalculatorLimits,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/about", get(about_page))
        .route("/services", get(services_page))
        .route("/contact", get(contact_page))
        .route("/apply", get(apply_page))
        .route("/styles.css", get(styles_asset))
        .route("/app.js", get(script_asset))
        .route("/health", get(health))
        .route("/api/calculator", get(calculator_defaults))
        .route("/api/quote", get(quote_get).post(quote_post))
        .route("/api/callback-requests", post(submit_callback))
        .route("/api/loan-applications", post(submit_application))
        .fallback(not_found)
        .with_state(store)
}

pub async fn serve(config: &AppConfig, store: SharedStore) -> Result<(), AppError> {
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(environment = ?config.environment, %addr, "loandesk site listening");

    axum::serve(listener, router(store)).await?;
    Ok(())
}

async fn index_page() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn about_page() -> impl IntoResponse {
    with_cache_control(Html(ABOUT_HTML))
}

async fn services_page() -> impl IntoResponse {
    with_cache_control(Html(SERVICES_HTML))
}

async fn contact_page() -> impl IntoResponse {
    with_cache_control(Html(CONTACT_HTML))
}

async fn apply_page() -> impl IntoResponse {
    with_cache_control(Html(APPLY_HTML))
}

async fn styles_asset() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn script_asset() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn health() -> impl IntoResponse {
    json_response(StatusCode::OK, json!({ "status": "ok" }))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculator_defaults() -> Response {
    match CalculatorState::new(CalculatorLimits::default()) {
        Ok(state) => json_response(
            StatusCode::OK,
            CalculatorResponse {
                inputs: state.terms(),
                results: state.quote(),
                limits: *state.limits(),
            },
        ),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

async fn quote_get(Query(payload): Query<QuotePayload>) -> Response {
    quote_handler_impl(payload)
}

async fn quote_post(Json(payload): Json<QuotePayload>) -> Response {
    quote_handler_impl(payload)
}

fn quote_handler_impl(payload: QuotePayload) -> Response {
    match quote(payload.into_terms()) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(err) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

async fn submit_callback(
    State(store): State<SharedStore>,
    Json(request): Json<CallbackRequest>,
) -> Result<Response, AppError> {
    let row = request.into_row(Utc::now());
    store_row(&store, CALLBACK_TABLE, row)
}

async fn submit_application(
    State(store): State<SharedStore>,
    Json(application): Json<LoanApplication>,
) -> Result<Response, AppError> {
    let row = application.into_row(Utc::now())?;
    store_row(&store, APPLICATION_TABLE, row)
}

fn store_row(
    store: &SharedStore,
    table: &'static str,
    row: serde_json::Value,
) -> Result<Response, AppError> {
    if let Err(err) = store.insert(table, row) {
        error!(table, %err, "record store insert failed");
        return Err(err.into());
    }
    info!(table, "stored submission");
    Ok(json_response(StatusCode::CREATED, json!({ "status": "received" })))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
