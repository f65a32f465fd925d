use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use loandesk::api::{SharedStore, router};
use loandesk::store::{InMemoryStore, RecordStore, StoreError};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn sample_application() -> Value {
    json!({
        "applicantName": "N. Kulkarni",
        "dateOfBirth": "1990-11-23",
        "panNumber": "FGHIJ5678K",
        "fatherName": "V. Kulkarni",
        "motherName": "S. Kulkarni",
        "phoneNumber": "+91 90909 80808",
        "email": "n.kulkarni@example.com",
        "applicationDate": "2026-08-07",
        "applicationTime": "15:10",
        "currentAddress": "7 Canal Road, Nagpur",
        "residenceType": "own",
        "permanentAddress": "7 Canal Road, Nagpur",
        "employmentType": "salaried",
        "companyName": "Orange City Software",
        "companyAddress": "IT Park, Nagpur",
        "officePhone": "0712 224 4556",
        "designation": "Analyst",
        "timeInCurrentJob": "3 years",
        "loanType": "PL",
        "loanAmount": 300000.0,
        "tenure": 36,
        "reference1Name": "P. Joshi",
        "reference1Address": "Dharampeth, Nagpur",
        "reference1Phone": "+91 91111 22222",
        "reference2Name": "T. Meshram",
        "reference2Address": "Sadar, Nagpur",
        "reference2Phone": "+91 93333 44444",
        "signature": "N. Kulkarni"
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router(Arc::new(InMemoryStore::default()));
    let response = app.oneshot(get("/health")).await.expect("request runs");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn pages_are_served_as_html() {
    let app = router(Arc::new(InMemoryStore::default()));
    for uri in ["/", "/about", "/services", "/contact", "/apply"] {
        let response = app
            .clone()
            .oneshot(get(uri))
            .await
            .expect("request runs");
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type set")
            .to_str()
            .expect("ascii header");
        assert!(content_type.starts_with("text/html"), "{uri}");
    }
}

#[tokio::test]
async fn calculator_defaults_expose_slider_limits() {
    let app = router(Arc::new(InMemoryStore::default()));
    let response = app
        .oneshot(get("/api/calculator"))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["inputs"]["principal"], 100_000.0);
    assert_eq!(body["inputs"]["termMonths"], 12);
    assert_eq!(body["limits"]["principal"]["max"], 10_000_000.0);
    assert_eq!(body["limits"]["termMonths"]["step"], 3);
    assert!(body["results"]["monthlyPayment"].as_f64().expect("number") > 0.0);
}

#[tokio::test]
async fn quote_get_computes_the_annuity_payment() {
    let app = router(Arc::new(InMemoryStore::default()));
    let response = app
        .oneshot(get(
            "/api/quote?principal=100000&annualRatePercent=10&termMonths=12",
        ))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let monthly = body["monthlyPayment"].as_f64().expect("number");
    let total = body["totalPayment"].as_f64().expect("number");
    let interest = body["totalInterest"].as_f64().expect("number");
    assert!((monthly - 8_791.588_723).abs() < 1e-3);
    assert!((total - 105_499.064_676).abs() < 1e-3);
    assert!((interest - 5_499.064_676).abs() < 1e-3);
}

#[tokio::test]
async fn quote_post_accepts_widget_alias_keys() {
    let app = router(Arc::new(InMemoryStore::default()));
    let payload = json!({ "loanAmount": 500000, "interestRate": 7.2, "tenure": 36 });
    let response = app
        .oneshot(post_json("/api/quote", &payload))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let monthly = body["monthlyPayment"].as_f64().expect("number");
    assert!((monthly - 15_484.311_089).abs() < 1e-3);
}

#[tokio::test]
async fn quote_with_zero_term_is_a_bad_request() {
    let app = router(Arc::new(InMemoryStore::default()));
    let response = app
        .oneshot(get("/api/quote?termMonths=0"))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("termMonths"));
}

#[tokio::test]
async fn callback_submission_lands_in_the_store() {
    let store = Arc::new(InMemoryStore::default());
    let shared: SharedStore = store.clone();
    let app = router(shared);

    let payload = json!({
        "name": "M. Shah",
        "phone": "+91 90000 11111",
        "preferredTime": "morning",
        "message": "Prefer a call before office hours",
    });
    let response = app
        .oneshot(post_json("/api/callback-requests", &payload))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["status"], "received");

    let rows = store.rows("callback_requests");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "M. Shah");
    assert_eq!(rows[0]["preferred_time"], "morning");
    assert_eq!(rows[0]["status"], "pending");
    assert!(rows[0]["created_at"].is_string());
}

#[tokio::test]
async fn application_submission_lands_in_the_store() {
    let store = Arc::new(InMemoryStore::default());
    let shared: SharedStore = store.clone();
    let app = router(shared);

    let response = app
        .oneshot(post_json("/api/loan-applications", &sample_application()))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::CREATED);

    let rows = store.rows("loan_applications");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["loanType"], "PL");
    assert_eq!(rows[0]["tenure"], 36);
    assert!(rows[0]["created_at"].is_string());
    assert!(rows[0]["vehicleDetails"].is_null());
}

#[tokio::test]
async fn application_missing_a_required_field_is_rejected() {
    let store = Arc::new(InMemoryStore::default());
    let shared: SharedStore = store.clone();
    let app = router(shared);

    let mut payload = sample_application();
    payload
        .as_object_mut()
        .expect("object payload")
        .remove("panNumber");
    let response = app
        .oneshot(post_json("/api/loan-applications", &payload))
        .await
        .expect("request runs");
    assert!(response.status().is_client_error());
    assert!(store.rows("loan_applications").is_empty());
}

#[tokio::test]
async fn store_failure_surfaces_as_bad_gateway() {
    struct OfflineStore;

    impl RecordStore for OfflineStore {
        fn insert(&self, _table: &str, _row: Value) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("maintenance window".to_string()))
        }
    }

    let app = router(Arc::new(OfflineStore));
    let payload = json!({
        "name": "M. Shah",
        "phone": "+91 90000 11111",
        "preferredTime": "evening",
    });
    let response = app
        .oneshot(post_json("/api/callback-requests", &payload))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unknown_routes_fall_back_to_json_not_found() {
    let app = router(Arc::new(InMemoryStore::default()));
    let response = app
        .oneshot(get("/api/interest-rates"))
        .await
        .expect("request runs");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
}
