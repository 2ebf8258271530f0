#![allow(dead_code)]

use axum::{Router, http::HeaderMap, http::StatusCode, routing::post};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// What the stub scoring service saw on its last request
#[derive(Debug, Clone, Default)]
pub struct Captured {
    pub content_type: Option<String>,
    pub body: Option<serde_json::Value>,
    pub hits: usize,
}

/// Starts a scoring service on an ephemeral port that answers every
/// assessment with `status` and `body`. Returns its base URL.
pub async fn spawn_scoring_service(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let seen = captured.clone();

    let app = Router::new().route(
        "/api/assess-credit",
        post(move |headers: HeaderMap, payload: String| {
            let seen = seen.clone();
            async move {
                let mut seen = seen.lock().unwrap();
                seen.hits += 1;
                seen.content_type = headers
                    .get("content-type")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                seen.body = serde_json::from_str(&payload).ok();
                (status, body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

/// A base URL nothing is listening on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub const BAKERY_FIELDS: [(&str, &str); 11] = [
    ("businessName", "Maria's Bakery"),
    ("industry", "Food Service"),
    ("annualRevenue", "250000"),
    ("yearsInBusiness", "3"),
    ("employeeCount", "5"),
    ("creditScore", "650"),
    ("monthlyExpenses", "15000"),
    ("location", "Phoenix, AZ"),
    ("businessType", "llc"),
    ("loanAmount", "50000"),
    ("email", "m@x.com"),
];
