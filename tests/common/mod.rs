use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode as AxumStatus, Uri};
use axum::response::IntoResponse;
use axum::Router;
use reqwest::{Client, StatusCode, Url};
use serde_json::{json, Value};

use submission_gate::config::{AirtableConfig, Config};

pub const SECRET: &str = "test-shared-secret";
pub const AIRTABLE_KEY: &str = "test-airtable-key";
pub const BASE_ID: &str = "appTestBase";
pub const TABLE: &str = "Submissions";

/// A request received by the mock Airtable API.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug)]
struct MockState {
    calls: Vec<RecordedCall>,
    list_status: u16,
    list_body: String,
    patch_status: u16,
}

/// In-process stand-in for the Airtable API.
#[derive(Clone)]
pub struct MockAirtable {
    pub addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
}

impl MockAirtable {
    pub fn api_url(&self) -> Url {
        Url::parse(&format!("http://{}/v0", self.addr)).unwrap()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn set_list_response(&self, status: u16, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.list_status = status;
        state.list_body = body.to_string();
    }

    pub fn set_patch_status(&self, status: u16) {
        self.state.lock().unwrap().patch_status = status;
    }
}

async fn record(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    state.calls.push(RecordedCall {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let (status, body) = if method == Method::PATCH {
        (state.patch_status, json!({ "id": "rec1", "fields": {} }).to_string())
    } else {
        (state.list_status, state.list_body.clone())
    };

    (
        AxumStatus::from_u16(status).unwrap(),
        [("content-type", "application/json")],
        body,
    )
}

pub async fn spawn_mock_airtable() -> MockAirtable {
    let state = Arc::new(Mutex::new(MockState {
        calls: Vec::new(),
        list_status: 200,
        list_body: json!({ "records": [] }).to_string(),
        patch_status: 200,
    }));

    let app = Router::new().fallback(record).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock Airtable");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock Airtable failed");
    });

    MockAirtable { addr, state }
}

/// A running gate instance wired to its own mock Airtable.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub airtable: MockAirtable,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Authorized GET /submissions, returning the parsed body and status.
    pub async fn list_submissions(&self) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url("/submissions"))
            .bearer_auth(SECRET)
            .send()
            .await
            .expect("list request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Authorized POST /update with a JSON body.
    pub async fn update(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/update"))
            .bearer_auth(SECRET)
            .json(body)
            .send()
            .await
            .expect("update request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(airtable: &MockAirtable) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        max_body_size: 65_536,
        airtable_key: Some(AIRTABLE_KEY.to_string()),
        secret_key: Some(SECRET.to_string()),
        airtable: AirtableConfig {
            api_url: airtable.api_url(),
            base_id: BASE_ID.to_string(),
            table: TABLE.to_string(),
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spawn the gate after letting the caller adjust its configuration.
pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let airtable = spawn_mock_airtable().await;

    let mut config = test_config(&airtable);
    configure(&mut config);

    let app = submission_gate::build_app(config).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        airtable,
    }
}
