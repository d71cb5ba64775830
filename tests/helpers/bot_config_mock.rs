//! Mock bot config service for testing
//!
//! This module provides a mock HTTP server that simulates the backend's
//! `/api/wechat-bot` endpoints. It uses wiremock to create configurable mock
//! responses wrapped in the `{code, message, data}` envelope.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};
use wechat_bot_console::config::settings::ApiConfig;
use wechat_bot_console::services::BotConfigClient;

/// Mock bot config service for testing
pub struct BotConfigMockServer {
    pub server: MockServer,
    pub base_url: String,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failure() -> Self {
        Self {
            success: false,
            ..Self::default()
        }
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            custom_response: Some(body),
            ..Self::default()
        }
    }
}

/// Wrap a payload in a success envelope
pub fn envelope(data: Value) -> Value {
    json!({ "code": 0, "message": "success", "data": data })
}

/// An envelope signalling a server-side failure
pub fn failure_envelope(code: i64, message: &str) -> Value {
    json!({ "code": code, "message": message, "data": null })
}

/// JSON of one record as the backend returns it
pub fn record_json(id: i64) -> Value {
    json!({
        "id": id,
        "botKey": format!("k{}", id),
        "corpId": format!("ww{}", id),
        "agentId": format!("100{}", id),
        "token": "t",
        "encodingAesKey": "e",
        "agentIdRef": format!("ref{}", id),
        "callbackUrl": format!("http://callback.example.com/api/wechat/callback/k{}", id),
        "isActive": true,
        "createTime": "2024-03-01 08:05:09",
        "updateTime": "2024-03-02T10:00:00"
    })
}

impl BotConfigMockServer {
    /// Start a new mock service
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();

        Self { server, base_url }
    }

    /// API settings pointing at this server
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: 1,
            user_agent: "wechat-bot-console-tests".to_string(),
        }
    }

    /// HTTP client pointing at this server
    pub fn client(&self) -> BotConfigClient {
        BotConfigClient::new(&self.api_config()).expect("client should build")
    }

    fn respond(&self, config: MockResponseConfig, data: Value) -> ResponseTemplate {
        let body = config.custom_response.unwrap_or_else(|| {
            if config.success {
                envelope(data)
            } else {
                failure_envelope(500, "服务器错误")
            }
        });

        let template = ResponseTemplate::new(200).set_body_json(body);
        match config.delay_ms {
            Some(delay) => template.set_delay(Duration::from_millis(delay)),
            None => template,
        }
    }

    /// Setup mock for the paged listing
    pub async fn mock_page(&self, config: MockResponseConfig, records: Vec<Value>, total: u64) {
        let data = json!({ "records": records, "total": total, "current": 1, "size": 10 });
        Mock::given(method("GET"))
            .and(path("/api/wechat-bot/page"))
            .respond_with(self.respond(config, data))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for lookup by id
    pub async fn mock_get(&self, id: i64, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path(format!("/api/wechat-bot/{}", id)))
            .respond_with(self.respond(config, record_json(id)))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for create
    pub async fn mock_create(&self, config: MockResponseConfig) {
        Mock::given(method("POST"))
            .and(path("/api/wechat-bot"))
            .respond_with(self.respond(config, json!(true)))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for update
    pub async fn mock_update(&self, config: MockResponseConfig) {
        Mock::given(method("PUT"))
            .and(path("/api/wechat-bot"))
            .respond_with(self.respond(config, json!(true)))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for delete
    pub async fn mock_delete(&self, id: i64, config: MockResponseConfig) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/wechat-bot/{}", id)))
            .respond_with(self.respond(config, json!(true)))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for key generation
    pub async fn mock_generate_key(&self, key: &str, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path("/api/wechat-bot/generate-key"))
            .respond_with(self.respond(config, json!(key)))
            .mount(&self.server)
            .await;
    }

    /// Setup all common mocks with default responses
    pub async fn setup_default_mocks(&self) {
        self.mock_page(MockResponseConfig::default(), vec![record_json(1), record_json(2)], 2)
            .await;
        self.mock_generate_key("BOT-DEFAULT", MockResponseConfig::default()).await;
        self.mock_create(MockResponseConfig::default()).await;
        self.mock_update(MockResponseConfig::default()).await;
    }

    /// Number of requests received with the given method and path
    pub async fn count_requests(&self, http_method: &str, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == request_path)
            .count()
    }

    /// Query string of every listing request, in arrival order
    pub async fn page_queries(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/api/wechat-bot/page")
            .map(|r| r.url.query().unwrap_or_default().to_string())
            .collect()
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
