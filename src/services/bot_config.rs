//! Bot config service client
//!
//! Typed client for the backend's `/api/wechat-bot` endpoints: paged listing,
//! lookup by id, create, update, delete and bot key generation. Every payload
//! arrives wrapped in the backend's `{code, message, data}` envelope, which is
//! unwrapped here so callers only ever see the data or a typed error.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::settings::ApiConfig;
use crate::models::{ApiEnvelope, BotConfig, BotConfigRequest, PageParams, PageResponse};
use crate::utils::errors::{ApiError, ConsoleError, Result};
use crate::utils::logging;

/// Path of the bot config resource on the backend
pub const RESOURCE_PATH: &str = "/api/wechat-bot";

/// Operations the console needs from the bot config service
#[async_trait]
pub trait BotConfigApi: Send + Sync {
    /// Fetch one page of configs, optionally filtered by keyword
    async fn page(&self, params: &PageParams) -> Result<PageResponse<BotConfig>>;

    /// Fetch a single config
    async fn get(&self, id: i64) -> Result<BotConfig>;

    /// Create a config; the server assigns `id`, `callbackUrl` and timestamps
    async fn create(&self, request: &BotConfigRequest) -> Result<()>;

    /// Update the config identified by `request.id`
    async fn update(&self, request: &BotConfigRequest) -> Result<()>;

    /// Delete a config
    async fn delete(&self, id: i64) -> Result<()>;

    /// Ask the server for a fresh unique bot key
    async fn generate_key(&self) -> Result<String>;
}

/// HTTP implementation of [`BotConfigApi`]
#[derive(Clone, Debug)]
pub struct BotConfigClient {
    client: Client,
    base: Url,
}

impl BotConfigClient {
    /// Create a new client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ApiError::from)?;

        let base = resource_url(&config.base_url)?;

        Ok(Self { client, base })
    }

    /// Resource URL every request is built from
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segment: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Some(segment) = segment {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.push(segment);
            }
        }
        url
    }

    fn request(&self, method: Method, segment: Option<&str>) -> RequestBuilder {
        self.client.request(method, self.url(segment))
    }

    /// Send a request and unwrap the envelope, treating a null payload as `None`
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &str,
        target: Option<i64>,
        request: RequestBuilder,
    ) -> Result<Option<T>> {
        let started = Instant::now();
        let outcome = execute::<T>(request).await;
        logging::log_api_call(operation, target, started.elapsed(), outcome.is_ok());

        if let Err(ref e) = outcome {
            logging::log_api_error("wechat-bot", &e.to_string(), Some(operation));
        }

        Ok(outcome?)
    }

    /// Send a mutation whose payload is a success flag
    async fn send_flag(
        &self,
        operation: &str,
        target: Option<i64>,
        request: RequestBuilder,
    ) -> Result<()> {
        match self.send::<bool>(operation, target, request).await? {
            Some(true) => Ok(()),
            Some(false) => Err(ApiError::Rejected.into()),
            None => Err(ApiError::InvalidResponse(format!("{} returned no result", operation)).into()),
        }
    }
}

async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> std::result::Result<Option<T>, ApiError> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status: status.as_u16(), body });
    }

    let envelope: ApiEnvelope<T> = response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    if !envelope.is_success() {
        return Err(ApiError::Server {
            code: envelope.code,
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(envelope.data)
}

/// Join the backend origin with the resource path
fn resource_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    let prefix = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{}{}", prefix, RESOURCE_PATH));
    url.set_query(None);
    if url.cannot_be_a_base() {
        return Err(ConsoleError::Config(format!("API base URL cannot be a base: {}", base_url)));
    }
    Ok(url)
}

#[async_trait]
impl BotConfigApi for BotConfigClient {
    async fn page(&self, params: &PageParams) -> Result<PageResponse<BotConfig>> {
        debug!(current = params.current, size = params.size, keyword = ?params.keyword, "Listing bot configs");

        let request = self.request(Method::GET, Some("page")).query(params);
        self.send::<PageResponse<BotConfig>>("page", None, request)
            .await?
            .ok_or_else(|| ApiError::InvalidResponse("page returned no result".to_string()).into())
    }

    async fn get(&self, id: i64) -> Result<BotConfig> {
        let request = self.request(Method::GET, Some(&id.to_string()));
        self.send::<BotConfig>("get", Some(id), request)
            .await?
            .ok_or(ConsoleError::NotFound { id })
    }

    async fn create(&self, request: &BotConfigRequest) -> Result<()> {
        debug!(bot_key = %request.bot_key, "Creating bot config");

        let mut body = request.clone();
        body.id = None;
        let builder = self.request(Method::POST, None).json(&body);
        self.send_flag("create", None, builder).await
    }

    async fn update(&self, request: &BotConfigRequest) -> Result<()> {
        let id = request
            .id
            .ok_or_else(|| ConsoleError::InvalidInput("update requires an id".to_string()))?;
        debug!(id = id, bot_key = %request.bot_key, "Updating bot config");

        let builder = self.request(Method::PUT, None).json(request);
        self.send_flag("update", Some(id), builder).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let builder = self.request(Method::DELETE, Some(&id.to_string()));
        self.send_flag("delete", Some(id), builder).await
    }

    async fn generate_key(&self) -> Result<String> {
        let request = self.request(Method::GET, Some("generate-key"));
        self.send::<String>("generate-key", None, request)
            .await?
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("generate-key returned no key".to_string()).into())
    }
}
