//! In-memory bot config service
//!
//! Implements `BotConfigApi` over a vector of records, records every call and
//! lets a test hold individual responses back until it releases them, so the
//! order in which background results arrive can be controlled.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;
use wechat_bot_console::models::{BotConfig, BotConfigRequest, PageParams, PageResponse};
use wechat_bot_console::services::BotConfigApi;
use wechat_bot_console::utils::errors::{ApiError, ConsoleError, Result};

use super::test_data::bot_config;

/// Operations of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Page,
    Get,
    Create,
    Update,
    Delete,
    GenerateKey,
}

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Page(PageParams),
    Get(i64),
    Create(BotConfigRequest),
    Update(BotConfigRequest),
    Delete(i64),
    GenerateKey,
}

impl ApiCall {
    pub fn operation(&self) -> Operation {
        match self {
            ApiCall::Page(_) => Operation::Page,
            ApiCall::Get(_) => Operation::Get,
            ApiCall::Create(_) => Operation::Create,
            ApiCall::Update(_) => Operation::Update,
            ApiCall::Delete(_) => Operation::Delete,
            ApiCall::GenerateKey => Operation::GenerateKey,
        }
    }
}

#[derive(Default)]
struct Inner {
    records: Vec<BotConfig>,
    next_id: i64,
    generated_key: String,
    calls: Vec<ApiCall>,
    failures: HashSet<Operation>,
    page_gates: HashMap<u64, oneshot::Receiver<()>>,
    key_gate: Option<(String, oneshot::Receiver<()>)>,
}

/// Scriptable in-memory implementation of the service
pub struct MockBotConfigApi {
    inner: Mutex<Inner>,
}

impl Default for MockBotConfigApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBotConfigApi {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                generated_key: "BOT-GENERATED".to_string(),
                ..Inner::default()
            }),
        }
    }

    /// Service pre-filled with records `1..=count`
    pub fn with_records(count: i64) -> Self {
        let api = Self::new();
        api.seed((1..=count).map(bot_config).collect());
        api
    }

    pub fn seed(&self, records: Vec<BotConfig>) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id = records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
        inner.records = records;
    }

    pub fn records(&self) -> Vec<BotConfig> {
        self.inner.lock().unwrap().records.clone()
    }

    pub fn set_generated_key(&self, key: &str) {
        self.inner.lock().unwrap().generated_key = key.to_string();
    }

    /// Make every call of `operation` fail with a server error
    pub fn fail(&self, operation: Operation) {
        self.inner.lock().unwrap().failures.insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.inner.lock().unwrap().failures.remove(&operation);
    }

    /// Hold the next listing of page `current` until the sender fires
    pub fn gate_page(&self, current: u64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().unwrap().page_gates.insert(current, rx);
        tx
    }

    /// Hold the next key generation until the sender fires
    ///
    /// The held request answers with `key` no matter what
    /// `set_generated_key` says by the time it is released.
    pub fn gate_generate_key(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().unwrap().key_gate = Some((key.to_string(), rx));
        tx
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.calls().iter().filter(|c| c.operation() == operation).count()
    }

    /// Every listing request, in call order
    pub fn page_calls(&self) -> Vec<PageParams> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Page(params) => Some(params),
                _ => None,
            })
            .collect()
    }

    /// Record a call and report whether it should fail
    fn begin(&self, call: ApiCall) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let operation = call.operation();
        inner.calls.push(call);
        if inner.failures.contains(&operation) {
            return Err(ApiError::Server {
                code: 500,
                message: format!("{:?} failed", operation),
            }
            .into());
        }
        Ok(())
    }
}

fn matches_keyword(record: &BotConfig, keyword: &str) -> bool {
    record.bot_key.contains(keyword) || record.corp_id.contains(keyword) || record.agent_id.contains(keyword)
}

#[async_trait]
impl BotConfigApi for MockBotConfigApi {
    async fn page(&self, params: &PageParams) -> Result<PageResponse<BotConfig>> {
        self.begin(ApiCall::Page(params.clone()))?;
        let gate = self.inner.lock().unwrap().page_gates.remove(&params.current);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let inner = self.inner.lock().unwrap();
        let matching: Vec<BotConfig> = inner
            .records
            .iter()
            .filter(|r| params.keyword.as_deref().map_or(true, |k| matches_keyword(r, k)))
            .cloned()
            .collect();
        let skip = ((params.current.max(1) - 1) * params.size) as usize;

        Ok(PageResponse {
            total: matching.len() as u64,
            records: matching.into_iter().skip(skip).take(params.size as usize).collect(),
            current: params.current,
            size: params.size,
        })
    }

    async fn get(&self, id: i64) -> Result<BotConfig> {
        self.begin(ApiCall::Get(id))?;
        self.inner
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
            .ok_or(ConsoleError::NotFound { id })
    }

    async fn create(&self, request: &BotConfigRequest) -> Result<()> {
        self.begin(ApiCall::Create(request.clone()))?;

        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.push(BotConfig {
            id: Some(id),
            bot_key: request.bot_key.clone(),
            corp_id: request.corp_id.clone(),
            agent_id: request.agent_id.clone(),
            token: request.token.clone(),
            encoding_aes_key: request.encoding_aes_key.clone(),
            agent_id_ref: request.agent_id_ref.clone(),
            callback_url: Some(format!("http://callback.example.com/{}", request.bot_key)),
            is_active: Some(request.is_active.unwrap_or(true)),
            create_time: None,
            update_time: None,
        });
        Ok(())
    }

    async fn update(&self, request: &BotConfigRequest) -> Result<()> {
        self.begin(ApiCall::Update(request.clone()))?;

        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id.is_some() && r.id == request.id)
            .ok_or(ApiError::Rejected)?;
        record.bot_key = request.bot_key.clone();
        record.corp_id = request.corp_id.clone();
        record.agent_id = request.agent_id.clone();
        record.token = request.token.clone();
        record.encoding_aes_key = request.encoding_aes_key.clone();
        record.agent_id_ref = request.agent_id_ref.clone();
        if request.is_active.is_some() {
            record.is_active = request.is_active;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.begin(ApiCall::Delete(id))?;

        let mut inner = self.inner.lock().unwrap();
        let before = inner.records.len();
        inner.records.retain(|r| r.id != Some(id));
        if inner.records.len() == before {
            return Err(ApiError::Rejected.into());
        }
        Ok(())
    }

    async fn generate_key(&self) -> Result<String> {
        self.begin(ApiCall::GenerateKey)?;
        let gated = {
            let mut inner = self.inner.lock().unwrap();
            match inner.key_gate.take() {
                Some(gate) => Err(gate),
                None => Ok(inner.generated_key.clone()),
            }
        };
        match gated {
            Ok(key) => Ok(key),
            Err((key, gate)) => {
                let _ = gate.await;
                Ok(key)
            }
        }
    }
}
