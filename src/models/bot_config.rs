//! Bot config model

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One registered WeChat-Work bot integration, as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub bot_key: String,
    pub corp_id: String,
    pub agent_id: String,
    pub token: String,
    pub encoding_aes_key: String,
    pub agent_id_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<Timestamp>,
}

/// Body of a create or update call
///
/// Server-computed fields (`callbackUrl`, timestamps) are never sent. `id` is
/// present only for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfigRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub bot_key: String,
    pub corp_id: String,
    pub agent_id: String,
    pub token: String,
    pub encoding_aes_key: String,
    pub agent_id_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl BotConfigRequest {
    /// Attach the id of the record being updated
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Server timestamp
///
/// The backend serializes `LocalDateTime` without an offset. Values that do
/// not parse are kept verbatim so a single odd row never breaks the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Parsed(NaiveDateTime),
    Raw(String),
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

impl Timestamp {
    pub fn parse(value: &str) -> Self {
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(Timestamp::Parsed)
            .unwrap_or_else(|| Timestamp::Raw(value.to_string()))
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Parsed(dt) => Some(*dt),
            Timestamp::Raw(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Parsed(dt) => write!(f, "{}", crate::utils::helpers::format_timestamp(*dt)),
            Timestamp::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::Parsed(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            Timestamp::Raw(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Timestamp::parse(&raw))
    }
}
