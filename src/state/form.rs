//! Create/edit form state
//!
//! Holds the values typed into the modal and turns them into a request body
//! once every required field is filled in.

use std::fmt;

use crate::models::{BotConfig, BotConfigRequest};
use crate::utils::errors::{ConsoleError, FieldError, Result};

/// Fields of the bot config form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    BotKey,
    CorpId,
    AgentId,
    Token,
    EncodingAesKey,
    AgentIdRef,
    IsActive,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::BotKey,
        FormField::CorpId,
        FormField::AgentId,
        FormField::Token,
        FormField::EncodingAesKey,
        FormField::AgentIdRef,
        FormField::IsActive,
    ];

    /// Fields that must be non-empty before submit
    pub const REQUIRED: [FormField; 6] = [
        FormField::BotKey,
        FormField::CorpId,
        FormField::AgentId,
        FormField::Token,
        FormField::EncodingAesKey,
        FormField::AgentIdRef,
    ];

    /// Name used on the wire and accepted by `set`
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::BotKey => "botKey",
            FormField::CorpId => "corpId",
            FormField::AgentId => "agentId",
            FormField::Token => "token",
            FormField::EncodingAesKey => "encodingAesKey",
            FormField::AgentIdRef => "agentIdRef",
            FormField::IsActive => "isActive",
        }
    }

    /// Translation key prefix of the field's label, placeholder and message
    pub fn translation_key(self) -> &'static str {
        match self {
            FormField::BotKey => "form.bot_key",
            FormField::CorpId => "form.corp_id",
            FormField::AgentId => "form.agent_id",
            FormField::Token => "form.token",
            FormField::EncodingAesKey => "form.encoding_aes_key",
            FormField::AgentIdRef => "form.agent_id_ref",
            FormField::IsActive => "form.is_active",
        }
    }

    fn required_message_key(self) -> &'static str {
        match self {
            FormField::BotKey => "form.bot_key.required",
            FormField::CorpId => "form.corp_id.required",
            FormField::AgentId => "form.agent_id.required",
            FormField::Token => "form.token.required",
            FormField::EncodingAesKey => "form.encoding_aes_key.required",
            FormField::AgentIdRef => "form.agent_id_ref.required",
            FormField::IsActive => "form.is_active.label",
        }
    }

    /// Whether the value is masked when rendered
    pub fn is_secret(self) -> bool {
        matches!(self, FormField::Token | FormField::EncodingAesKey)
    }

    /// Parse a field name as typed by the user (`botKey`, `bot_key`, `bot-key`)
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        FormField::ALL
            .into_iter()
            .find(|field| field.wire_name().to_lowercase() == normalized)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Values currently entered in the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotConfigForm {
    pub bot_key: String,
    pub corp_id: String,
    pub agent_id: String,
    pub token: String,
    pub encoding_aes_key: String,
    pub agent_id_ref: String,
    /// `None` until the switch is touched; the server then applies its default
    pub is_active: Option<bool>,
}

impl BotConfigForm {
    /// Pre-fill every field from an existing record
    pub fn from_record(record: &BotConfig) -> Self {
        Self {
            bot_key: record.bot_key.clone(),
            corp_id: record.corp_id.clone(),
            agent_id: record.agent_id.clone(),
            token: record.token.clone(),
            encoding_aes_key: record.encoding_aes_key.clone(),
            agent_id_ref: record.agent_id_ref.clone(),
            is_active: record.is_active,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Text value of a field; `IsActive` has no text value
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::BotKey => Some(&self.bot_key),
            FormField::CorpId => Some(&self.corp_id),
            FormField::AgentId => Some(&self.agent_id),
            FormField::Token => Some(&self.token),
            FormField::EncodingAesKey => Some(&self.encoding_aes_key),
            FormField::AgentIdRef => Some(&self.agent_id_ref),
            FormField::IsActive => None,
        }
    }

    /// Set a field from user input
    pub fn set(&mut self, field: FormField, value: &str) -> Result<()> {
        let slot = match field {
            FormField::BotKey => &mut self.bot_key,
            FormField::CorpId => &mut self.corp_id,
            FormField::AgentId => &mut self.agent_id,
            FormField::Token => &mut self.token,
            FormField::EncodingAesKey => &mut self.encoding_aes_key,
            FormField::AgentIdRef => &mut self.agent_id_ref,
            FormField::IsActive => {
                self.is_active = Some(parse_switch(value)?);
                return Ok(());
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Flip the enabled switch; an untouched switch counts as off
    pub fn toggle_active(&mut self) -> bool {
        let next = !self.is_active.unwrap_or(false);
        self.is_active = Some(next);
        next
    }

    /// Required fields that are empty, in display order
    pub fn missing_fields(&self) -> Vec<FieldError> {
        FormField::REQUIRED
            .into_iter()
            .filter(|field| self.text(*field).map_or(true, |v| v.trim().is_empty()))
            .map(|field| FieldError {
                field: field.wire_name(),
                message_key: field.required_message_key(),
            })
            .collect()
    }

    /// Validate and build the request body
    pub fn validate(&self) -> Result<BotConfigRequest> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ConsoleError::Validation(missing));
        }

        Ok(BotConfigRequest {
            id: None,
            bot_key: self.bot_key.trim().to_string(),
            corp_id: self.corp_id.trim().to_string(),
            agent_id: self.agent_id.trim().to_string(),
            token: self.token.trim().to_string(),
            encoding_aes_key: self.encoding_aes_key.trim().to_string(),
            agent_id_ref: self.agent_id_ref.trim().to_string(),
            is_active: self.is_active,
        })
    }
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" | "启用" => Ok(true),
        "false" | "off" | "no" | "0" | "禁用" => Ok(false),
        other => Err(ConsoleError::InvalidInput(format!("not a switch value: {}", other))),
    }
}
