//! Paging and response envelope models

use serde::{Deserialize, Serialize};

/// Query of the paged listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub current: u64,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl PageParams {
    /// Build params, dropping a blank keyword
    pub fn new(current: u64, size: u64, keyword: &str) -> Self {
        let keyword = keyword.trim();
        Self {
            current,
            size,
            keyword: if keyword.is_empty() {
                None
            } else {
                Some(keyword.to_string())
            },
        }
    }
}

/// One page of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    pub total: u64,
    pub current: u64,
    pub size: u64,
}

/// Envelope wrapping every payload returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Code the backend uses for success
    pub const SUCCESS: i64 = 0;

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}
