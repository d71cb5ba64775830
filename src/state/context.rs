//! List view context
//!
//! This module tracks what the table currently shows: pagination, the search
//! keyword, the records of the current page and the bookkeeping that keeps
//! out-of-order list responses from overwriting newer ones.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{BotConfig, PageParams, PageResponse};
use crate::utils::errors::{ConsoleError, Result};
use crate::utils::helpers::total_pages;

/// Sequence number attached to each list request
pub type RequestSeq = u64;

/// A list request that has been issued and not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTicket {
    pub seq: RequestSeq,
    pub params: PageParams,
}

/// What happened to a list response handed to the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer request has been issued since this one
    Stale { latest: RequestSeq },
}

/// State of the list view
#[derive(Debug, Clone)]
pub struct PageContext {
    /// 1-based page number
    pub current: u64,
    pub page_size: u64,
    pub total: u64,
    pub keyword: String,
    pub records: Vec<BotConfig>,
    /// When the displayed records were last replaced
    pub loaded_at: Option<DateTime<Utc>>,
    latest_seq: RequestSeq,
    in_flight: usize,
}

impl PageContext {
    pub fn new(page_size: u64) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            total: 0,
            keyword: String::new(),
            records: Vec::new(),
            loaded_at: None,
            latest_seq: 0,
            in_flight: 0,
        }
    }

    /// Params for the page the user is looking at
    pub fn params(&self) -> PageParams {
        PageParams::new(self.current, self.page_size, &self.keyword)
    }

    /// Register a new list request; it supersedes every earlier one
    pub fn issue(&mut self) -> ListTicket {
        self.latest_seq += 1;
        self.in_flight += 1;
        ListTicket {
            seq: self.latest_seq,
            params: self.params(),
        }
    }

    /// Mark a request as answered, whatever the outcome
    pub fn complete(&mut self, _seq: RequestSeq) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_latest(&self, seq: RequestSeq) -> bool {
        seq == self.latest_seq
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.latest_seq
    }

    /// Replace records and total if `seq` is the latest request
    pub fn apply(&mut self, seq: RequestSeq, page: PageResponse<BotConfig>) -> ApplyOutcome {
        if !self.is_latest(seq) {
            return ApplyOutcome::Stale { latest: self.latest_seq };
        }

        self.records = page.records;
        self.total = page.total;
        self.loaded_at = Some(Utc::now());
        ApplyOutcome::Applied
    }

    /// Whether any list request is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Move to another page
    ///
    /// Once a page has been loaded the target is clamped to the last page.
    pub fn go_to(&mut self, page: u64) -> Result<()> {
        if page == 0 {
            return Err(ConsoleError::InvalidInput("page numbers start at 1".to_string()));
        }
        self.current = match self.loaded_at {
            Some(_) => page.min(self.total_pages().max(1)),
            None => page,
        };
        Ok(())
    }

    /// Change the page size, keeping the current page within range
    pub fn resize(&mut self, page_size: u64) -> Result<()> {
        if page_size == 0 {
            return Err(ConsoleError::InvalidInput("page size must be greater than 0".to_string()));
        }
        self.page_size = page_size;
        let last = total_pages(self.total, page_size).max(1);
        if self.current > last {
            self.current = last;
        }
        Ok(())
    }

    /// Set the keyword and go back to the first page
    pub fn search(&mut self, keyword: &str) {
        self.keyword = keyword.trim().to_string();
        self.current = 1;
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.page_size)
    }

    /// Look up a record on the current page
    pub fn find(&self, id: i64) -> Option<&BotConfig> {
        self.records.iter().find(|r| r.id == Some(id))
    }

    /// Create a summary of the context for logging
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            current: self.current,
            page_size: self.page_size,
            total: self.total,
            keyword: self.keyword.clone(),
            row_count: self.records.len(),
            latest_seq: self.latest_seq,
            in_flight: self.in_flight,
            loaded_at: self.loaded_at,
        }
    }
}

/// Context summary for logging and debugging
#[derive(Debug, Clone, Serialize)]
pub struct ContextSummary {
    pub current: u64,
    pub page_size: u64,
    pub total: u64,
    pub keyword: String,
    pub row_count: usize,
    pub latest_seq: RequestSeq,
    pub in_flight: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}
