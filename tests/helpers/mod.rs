//! Test helpers module
//!
//! This module provides utilities and helpers for testing the console.
//! It includes a wiremock-backed service, an in-memory service and test
//! context setup.

#![allow(dead_code)]

pub mod bot_config_mock;
pub mod mock_api;
pub mod test_context;

pub use bot_config_mock::*;
pub use mock_api::*;
pub use test_context::*;
pub use test_data::*;
