//! Test utilities shared across the ghrest workspace
//!
//! This crate provides common testing infrastructure including:
//! - A wiremock server usable from blocking tests ([`MockGitHub`])
//! - Canned GitHub payloads ([`fixtures`])
//! - Field preservation checks for re-serialized entities
//!   ([`assert_fields_preserved`])
//! - An isolated home/config directory ([`TestHome`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod fixtures;
pub mod home;
pub mod json;
pub mod mock;

// Re-export commonly used items
pub use home::TestHome;
pub use json::assert_fields_preserved;
pub use mock::MockGitHub;
