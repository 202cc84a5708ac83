//! Integration tests for Rank-Lens
//!
//! These tests use wiremock to stand up mock HTTP servers and exercise the
//! fetcher and batch orchestrator end-to-end.

mod batch_tests;
mod common;
mod fetch_tests;
