//! Integration tests for Robots-Lens
//!
//! These tests use wiremock to stand in for remote sites and exercise the
//! operations end-to-end.

mod analyze_tests;
mod evaluate_tests;
