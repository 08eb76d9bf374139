//! Integration tests for olmo-eval.
//!
//! These tests exercise the rubric against crafted artifacts and the
//! batch runner against scripted agents.

pub mod rubric_tests;
