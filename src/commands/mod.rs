//! Command handlers for olmo-eval
//!
//! - `run`: execute a batch of evaluation runs end to end
//! - `grade`: validate a single YAML artifact against the rubric
//! - `regrade`: re-validate recorded runs with the current rubric
//! - `summarize`: rebuild a results CSV by walking a runs folder

pub mod grade;
pub mod regrade;
pub mod run;
pub mod summarize;
