//! The `grade` command: validate one artifact and print the outcome.

use std::path::Path;

use anyhow::Result;

use crate::cli::args::GradeFormat;
use crate::cli::output::{format_validation, Painter};
use crate::rubric::{validate, Rubric};

/// Grade a single YAML artifact; returns true when it passed.
pub fn execute(
    file: &Path,
    expected_source: Option<String>,
    min_benchmarks: Option<usize>,
    format: GradeFormat,
    no_color: bool,
) -> Result<bool> {
    let mut rubric = Rubric::default();
    if let Some(expected_source) = expected_source {
        rubric.expected_source = expected_source;
    }
    if let Some(min_benchmarks) = min_benchmarks {
        rubric.min_expected_benchmarks = min_benchmarks;
    }

    let result = validate(file, &rubric);

    match format {
        GradeFormat::Text => {
            let painter = Painter::new(!no_color);
            print!("{}", format_validation(&result, &rubric, &painter));
        }
        GradeFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(result.passed)
}
