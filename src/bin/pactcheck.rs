//! Reads a test-case JSON file of the shape `{comment, match, actual,
//! expected}`, runs the appropriate checker, and prints OK/Failed.

use anyhow::{bail, Context};
use clap::Parser;
use pact_contract_core::{compare_requests, compare_responses};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pactcheck", about = "Run a contract test-case file against the comparator core")]
struct Args {
    /// Path to a test-case JSON file: {comment, match, actual, expected}.
    file: PathBuf,

    /// Compare as a response instead of a request.
    #[arg(long)]
    response: bool,
}

#[derive(serde::Deserialize)]
struct TestCase {
    comment: String,
    #[serde(rename = "match")]
    expect_match: bool,
    actual: Value,
    expected: Value,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading test case file {}", args.file.display()))?;
    let case: TestCase = serde_json::from_str(&text)
        .with_context(|| format!("parsing test case file {}", args.file.display()))?;

    let lines: Vec<String> = if args.response {
        compare_responses(case.actual, case.expected).collect()
    } else {
        compare_requests(case.actual, case.expected).collect()
    };

    let matched = lines.is_empty();
    if matched == case.expect_match {
        println!("OK: {}", case.comment);
        Ok(())
    } else {
        println!("Failed: {}", case.comment);
        for line in &lines {
            print!("{line}");
        }
        bail!("test case disagreed with its expected verdict")
    }
}
