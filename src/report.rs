//! Human-readable console output. Everything here goes to stdout; logging
//! goes to stderr through `env_logger`.

use std::collections::BTreeMap;

use crate::check::CheckError;
use crate::check::outcome::Outcomes;
use crate::http_probe::result::ProbeResult;

const RULE_WIDTH: usize = 60;

pub fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// `file_upload` -> `File Upload`
pub fn display_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn banner(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn section(title: &str) {
    println!("\n--- {title} ---");
}

pub fn print_result(result: &ProbeResult) {
    println!("{} {}", result.method, result.url);
    match (&result.status_code, &result.error) {
        (Some(status), _) => {
            println!(
                "Status Code: {status} ({:.2}ms)",
                result.elapsed_seconds * 1000.0
            );
            let body = result.body.render();
            if !body.is_empty() {
                println!("Response: {body}");
            }
        }
        (None, Some(error)) => println!("❌ Request failed: {error}"),
        (None, None) => println!("❌ No response"),
    }
}

/// One `name: value` line per header, indented under a heading.
pub fn format_headers(headers: &BTreeMap<String, String>) -> String {
    let mut out = String::from("Response Headers:");
    for (name, value) in headers {
        out.push_str(&format!("\n  {name}: {value}"));
    }
    out
}

pub fn print_headers(result: &ProbeResult) {
    if result.status_code.is_some() {
        println!("{}", format_headers(&result.headers));
    }
}

pub fn print_verdict(name: &str, verdict: &Result<(), CheckError>) {
    match verdict {
        Ok(()) => println!("✅ {}: PASS", display_name(name)),
        Err(e) => println!("❌ {}: FAIL: {e}", display_name(name)),
    }
}

pub fn print_summary(outcomes: &Outcomes) {
    banner("TEST SUMMARY");

    let width = outcomes
        .iter()
        .map(|o| display_name(&o.name).len())
        .max()
        .unwrap_or(10);

    for outcome in outcomes.iter() {
        let status = if outcome.passed { "✅ PASS" } else { "❌ FAIL" };
        println!("{}  {status}", to_fixed_width(&display_name(&outcome.name), width));
    }

    println!(
        "\nOverall: {}/{} tests passed",
        outcomes.passed(),
        outcomes.total()
    );
    if outcomes.all_passed() {
        println!("🎉 ALL TESTS PASSED!");
    } else {
        println!("⚠️  Some tests failed - check details above");
    }
}
