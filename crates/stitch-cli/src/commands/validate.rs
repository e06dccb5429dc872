//! Pattern validation command

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use stitch_check::{ConsistencyChecker, Diagnostic, Severity, ValidationReport};
use stitch_core::StructuralError;
use stitch_gen::StitchConfig;

/// Exit code for a pattern whose consistency check reported errors
const EXIT_INVALID: i32 = 1;
/// Exit code for a candidate that is not a pattern at all
const EXIT_STRUCTURAL: i32 = 2;

pub struct ValidateArgs {
    pub file: String,
    pub format: String,
    pub config: Option<String>,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let checker = ConsistencyChecker::new(config.check_config()?);

    let text = read_input(&args.file)?;
    let pattern = match stitch_schema::parse_str(&text) {
        Ok(pattern) => pattern,
        Err(err) => {
            if args.format == "json" {
                print_structural_json(&err)?;
            } else {
                print_structural_text(&args.file, &err);
            }
            std::process::exit(EXIT_STRUCTURAL);
        }
    };

    let report = checker.check(&pattern);

    if args.format == "json" {
        print_report_json(&report)?;
    } else {
        print_report_text(&pattern.title, &report);
    }

    if !report.is_valid() {
        std::process::exit(EXIT_INVALID);
    }

    Ok(())
}

pub(crate) fn load_config(path: Option<&str>) -> Result<StitchConfig> {
    match path {
        Some(path) => StitchConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path)),
        None => StitchConfig::load().context("Failed to load config"),
    }
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read pattern from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))
    }
}

fn print_structural_text(file: &str, err: &StructuralError) {
    println!("{}: not a valid pattern", file);
    println!();
    for issue in &err.issues {
        println!("  [ERROR] {}", issue);
    }
}

fn print_structural_json(err: &StructuralError) -> Result<()> {
    let output = serde_json::json!({
        "valid": false,
        "structural": true,
        "issues": err.issues,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_report_text(title: &str, report: &ValidationReport) {
    if report.diagnostics.is_empty() {
        println!("{}: all checks passed.", title);
        return;
    }

    println!("{}: {}", title, report.summary());
    println!();

    for diagnostic in &report.diagnostics {
        let severity_str = match diagnostic.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        println!("  [{}] {}", severity_str, diagnostic.message);
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    valid: bool,
    summary: String,
    errors: Vec<String>,
    warnings: Vec<String>,
    diagnostics: &'a [Diagnostic],
}

fn print_report_json(report: &ValidationReport) -> Result<()> {
    let result = report.to_result();
    let output = JsonReport {
        valid: result.valid,
        summary: report.summary(),
        errors: result.errors,
        warnings: result.warnings,
        diagnostics: &report.diagnostics,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
