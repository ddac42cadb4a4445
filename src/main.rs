//! `plate-checkr` — validate Korean license plates and build vehicle entry/exit passes.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Compile the plate patterns once ([`plate::validator::PlateValidator`]).
//! 4. `check`: validate every plate and render the report ([`report`]).
//!    `pass`: validate the entry form ([`form`]), then build the scan payload
//!    and display record ([`pass`]).
//!    `patterns`: list the per-format patterns.
//! 5. Exit `0` (clean) or `1` (any plate or form field rejected).

mod cli;
mod config;
mod form;
mod models;
mod pass;
mod plate;
mod report;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Command, ReportFormat};
use config::{load_config, Config};
use form::{validate_form, EntryForm};
use models::PlateCheck;
use plate::validator::PlateValidator;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let validator = PlateValidator::new()?;

    let ok = match &cli.command {
        Command::Check { plates, file } => {
            run_check(&cli, &validator, plates, file.as_deref())?
        }
        Command::Pass {
            plate,
            name,
            phone,
            direction,
            agree,
        } => {
            let entry = EntryForm {
                vehicle_number: plate.clone(),
                driver_name: name.clone(),
                driver_phone: phone.clone(),
                direction: direction.map(Into::into),
                privacy_consent: *agree,
            };
            run_pass(&cli, &config, &validator, &entry)?
        }
        Command::Patterns => {
            report::terminal::render_patterns(&validator.patterns());
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

/// Validate plates from the command line and `--file`. Returns `false` if any is rejected.
fn run_check(
    cli: &Cli,
    validator: &PlateValidator,
    plates: &[String],
    file: Option<&Path>,
) -> Result<bool> {
    let mut inputs: Vec<String> = plates.to_vec();

    if let Some(path) = file {
        let content = std::fs::read_to_string(path)?;
        let from_file: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(String::from)
            .collect();

        if !cli.quiet {
            eprintln!(
                "  {} {} {} plates",
                "→".cyan(),
                path.display(),
                from_file.len()
            );
        }
        inputs.extend(from_file);
    }

    if inputs.is_empty() {
        eprintln!("No plate numbers given; pass them as arguments or with --file");
        return Ok(false);
    }

    // Pass/fail counts are all a quiet terminal run prints; skip decoding.
    if cli.quiet && matches!(cli.report, ReportFormat::Terminal) {
        let total = inputs.len();
        let valid = inputs.iter().filter(|i| validator.is_valid(i)).count();
        report::terminal::render_counts(total, valid);
        return Ok(valid == total);
    }

    let pb = if file.is_some() && !cli.quiet {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut checks = Vec::with_capacity(inputs.len());
    for input in inputs {
        let result = validator.validate(&input);
        checks.push(PlateCheck { input, result });
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render_checks(&checks, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&checks)?);
        }
    }

    Ok(checks.iter().all(|c| c.result.is_valid))
}

/// Validate an entry form and issue its pass. Returns `false` if the form is rejected.
fn run_pass(
    cli: &Cli,
    config: &Config,
    validator: &PlateValidator,
    entry: &EntryForm,
) -> Result<bool> {
    let valid = match validate_form(entry, validator, &config.form) {
        Ok(valid) => valid,
        Err(errors) => {
            match cli.report {
                ReportFormat::Terminal => report::terminal::render_form_errors(&errors),
                ReportFormat::Json => {
                    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({ "errors": messages }))?
                    );
                }
            }
            return Ok(false);
        }
    };

    let payload = pass::build_payload(&valid, &config.site);
    let issued = pass::issue_pass(&valid, &config.site, chrono::Utc::now());
    let file_name = pass::download_file_name(&issued, &config.site);

    if !cli.quiet {
        eprintln!(
            "  {} {} {}",
            "→".cyan(),
            valid.plate.format(),
            valid.plate.vehicle_type()
        );
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render_pass(&issued, &payload, &file_name)?,
        ReportFormat::Json => {
            let output = serde_json::json!({
                "pass": issued,
                "payload": payload.to_text()?,
                "fileName": file_name,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(true)
}
