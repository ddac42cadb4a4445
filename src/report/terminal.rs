use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::form::FieldError;
use crate::models::{PlateCheck, PlateDetails, PlateFormat};
use crate::pass::{EntryPass, ScanPayload};

/// Render a colored report of plate checks.
pub fn render_checks(checks: &[PlateCheck], verbose: bool, quiet: bool) -> Result<()> {
    let total = checks.len();
    let valid_count = checks.iter().filter(|c| c.result.is_valid).count();
    let invalid_count = total - valid_count;

    if quiet {
        render_counts(total, valid_count);
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "plate-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Plates checked : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Valid       : {:>4}  {}", "✓".green(), valid_count, summarize_formats(checks))
    );
    println!(
        " │  {:<48} │",
        format!("{}  Invalid     : {:>4}", "✗".red(), invalid_count)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if invalid_count > 0 {
        println!(" {} Rejected plates:\n", "[INVALID]".red().bold());
        render_invalid_table(checks);
        println!();
    }

    if verbose && valid_count > 0 {
        println!(" {} Recognised plates:\n", "[VALID]".green().bold());
        render_valid_table(checks);
        println!();
    }

    Ok(())
}

/// Single summary line used by `--quiet`.
pub fn render_counts(total: usize, valid: usize) {
    println!(
        "Total: {}  Valid: {}  Invalid: {}",
        total,
        valid.to_string().green(),
        (total - valid).to_string().red(),
    );
}

fn render_invalid_table(checks: &[PlateCheck]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Input").add_attribute(Attribute::Bold),
            Cell::new("Error").add_attribute(Attribute::Bold),
        ]);

    for check in checks.iter().filter(|c| !c.result.is_valid) {
        table.add_row(vec![
            Cell::new(format!("{:?}", check.input)),
            Cell::new(check.result.error.as_deref().unwrap_or_default()).fg(Color::Red),
        ]);
    }

    println!("{}", table);
}

fn render_valid_table(checks: &[PlateCheck]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Input").add_attribute(Attribute::Bold),
            Cell::new("Format").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Vehicle").add_attribute(Attribute::Bold),
            Cell::new("Details").add_attribute(Attribute::Bold),
        ]);

    for check in checks {
        let Some(details) = &check.result.details else {
            continue;
        };
        let format = details.format();

        table.add_row(vec![
            Cell::new(&check.input),
            Cell::new(format.to_string())
                .fg(format_color(format))
                .set_alignment(CellAlignment::Center),
            Cell::new(format.label()),
            Cell::new(details.vehicle_type().to_string()),
            Cell::new(describe(details)),
        ]);
    }

    println!("{}", table);
}

fn format_color(format: PlateFormat) -> Color {
    match format {
        PlateFormat::New => Color::Green,
        PlateFormat::Old => Color::DarkGrey,
        PlateFormat::Eco => Color::Cyan,
        PlateFormat::Diplomatic => Color::Magenta,
        PlateFormat::Usfk => Color::Yellow,
        PlateFormat::Temporary => Color::Blue,
    }
}

/// One-line breakdown of the decoded sub-fields.
fn describe(details: &PlateDetails) -> String {
    match details {
        PlateDetails::New {
            region,
            number,
            use_code,
            serial_number,
            ..
        } => format!("region {} · class {} · use {} · serial {}", region, number, use_code, serial_number),
        PlateDetails::Old {
            use_code,
            class_number,
            serial_number,
            ..
        } => format!("use {} · class {} · serial {}", use_code, class_number, serial_number),
        PlateDetails::Eco {
            number,
            use_code,
            serial_number,
            ..
        }
        | PlateDetails::Temporary {
            number,
            use_code,
            serial_number,
            ..
        } => format!("class {} · use {} · serial {}", number, use_code, serial_number),
        PlateDetails::Diplomatic {
            diplomatic_type,
            number,
            ..
        } => format!("marker {} · number {}", diplomatic_type, number),
        PlateDetails::Usfk { .. } => String::new(),
    }
}

fn summarize_formats(checks: &[PlateCheck]) -> String {
    let summary: Vec<String> = PlateFormat::ALL
        .iter()
        .filter_map(|format| {
            let count = checks
                .iter()
                .filter(|c| c.result.format == Some(*format))
                .count();
            (count > 0).then(|| format!("{} ({})", format, count))
        })
        .take(3)
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}

/// Render the per-format pattern table.
pub fn render_patterns(patterns: &[(PlateFormat, &str)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Format").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Pattern").add_attribute(Attribute::Bold),
        ]);

    for (i, (format, pattern)) in patterns.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(format.to_string()).fg(format_color(*format)),
            Cell::new(format.label()),
            Cell::new(pattern),
        ]);
    }

    println!("{}", table);
}

/// Render the field errors of a rejected entry form.
pub fn render_form_errors(errors: &[FieldError]) {
    println!(" {} Entry form has {} problem(s):\n", "[INVALID]".red().bold(), errors.len());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Message").add_attribute(Attribute::Bold),
        ]);

    for error in errors {
        table.add_row(vec![
            Cell::new(error.field.to_string()),
            Cell::new(&error.message).fg(Color::Red),
        ]);
    }

    println!("{}\n", table);
}

/// Render an issued pass and the payload handed to the image encoder.
pub fn render_pass(pass: &EntryPass, payload: &ScanPayload, file_name: &str) -> Result<()> {
    println!("\n {} Entry pass issued\n", "[PASS]".green().bold());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![Cell::new("차량번호").add_attribute(Attribute::Bold), Cell::new(&pass.vehicle_number)]);
    table.add_row(vec![Cell::new("기사").add_attribute(Attribute::Bold), Cell::new(&pass.driver_name)]);
    table.add_row(vec![Cell::new("전화번호").add_attribute(Attribute::Bold), Cell::new(&pass.driver_phone)]);
    table.add_row(vec![
        Cell::new("구분").add_attribute(Attribute::Bold),
        Cell::new(pass.entry_exit_type.to_string()),
    ]);
    table.add_row(vec![Cell::new("생성시간").add_attribute(Attribute::Bold), Cell::new(&pass.timestamp)]);
    table.add_row(vec![Cell::new("ID").add_attribute(Attribute::Bold), Cell::new(&pass.id)]);

    println!("{}\n", table);
    println!(" {} {}", "Payload:".bold(), payload.to_text()?);
    println!(" {} {}\n", "Image file:".bold(), file_name);

    Ok(())
}
