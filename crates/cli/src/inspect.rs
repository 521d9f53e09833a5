//! `manning inspect`

use std::path::PathBuf;

use manning_recon::engine::SheetRole;
use manning_recon::{inspect_workbook, WorkbookReport};

use crate::input;
use crate::output;
use crate::util::{col_to_letter, pad_left, pad_right};
use crate::{CliError, Context};

fn role_label(role: SheetRole) -> &'static str {
    match role {
        SheetRole::Control => "control",
        SheetRole::Roster => "roster",
        SheetRole::Skipped => "skipped",
    }
}

fn print_report(report: &WorkbookReport) {
    println!("{}  {}  {}  COLUMNS", pad_right("SHEET", 24), pad_right("ROLE", 8), pad_left("HEADER", 6));
    for sheet in &report.sheets {
        let header = sheet
            .header_row
            .map(|r| (r + 1).to_string())
            .unwrap_or_else(|| "-".to_string());
        let columns: Vec<String> = sheet
            .columns
            .iter()
            .map(|c| format!("{}={}", c.field, col_to_letter(c.column)))
            .collect();
        println!(
            "{}  {}  {}  {}",
            pad_right(&sheet.name, 24),
            pad_right(role_label(sheet.role), 8),
            pad_left(&header, 6),
            columns.join(" ")
        );
    }

    let Some(control) = &report.control else {
        println!();
        println!("no control sheet found");
        return;
    };
    println!();
    println!(
        "CONTROL '{}' (header row {})",
        control.sheet_name,
        control.header_row + 1
    );
    for job in &report.control_table.expected {
        println!("  {}  {}", pad_right(&job.job, 32), pad_left(&job.expected.to_string(), 6));
    }
    match report.control_table.total {
        Some(total) => println!("  {}  {}", pad_right("TOTAL", 32), pad_left(&total.to_string(), 6)),
        None => println!("  (no TOTAL row)"),
    }
}

pub fn cmd_inspect(
    ctx: &Context,
    file: PathBuf,
    config: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let config = input::audit_config(config.as_deref())?;
    let workbook = manning_io::load(&file).map_err(CliError::load)?;
    let report = inspect_workbook(&workbook, &config);

    if json {
        output::print_json(ctx, &report)?;
    } else {
        print_report(&report);
    }

    let rosters = report
        .sheets
        .iter()
        .filter(|s| s.role == SheetRole::Roster)
        .count();
    eprintln!(
        "{}: {} sheet(s), {} roster, control {}",
        report.file_name,
        report.sheets.len(),
        rosters,
        report
            .control
            .as_ref()
            .map(|c| format!("'{}'", c.sheet_name))
            .unwrap_or_else(|| "not found".to_string())
    );
    Ok(())
}
