//! `manning audit`

use std::path::PathBuf;

use manning_recon::model::Demographics;
use manning_recon::{demographics, AuditResult, AuditStatus, BatchFailure, Period};
use serde::Serialize;
use tracing::info;

use crate::exit_codes::{EXIT_AUDIT_FAIL, EXIT_AUDIT_LOAD};
use crate::input::{self, Batch};
use crate::output;
use crate::util::{pad_left, pad_right, signed};
use crate::{CliError, Context};

#[derive(Serialize)]
struct PeriodReport<'a> {
    label: String,
    #[serde(flatten)]
    result: &'a AuditResult,
    demographics: Demographics,
}

#[derive(Serialize)]
struct AuditReport<'a> {
    periods: Vec<PeriodReport<'a>>,
    failures: &'a [BatchFailure],
    skipped: &'a [String],
}

fn build_report<'a>(ctx: &Context, batch: &'a Batch) -> AuditReport<'a> {
    let periods = Period::all()
        .filter_map(|p| batch.store.get(p))
        .map(|result| PeriodReport {
            label: ctx.period_label(result.period),
            result,
            demographics: demographics(result),
        })
        .collect();
    AuditReport {
        periods,
        failures: &batch.report.failures,
        skipped: &batch.skipped,
    }
}

fn print_table(report: &AuditReport<'_>) {
    println!(
        "{}  {}  {}  {}  {}  {}  STATUS",
        pad_right("PERIOD", 16),
        pad_right("FILE", 32),
        pad_left("EXPECTED", 8),
        pad_left("FOUND", 6),
        pad_left("DIFF", 5),
        pad_left("DUPS", 4),
    );
    for period in &report.periods {
        let r = period.result;
        println!(
            "{}  {}  {}  {}  {}  {}  {}",
            pad_right(&period.label, 16),
            pad_right(&r.file_name, 32),
            pad_left(&r.expected_count.to_string(), 8),
            pad_left(&r.calculated_count.to_string(), 6),
            pad_left(&signed(r.difference), 5),
            pad_left(&r.duplicates.len().to_string(), 4),
            r.status,
        );
        if r.status == AuditStatus::Fail {
            for v in r.job_variances.iter().filter(|v| v.variance != 0) {
                println!(
                    "    {} expected {}, found {} ({})",
                    v.location,
                    v.expected,
                    v.found,
                    signed(v.variance)
                );
            }
        }
    }
    for failure in report.failures {
        println!("{}  {}  LOAD FAILED", pad_right("-", 16), pad_right(&failure.file, 32));
    }
}

pub fn cmd_audit(
    ctx: &Context,
    files: Vec<PathBuf>,
    period: Option<u32>,
    config: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
    strict: bool,
) -> Result<(), CliError> {
    let config = input::audit_config(config.as_deref())?;
    let batch = input::load_batch(ctx, &files, period, &config)?;
    let report = build_report(ctx, &batch);

    if let Some(path) = &output {
        output::write_json(ctx, &report, path)?;
    } else if json {
        output::print_json(ctx, &report)?;
    } else {
        print_table(&report);
    }

    let failed = report
        .periods
        .iter()
        .filter(|p| p.result.status == AuditStatus::Fail)
        .count();
    let passed = report.periods.len() - failed;
    info!(
        passed,
        failed,
        load_failures = report.failures.len(),
        skipped = report.skipped.len(),
        "batch audited"
    );
    eprintln!(
        "{} period(s): {} pass, {} fail; {} load failure(s), {} skipped",
        report.periods.len(),
        passed,
        failed,
        report.failures.len(),
        report.skipped.len()
    );

    if strict {
        if !batch.report.is_clean() {
            return Err(CliError::new(
                EXIT_AUDIT_LOAD,
                format!("{} file(s) failed to load", batch.report.failures.len()),
            ));
        }
        if failed > 0 {
            return Err(CliError::new(
                EXIT_AUDIT_FAIL,
                format!("{failed} period(s) do not match their control totals"),
            ));
        }
    }
    Ok(())
}
