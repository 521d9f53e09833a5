//! Turning command-line file lists into a populated audit store.

use std::fs;
use std::path::{Path, PathBuf};

use manning_recon::{run_batch, AuditConfig, AuditStore, BatchJob, BatchReport, Period};
use tracing::{debug, warn};

use crate::exit_codes::EXIT_AUDIT_NO_INPUT;
use crate::{CliError, Context};

/// Everything a batch of files produced.
pub struct Batch {
    pub store: AuditStore,
    pub report: BatchReport,
    /// Files left out because no period could be assigned.
    pub skipped: Vec<String>,
}

pub fn audit_config(path: Option<&Path>) -> Result<AuditConfig, CliError> {
    let Some(path) = path else {
        return Ok(AuditConfig::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read {}: {}", path.display(), e)))?;
    AuditConfig::from_toml(&text)
        .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
}

pub fn parse_period(number: u32) -> Result<Period, CliError> {
    Period::new(number).map_err(|e| CliError::usage(e.to_string()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Pair each file with a period: the explicit one, or whatever the calendar
/// reads from its name.
pub fn plan_jobs(
    ctx: &Context,
    files: &[PathBuf],
    explicit: Option<u32>,
) -> Result<(Vec<BatchJob>, Vec<String>), CliError> {
    if let Some(number) = explicit {
        if files.len() != 1 {
            return Err(CliError::usage("--period can only be used with a single file")
                .with_hint("name each file after its month so periods are detected"));
        }
        let period = parse_period(number)?;
        return Ok((vec![BatchJob::new(&files[0], period)], Vec::new()));
    }

    let mut jobs = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for path in files {
        let name = file_name(path);
        let detected = ctx
            .calendar
            .detect_period(&name)
            .and_then(|n| Period::new(n as u32).ok());
        match detected {
            Some(period) => {
                debug!(file = %name, %period, "period detected");
                jobs.push(BatchJob::new(path, period));
            }
            None => {
                warn!("skipping {name}: no month and year in file name");
                skipped.push(name);
            }
        }
    }
    Ok((jobs, skipped))
}

/// Load and audit every file. Fails only when nothing at all could be loaded.
pub fn load_batch(
    ctx: &Context,
    files: &[PathBuf],
    explicit: Option<u32>,
    config: &AuditConfig,
) -> Result<Batch, CliError> {
    let (jobs, skipped) = plan_jobs(ctx, files, explicit)?;
    if jobs.is_empty() {
        return Err(CliError::new(
            EXIT_AUDIT_NO_INPUT,
            "no input file could be assigned a period",
        )
        .with_hint(format!(
            "include the month and year in the file name (e.g. 'Manning March {}.xlsx') or pass --period",
            ctx.calendar.start_year
        )));
    }

    let mut store = AuditStore::new();
    let report = run_batch(&mut store, &jobs, config, manning_io::load);

    if report.loaded.is_empty() {
        let first = report
            .failures
            .first()
            .map(|f| f.message.clone())
            .unwrap_or_default();
        return Err(CliError::new(EXIT_AUDIT_NO_INPUT, "no workbook could be loaded")
            .with_hint(first));
    }
    for loaded in report.loaded.iter().filter(|l| l.replaced) {
        warn!(
            "{} replaced an earlier file for {}",
            loaded.file,
            ctx.period_label(loaded.period)
        );
    }

    Ok(Batch { store, report, skipped })
}
