//! Batch driver: load, audit and store a sequence of (file, period) jobs.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::config::AuditConfig;
use crate::engine::audit_workbook;
use crate::error::ReconError;
use crate::grid::Workbook;
use crate::model::{AuditStatus, Period};
use crate::store::AuditStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub path: PathBuf,
    pub period: Period,
}

impl BatchJob {
    pub fn new(path: impl Into<PathBuf>, period: Period) -> Self {
        Self {
            path: path.into(),
            period,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedPeriod {
    pub file: String,
    pub period: Period,
    pub status: AuditStatus,
    pub employees: usize,
    /// An earlier file in this batch (or a previous batch) held this period.
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub file: String,
    pub period: Period,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub loaded: Vec<LoadedPeriod>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run every job in submission order. A job that fails to load is recorded
/// and logged; the rest of the batch still runs.
pub fn run_batch<F, E>(
    store: &mut AuditStore,
    jobs: &[BatchJob],
    config: &AuditConfig,
    mut loader: F,
) -> BatchReport
where
    F: FnMut(&Path) -> Result<Workbook, E>,
    E: Display,
{
    let mut report = BatchReport::default();

    for job in jobs {
        let file = display_name(&job.path);
        let workbook = match loader(&job.path) {
            Ok(wb) => wb,
            Err(e) => {
                let err = ReconError::Load {
                    file: file.clone(),
                    message: e.to_string(),
                };
                error!(period = %job.period, "{err}");
                report.failures.push(BatchFailure {
                    file,
                    period: job.period,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let result = audit_workbook(&workbook, job.period, config);
        let status = result.status;
        let employees = result.employees.len();
        let replaced = store.replace(result).is_some();
        report.loaded.push(LoadedPeriod {
            file,
            period: job.period,
            status,
            employees,
            replaced,
        });
    }

    info!(
        loaded = report.loaded.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SheetGrid;

    fn roster(names: &[&str]) -> Workbook {
        let mut rows = vec![vec!["Name (Eng)".to_string(), "Emp#".to_string()]];
        for (i, name) in names.iter().enumerate() {
            rows.push(vec![name.to_string(), format!("{}", 1000 + i)]);
        }
        Workbook::new("ignored.xlsx", vec![SheetGrid::new("Site", rows)])
    }

    #[test]
    fn failures_are_isolated() {
        let jobs = vec![
            BatchJob::new("jan.xlsx", Period::new(1).unwrap()),
            BatchJob::new("broken.xlsx", Period::new(2).unwrap()),
            BatchJob::new("mar.xlsx", Period::new(3).unwrap()),
        ];
        let mut store = AuditStore::new();
        let report = run_batch(&mut store, &jobs, &AuditConfig::default(), |path| {
            if path.ends_with("broken.xlsx") {
                Err("zip archive is corrupt")
            } else {
                Ok(roster(&["ALI", "OMAR"]))
            }
        });

        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "broken.xlsx");
        assert!(report.failures[0].message.contains("zip archive is corrupt"));
        assert!(!report.is_clean());
        assert!(store.is_populated(Period::new(1).unwrap()));
        assert!(!store.is_populated(Period::new(2).unwrap()));
        assert_eq!(store.get(Period::new(3).unwrap()).unwrap().employees.len(), 2);
    }

    #[test]
    fn same_period_twice_last_wins() {
        let period = Period::new(4).unwrap();
        let jobs = vec![BatchJob::new("a.xlsx", period), BatchJob::new("b.xlsx", period)];
        let mut calls = 0;
        let mut store = AuditStore::new();
        let report = run_batch(&mut store, &jobs, &AuditConfig::default(), |_| {
            calls += 1;
            if calls == 1 {
                Ok::<_, String>(roster(&["ALI"]))
            } else {
                Ok(roster(&["ALI", "OMAR", "SAM"]))
            }
        });
        assert!(!report.loaded[0].replaced);
        assert!(report.loaded[1].replaced);
        assert_eq!(store.get(period).unwrap().employees.len(), 3);
    }
}
