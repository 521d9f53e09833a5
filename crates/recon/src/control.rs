use crate::mapper::ControlTable;
use crate::model::{AuditStatus, JobCount, JobVariance};

/// Verdict of roster size against the control figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlVerdict {
    pub expected_count: i64,
    pub difference: i64,
    pub status: AuditStatus,
    pub variances: Vec<JobVariance>,
}

/// The headcount the roster must hit: the TOTAL row when positive,
/// otherwise the sum of per-job expectations.
pub fn final_target(table: &ControlTable) -> i64 {
    match table.total {
        Some(total) if total > 0 => total,
        _ => table.expected_sum(),
    }
}

/// Compare a deduplicated roster against the control table.
///
/// Only jobs declared on the control sheet get a variance entry. Jobs that
/// appear solely in the roster are visible through the roster job counts
/// but are not reported as variances.
pub fn reconcile(table: &ControlTable, roster_size: usize, job_counts: &[JobCount]) -> ControlVerdict {
    let expected_count = final_target(table);
    let roster_size = roster_size as i64;
    let difference = roster_size - expected_count;
    let status = if difference == 0 {
        AuditStatus::Pass
    } else {
        AuditStatus::Fail
    };

    let variances = table
        .expected
        .iter()
        .map(|e| {
            let found = job_counts
                .iter()
                .find(|c| c.job == e.job)
                .map(|c| c.count as i64)
                .unwrap_or(0);
            JobVariance {
                location: e.job.clone(),
                expected: e.expected,
                found,
                variance: found - e.expected,
            }
        })
        .collect();

    ControlVerdict {
        expected_count,
        difference,
        status,
        variances,
    }
}
