//! Summary views computed from audit results. Pure; never stored.

use std::collections::{HashMap, HashSet};

use crate::model::{AuditResult, Demographics, Employee, Gender, Tally, YearlyRow};
use crate::store::AuditStore;

const OTHER_NATIONALITY: &str = "Other";
const UNASSIGNED_JOB: &str = "Unassigned";

/// Count by key, sorted by count descending then name.
fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<Tally> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut out: Vec<Tally> = counts
        .into_iter()
        .map(|(name, count)| Tally {
            name: name.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

pub fn demographics(result: &AuditResult) -> Demographics {
    let staff = &result.employees;
    Demographics {
        period: result.period,
        headcount: staff.len(),
        nationalities: tally(staff.iter().map(|e| or_default(&e.nationality, OTHER_NATIONALITY))),
        genders: tally(staff.iter().map(|e| match e.gender {
            Gender::Female => "Female",
            Gender::Male => "Male",
        })),
        jobs: tally(staff.iter().map(|e| or_default(&e.job_title, UNASSIGNED_JOB))),
    }
}

fn identifiers(result: &AuditResult) -> HashSet<String> {
    result.employees.iter().map(Employee::identifier).collect()
}

/// One row per populated period, in calendar order.
pub fn yearly_stats(store: &AuditStore) -> Vec<YearlyRow> {
    let mut rows = Vec::with_capacity(store.len());
    let mut previous: Option<(&AuditResult, HashSet<String>)> = None;

    for result in store.populated() {
        let ids = identifiers(result);
        let headcount = result.employees.len();

        let row = match &previous {
            Some((prev, prev_ids)) => {
                let last = prev.employees.len();
                YearlyRow {
                    period: result.period,
                    headcount,
                    variance: if last == 0 {
                        0
                    } else {
                        headcount as i64 - last as i64
                    },
                    joiners: ids.difference(prev_ids).count(),
                    leavers: prev_ids.difference(&ids).count(),
                }
            }
            None => YearlyRow {
                period: result.period,
                headcount,
                variance: 0,
                joiners: 0,
                leavers: 0,
            },
        };
        rows.push(row);
        previous = Some((result, ids));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{employee, result};

    #[test]
    fn demographics_counts_sorted() {
        let mut a = employee(1, "A", "1", "HQ");
        a.nationality = "Egypt".into();
        let mut b = employee(1, "B", "2", "HQ");
        b.nationality = "India".into();
        b.gender = Gender::Female;
        b.job_title = String::new();
        let mut c = employee(1, "C", "3", "HQ");
        c.nationality = "India".into();
        let mut d = employee(1, "D", "4", "HQ");
        d.nationality = " ".into();

        let demo = demographics(&result(1, vec![a, b, c, d]));
        assert_eq!(demo.headcount, 4);
        assert_eq!(demo.nationalities[0], Tally { name: "India".into(), count: 2 });
        assert_eq!(demo.nationalities[1].name, "Egypt");
        assert_eq!(demo.nationalities[2].name, "Other");
        assert_eq!(demo.genders[0], Tally { name: "Male".into(), count: 3 });
        assert_eq!(demo.jobs[0], Tally { name: "CLEANER".into(), count: 3 });
        assert_eq!(demo.jobs[1], Tally { name: "Unassigned".into(), count: 1 });
    }

    #[test]
    fn yearly_rows_track_predecessor() {
        let mut store = AuditStore::new();
        store.replace(result(1, Vec::new()));
        store.replace(result(
            2,
            vec![employee(2, "A", "1", "HQ"), employee(2, "B", "2", "HQ")],
        ));
        store.replace(result(
            5,
            vec![employee(5, "B", "2", "HQ"), employee(5, "C", "3", "HQ"), employee(5, "D", "4", "HQ")],
        ));

        let rows = yearly_stats(&store);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].headcount, rows[0].variance), (0, 0));
        // Previous headcount was zero, so no variance is reported.
        assert_eq!((rows[1].headcount, rows[1].variance, rows[1].joiners), (2, 0, 2));
        assert_eq!(rows[2].period.number(), 5);
        assert_eq!(rows[2].variance, 1);
        assert_eq!(rows[2].joiners, 2);
        assert_eq!(rows[2].leavers, 1);
    }
}
