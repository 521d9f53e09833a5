//! Canonical identifiers and cross-sheet deduplication.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::model::{DuplicateEntry, Employee, JobCount};
use crate::rules::BADGE_PLACEHOLDER;

/// Normalize a raw key: whitespace removed, uppercased, leading zeros
/// stripped. An all-zero key collapses to "0".
pub fn normalize_key(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    let stripped = compact.trim_start_matches('0');
    if stripped.is_empty() && !compact.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// The join key for a person: MRN, else badge, else English name.
pub fn canonical_identifier(mrn: &str, badge: &str, name_eng: &str) -> String {
    let mrn = mrn.trim();
    let badge = badge.trim();
    let source = if !mrn.is_empty() {
        mrn
    } else if !badge.is_empty() && badge != BADGE_PLACEHOLDER {
        badge
    } else {
        name_eng
    };
    normalize_key(source)
}

impl Employee {
    pub fn identifier(&self) -> String {
        canonical_identifier(&self.mrn, &self.badge_no, &self.name_eng)
    }
}

/// Deduplicated roster plus what was folded away.
#[derive(Debug, Clone, PartialEq)]
pub struct Deduplicated {
    pub employees: Vec<Employee>,
    pub duplicates: Vec<DuplicateEntry>,
}

/// Keep the first record per identifier; report identifiers that appeared
/// on more than one distinct sheet.
///
/// `records` must already be in sheet order, then row order.
pub fn deduplicate(records: Vec<Employee>) -> Deduplicated {
    struct Seen {
        retained: usize,
        sheets: BTreeSet<String>,
        occurrences: usize,
    }

    let mut employees: Vec<Employee> = Vec::new();
    let mut order: Vec<String> = Vec::new();
    let mut seen: HashMap<String, Seen> = HashMap::new();

    for record in records {
        let id = record.identifier();
        match seen.get_mut(&id) {
            Some(entry) => {
                entry.sheets.insert(record.sheet_name);
                entry.occurrences += 1;
            }
            None => {
                let mut sheets = BTreeSet::new();
                sheets.insert(record.sheet_name.clone());
                seen.insert(
                    id.clone(),
                    Seen {
                        retained: employees.len(),
                        sheets,
                        occurrences: 1,
                    },
                );
                order.push(id);
                employees.push(record);
            }
        }
    }

    let duplicates = order
        .into_iter()
        .filter_map(|id| {
            let entry = seen.remove(&id)?;
            if entry.sheets.len() < 2 {
                return None;
            }
            let kept = &employees[entry.retained];
            Some(DuplicateEntry {
                name: kept.name_eng.clone(),
                job_title: kept.job_title.clone(),
                mrn: kept.mrn.clone(),
                identifier: id,
                sheets: entry.sheets.into_iter().collect(),
                occurrences: entry.occurrences,
            })
        })
        .collect();

    Deduplicated {
        employees,
        duplicates,
    }
}

/// Headcount per uppercased job title, sorted by job.
pub fn job_counts(employees: &[Employee]) -> Vec<JobCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for e in employees {
        *counts.entry(e.job_title.to_uppercase()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(job, count)| JobCount { job, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Period};

    fn emp(sheet: &str, name: &str, badge: &str, mrn: &str, job: &str) -> Employee {
        Employee {
            id: format!("f-{sheet}-{name}"),
            name_eng: name.into(),
            name_ar: String::new(),
            nationality: "Unknown".into(),
            gender: Gender::Male,
            id_number: String::new(),
            badge_no: badge.into(),
            emp_id: String::new(),
            company: String::new(),
            job_title: job.into(),
            location: sheet.into(),
            mrn: mrn.into(),
            shift: String::new(),
            period: Period::new(1).unwrap(),
            sheet_name: sheet.into(),
            file_name: "f.xlsx".into(),
        }
    }

    #[test]
    fn key_ignores_space_case_and_leading_zeros() {
        assert_eq!(normalize_key(" 00123 "), normalize_key("123"));
        assert_eq!(normalize_key("ab 12"), "AB12");
        assert_eq!(normalize_key("0000"), "0");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn identifier_precedence() {
        assert_eq!(canonical_identifier("M-9", "555", "ALI"), "M-9");
        assert_eq!(canonical_identifier("", "0555", "ALI"), "555");
        assert_eq!(canonical_identifier("", "N/A", "Ali Hassan"), "ALIHASSAN");
    }

    #[test]
    fn first_record_wins_and_duplicates_report_distinct_sheets() {
        let records = vec![
            emp("B", "ALI", "1001", "", "CLEANER"),
            emp("A", "ALI KHAN", "01001", "", "DRIVER"),
            emp("A", "SAM", "2002", "", "HELPER"),
            emp("A", "SAM", "2002", "", "HELPER"),
        ];
        let out = deduplicate(records);
        assert_eq!(out.employees.len(), 2);
        assert_eq!(out.employees[0].name_eng, "ALI");
        assert_eq!(out.employees[0].sheet_name, "B");

        // SAM repeats within one sheet only: folded, but not a cross-sheet duplicate.
        assert_eq!(out.duplicates.len(), 1);
        let dup = &out.duplicates[0];
        assert_eq!(dup.identifier, "1001");
        assert_eq!(dup.name, "ALI");
        assert_eq!(dup.job_title, "CLEANER");
        assert_eq!(dup.sheets, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(dup.occurrences, 2);
    }

    #[test]
    fn dedup_is_idempotent() {
        let records = vec![
            emp("A", "ALI", "1001", "", "CLEANER"),
            emp("B", "ALI", "1001", "", "CLEANER"),
            emp("B", "OMAR", "", "MRN7", "DRIVER"),
        ];
        let once = deduplicate(records.clone());
        let twice = deduplicate(once.employees.clone());
        assert_eq!(twice.employees, once.employees);
        assert_eq!(deduplicate(records).duplicates, once.duplicates);
        assert_eq!(once.duplicates.len(), 1);
    }

    #[test]
    fn job_counts_from_given_set() {
        let employees = vec![
            emp("A", "X", "1", "", "cleaner"),
            emp("A", "Y", "2", "", "CLEANER"),
            emp("A", "Z", "3", "", "DRIVER"),
        ];
        assert_eq!(
            job_counts(&employees),
            vec![
                JobCount { job: "CLEANER".into(), count: 2 },
                JobCount { job: "DRIVER".into(), count: 1 },
            ]
        );
    }
}
