// Property-based tests for identity, deduplication and movement.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use manning_recon::identity::{canonical_identifier, deduplicate, normalize_key};
use manning_recon::model::{AuditResult, AuditStatus, Employee, Gender};
use manning_recon::{movement, AuditStore, Period};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Badge-ish key: digits with optional zero padding and stray spaces.
fn arb_badge() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"0{0,3}[1-9][0-9]{0,5}",
        1 => r" ?0{0,2}[1-9][0-9]{0,3} ?",
        1 => Just(String::new()),
    ]
}

fn arb_site() -> impl Strategy<Value = String> {
    prop_oneof![Just("North"), Just("South"), Just("Gate 3"), Just("gate  3")]
        .prop_map(str::to_string)
}

fn employee(period: Period, name: &str, badge: &str, site: &str) -> Employee {
    Employee {
        id: format!("{period}-{name}"),
        name_eng: name.to_string(),
        name_ar: String::new(),
        nationality: "Unknown".into(),
        gender: Gender::Male,
        id_number: String::new(),
        badge_no: badge.to_string(),
        emp_id: badge.to_string(),
        company: String::new(),
        job_title: "CLEANER".into(),
        location: site.to_string(),
        mrn: String::new(),
        shift: String::new(),
        period,
        sheet_name: site.to_string(),
        file_name: format!("{period}.xlsx"),
    }
}

fn arb_roster(period: Period) -> impl Strategy<Value = Vec<Employee>> {
    prop::collection::vec((arb_badge(), arb_site(), "[A-Z]{3,8}"), 0..25).prop_map(move |rows| {
        rows.into_iter()
            .map(|(badge, site, name)| employee(period, &name, &badge, &site))
            .collect()
    })
}

fn audit(period: Period, employees: Vec<Employee>) -> AuditResult {
    let deduped = deduplicate(employees).employees;
    AuditResult {
        file_name: format!("{period}.xlsx"),
        period,
        control_sheet: None,
        processed_sheets: Vec::new(),
        control_total: None,
        expected_count: 0,
        calculated_count: deduped.len(),
        difference: deduped.len() as i64,
        status: AuditStatus::Fail,
        job_counts: Vec::new(),
        job_variances: Vec::new(),
        duplicates: Vec::new(),
        employees: deduped,
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn key_ignores_padding_case_and_spaces(digits in "[1-9][0-9]{0,6}", zeros in 0usize..4, spaces in 0usize..3) {
        let padded = format!("{}{}{}", " ".repeat(spaces), "0".repeat(zeros), digits);
        prop_assert_eq!(normalize_key(&padded), normalize_key(&digits));
        prop_assert_eq!(normalize_key(&digits.to_lowercase()), normalize_key(&digits));
    }

    #[test]
    fn identifier_is_deterministic(mrn in "[A-Z0-9 ]{0,6}", badge in arb_badge(), name in "[a-zA-Z ]{0,12}") {
        prop_assert_eq!(
            canonical_identifier(&mrn, &badge, &name),
            canonical_identifier(&mrn, &badge, &name)
        );
    }

    #[test]
    fn dedup_leaves_unique_identifiers(roster in arb_roster(Period::new(1).unwrap())) {
        let out = deduplicate(roster.clone());
        let ids: Vec<String> = out.employees.iter().map(Employee::identifier).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());

        let all: HashSet<String> = roster.iter().map(Employee::identifier).collect();
        prop_assert_eq!(all.len(), out.employees.len());

        // Idempotent, and the same raw set gives the same duplicate report.
        let again = deduplicate(out.employees.clone());
        prop_assert_eq!(&again.employees, &out.employees);
        prop_assert!(again.duplicates.is_empty());
        prop_assert_eq!(deduplicate(roster.clone()).duplicates, out.duplicates);
    }

    #[test]
    fn movement_partitions_both_periods(
        before in arb_roster(Period::new(2).unwrap()),
        after in arb_roster(Period::new(5).unwrap()),
    ) {
        let mut store = AuditStore::new();
        store.replace(audit(Period::new(2).unwrap(), before));
        store.replace(audit(Period::new(5).unwrap(), after));

        let prev = store.get(Period::new(2).unwrap()).unwrap().employees.len();
        let curr = store.get(Period::new(5).unwrap()).unwrap().employees.len();

        // Always a report, even when either roster is empty
        let report = movement(&store, Period::new(5).unwrap()).unwrap();
        prop_assert_eq!(report.previous_period, Period::new(2).unwrap());
        let stayed = report.transfers.len() + report.unchanged;
        prop_assert_eq!(report.new_joiners.len() + stayed, curr);
        prop_assert_eq!(report.leavers.len() + stayed, prev);
    }
}
