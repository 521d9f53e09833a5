//! Row cleaning: merged name/badge/job cells, gender resolution, defaults.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AuditConfig;
use crate::grid::SheetGrid;
use crate::mapper::RosterLayout;
use crate::model::{Employee, Gender, Period};
use crate::rules::{
    self, Field, BADGE_PLACEHOLDER, EMPTY_JOB_VALUES, JOB_KEYWORDS, REPEATED_NAME_HEADER,
    TOTAL_TOKEN, UNKNOWN_JOB, UNKNOWN_NATIONALITY,
};

static BADGE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4,8}").unwrap());

/// Keyword patterns in table order, matched case-insensitively.
static JOB_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    JOB_KEYWORDS
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!("(?i){}", regex::escape(kw))).unwrap();
            (*kw, re)
        })
        .collect()
});

/// Name, badge and job after splitting a merged name cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedFields {
    pub name: String,
    pub badge: String,
    pub job: String,
}

fn is_blank_badge(badge: &str) -> bool {
    badge.is_empty() || badge == BADGE_PLACEHOLDER
}

/// Pull a badge number and a job keyword out of a noisy name cell when the
/// dedicated columns are empty.
///
/// `existing_job` is expected uppercased.
pub fn clean_merged_fields(raw_name: &str, existing_badge: &str, existing_job: &str) -> CleanedFields {
    let mut name = raw_name.trim().to_string();
    let mut badge = existing_badge.trim().to_string();
    let mut job = existing_job.trim().to_string();

    if is_blank_badge(&badge) {
        if let Some(m) = BADGE_RUN.find(&name) {
            badge = m.as_str().to_string();
            let range = m.range();
            name.replace_range(range, "");
            name = name.trim().to_string();
        }
    }

    if EMPTY_JOB_VALUES.contains(&job.as_str()) {
        if let Some((keyword, pattern)) = JOB_PATTERNS.iter().find(|(_, re)| re.is_match(&name)) {
            job = keyword.to_string();
            name = pattern.replace_all(&name, "").into_owned();
        }
    }

    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let name = collapsed
        .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .to_string();

    CleanedFields { name, badge, job }
}

/// Explicit tokens first (fixed column, then mapped column), inference last.
pub fn resolve_gender(fixed_cell: &str, mapped_cell: &str, raw_name: &str, infer: bool) -> Gender {
    rules::gender_token(fixed_cell)
        .or_else(|| rules::gender_token(mapped_cell))
        .unwrap_or_else(|| {
            if infer {
                rules::infer_gender(raw_name)
            } else {
                rules::DEFAULT_GENDER
            }
        })
}

/// First non-empty value, or `fallback`.
fn first_present<'a>(candidates: &[&'a str], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|v| !v.is_empty())
        .unwrap_or(fallback)
}

/// Where a normalized row came from.
#[derive(Debug, Clone, Copy)]
pub struct RowOrigin<'a> {
    pub file_name: &'a str,
    pub period: Period,
}

/// Clean every data row of a roster sheet, in row order.
pub fn normalize_sheet(
    sheet: &SheetGrid,
    layout: &RosterLayout,
    origin: RowOrigin<'_>,
    config: &AuditConfig,
) -> Vec<Employee> {
    if layout.columns.column(Field::NameEng).is_none() {
        return Vec::new();
    }
    ((layout.header_row + 1)..sheet.row_count())
        .filter_map(|r| normalize_row(sheet, layout, r, origin, config))
        .collect()
}

/// Clean one row. `None` for rows that carry no employee (blank name,
/// subtotal lines, repeated headers).
pub fn normalize_row(
    sheet: &SheetGrid,
    layout: &RosterLayout,
    row: usize,
    origin: RowOrigin<'_>,
    config: &AuditConfig,
) -> Option<Employee> {
    let cols = &layout.columns;
    let raw_name = cols.value(sheet, row, Field::NameEng);
    if raw_name.is_empty() {
        return None;
    }
    let upper_name = raw_name.to_uppercase();
    if upper_name.contains(TOTAL_TOKEN)
        || upper_name == REPEATED_NAME_HEADER
        || (!cols.name_header.is_empty() && upper_name == cols.name_header)
    {
        return None;
    }

    let gender = resolve_gender(
        sheet.cell(row, config.gender_column),
        cols.value(sheet, row, Field::Gender),
        raw_name,
        config.infer_gender,
    );

    let badge_cell = cols.value(sheet, row, Field::Badge);
    let job_cell = cols.value(sheet, row, Field::Job).to_uppercase();
    let mrn = cols.value(sheet, row, Field::Mrn);
    let id_number = cols.value(sheet, row, Field::IdNumber);
    let location = first_present(&[cols.value(sheet, row, Field::Location)], &sheet.name);

    let cleaned = clean_merged_fields(raw_name, badge_cell, &job_cell);
    let badge = if is_blank_badge(&cleaned.badge) { "" } else { cleaned.badge.as_str() };

    Some(Employee {
        id: format!("{}-{}-{}", origin.file_name, sheet.name, row),
        name_eng: cleaned.name.clone(),
        name_ar: cols.value(sheet, row, Field::NameAr).to_string(),
        nationality: first_present(
            &[cols.value(sheet, row, Field::Nationality)],
            UNKNOWN_NATIONALITY,
        )
        .to_string(),
        gender,
        id_number: id_number.to_string(),
        badge_no: first_present(&[badge, mrn, id_number], BADGE_PLACEHOLDER).to_string(),
        emp_id: first_present(&[badge, id_number], "").to_string(),
        company: cols.value(sheet, row, Field::Company).to_string(),
        job_title: first_present(&[cleaned.job.as_str()], UNKNOWN_JOB).to_string(),
        location: location.to_string(),
        mrn: mrn.to_string(),
        shift: String::new(),
        period: origin.period,
        sheet_name: sheet.name.clone(),
        file_name: origin.file_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_roster;

    #[test]
    fn merged_name_badge_job() {
        let c = clean_merged_fields("AHMED 12345 CLEANER", "", "");
        assert_eq!(c.name, "AHMED");
        assert_eq!(c.badge, "12345");
        assert_eq!(c.job, "CLEANER");
    }

    #[test]
    fn existing_badge_is_kept() {
        let c = clean_merged_fields("OMAR 998877", "5555", "DRIVER");
        assert_eq!(c.badge, "5555");
        assert_eq!(c.job, "DRIVER");
        assert_eq!(c.name, "OMAR 998877");
    }

    #[test]
    fn placeholder_badge_is_replaced() {
        let c = clean_merged_fields("2024001 - SAMI", "N/A", "DRIVER");
        assert_eq!(c.badge, "2024001");
        assert_eq!(c.name, "SAMI");
    }

    #[test]
    fn short_digit_runs_are_not_badges() {
        let c = clean_merged_fields("JOHN 123", "", "HELPER");
        assert_eq!(c.badge, "");
        assert_eq!(c.name, "JOHN 123");
    }

    #[test]
    fn first_keyword_wins_and_all_occurrences_removed() {
        // SUPERVISOR precedes DRIVER in the table even though DRIVER comes first in the text.
        let c = clean_merged_fields("Driver Supervisor KHAN supervisor", "", "UNKNOWN");
        assert_eq!(c.job, "SUPERVISOR");
        assert_eq!(c.name, "Driver KHAN");
    }

    #[test]
    fn separators_trimmed_and_spaces_collapsed() {
        let c = clean_merged_fields("  - RAJ   KUMAR / CLEANER", "", "");
        assert_eq!(c.name, "RAJ KUMAR");
        assert_eq!(c.job, "CLEANER");
    }

    #[test]
    fn gender_priority() {
        // Fixed column wins over mapped column.
        assert_eq!(resolve_gender("M", "F", "SARA", true), Gender::Male);
        // Mapped column used when fixed column holds something else.
        assert_eq!(resolve_gender("EGYPT", "female", "OMAR", true), Gender::Female);
        // Inference last.
        assert_eq!(resolve_gender("", "", "Fatima Noor", true), Gender::Female);
        assert_eq!(resolve_gender("", "", "Fatima Noor", false), Gender::Male);
    }

    fn roster() -> SheetGrid {
        SheetGrid::from_rows(
            "Gate 3",
            vec![
                vec!["S.No", "Name (Eng)", "Job Title", "MRN", "Iqama", "Nationality", "Sex"],
                vec!["", "AHMED 12345 CLEANER", "", "", "", "", ""],
                vec!["", "Mona Saleh", "Helper", "00777", "", "Egyptian", ""],
                vec!["", "", "Helper", "", "", "", ""],
                vec!["", "Sub Total", "", "", "", "", ""],
                vec!["", "NAME (ENG)", "JOB TITLE", "", "", "", ""],
                vec!["", "Zaid", "", "", "2233", "", "m"],
                vec!["", "Yousef", "", "", "", "", ""],
            ],
        )
    }

    #[test]
    fn sheet_rows_normalized() {
        let sheet = roster();
        let layout = map_roster(&sheet, 40).unwrap();
        let origin = RowOrigin {
            file_name: "march.xlsx",
            period: Period::new(3).unwrap(),
        };
        let out = normalize_sheet(&sheet, &layout, origin, &AuditConfig::default());
        assert_eq!(out.len(), 4);

        let ahmed = &out[0];
        assert_eq!(ahmed.id, "march.xlsx-Gate 3-1");
        assert_eq!(ahmed.name_eng, "AHMED");
        assert_eq!(ahmed.badge_no, "12345");
        assert_eq!(ahmed.emp_id, "12345");
        assert_eq!(ahmed.job_title, "CLEANER");
        assert_eq!(ahmed.location, "Gate 3");
        assert_eq!(ahmed.nationality, "Unknown");
        assert_eq!(ahmed.gender, Gender::Male);

        let mona = &out[1];
        assert_eq!(mona.badge_no, "00777");
        assert_eq!(mona.emp_id, "");
        assert_eq!(mona.job_title, "HELPER");
        assert_eq!(mona.gender, Gender::Female);

        let zaid = &out[2];
        assert_eq!(zaid.badge_no, "2233");
        assert_eq!(zaid.emp_id, "2233");
        assert_eq!(zaid.job_title, "UNKNOWN");
        assert_eq!(zaid.gender, Gender::Male);

        let yousef = &out[3];
        assert_eq!(yousef.badge_no, "N/A");
        assert_eq!(yousef.period.number(), 3);
    }
}
