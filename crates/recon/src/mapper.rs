//! Header detection and column mapping for control and roster sheets.

use std::collections::HashMap;

use serde::Serialize;

use crate::grid::{find_column, header_texts, row_has_marker, SheetGrid};
use crate::rules::{
    Field, CONTROL_COUNT_TERMS, CONTROL_JOB_TERMS, FIELD_TERMS, ROSTER_MARKERS, TOTAL_TOKEN,
};

// ---------------------------------------------------------------------------
// Control table
// ---------------------------------------------------------------------------

/// Expected headcount for one job, as declared on the control sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedJob {
    pub job: String,
    pub expected: i64,
}

/// Parsed control table. Jobs keep their first-appearance order; a repeated
/// job overwrites the earlier figure in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControlTable {
    pub expected: Vec<ExpectedJob>,
    /// Value of the TOTAL row's count cell, when it parsed.
    pub total: Option<i64>,
}

impl ControlTable {
    fn upsert(&mut self, job: String, expected: i64) {
        match self.expected.iter_mut().find(|e| e.job == job) {
            Some(entry) => entry.expected = expected,
            None => self.expected.push(ExpectedJob { job, expected }),
        }
    }

    pub fn expected_sum(&self) -> i64 {
        self.expected.iter().map(|e| e.expected).sum()
    }
}

/// Leading integer of a cell, the way spreadsheet exports tend to write
/// counts ("12", "12.0", " 7 staff"). `None` if no digits lead the text.
pub fn parse_count(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Read the expected-count table below `header_row`.
///
/// The walk ends at the first blank job cell or at a TOTAL row; a TOTAL
/// row's numeric count becomes the table total.
pub fn parse_control_table(sheet: &SheetGrid, header_row: usize) -> ControlTable {
    let mut table = ControlTable::default();
    let Some(header) = sheet.row(header_row) else {
        return table;
    };
    let headers = header_texts(header);
    let job_col = find_column(&headers, CONTROL_JOB_TERMS);
    let count_col = find_column(&headers, CONTROL_COUNT_TERMS);

    for r in (header_row + 1)..sheet.row_count() {
        let job = job_col.map(|c| sheet.cell(r, c)).unwrap_or("");
        let job_upper = job.to_uppercase();

        if job.is_empty() {
            break;
        }
        if job_upper.contains(TOTAL_TOKEN) {
            if let Some(c) = count_col {
                if let Some(total) = parse_count(sheet.cell(r, c)) {
                    table.total = Some(total);
                }
            }
            break;
        }

        if let Some(c) = count_col {
            let expected = parse_count(sheet.cell(r, c)).unwrap_or(0);
            table.upsert(job_upper, expected);
        }
    }

    table
}

// ---------------------------------------------------------------------------
// Roster header
// ---------------------------------------------------------------------------

/// Column positions for one roster sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: HashMap<Field, usize>,
    /// Uppercased header text of the English-name column.
    pub name_header: String,
}

impl ColumnMap {
    /// Map every canonical field against a header row.
    pub fn from_header(header: &[String]) -> Self {
        let headers = header_texts(header);
        let columns: HashMap<Field, usize> = FIELD_TERMS
            .iter()
            .filter_map(|(field, terms)| find_column(&headers, terms).map(|c| (*field, c)))
            .collect();
        let name_header = columns
            .get(&Field::NameEng)
            .and_then(|c| headers.get(*c).cloned())
            .unwrap_or_default();
        Self {
            columns,
            name_header,
        }
    }

    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Trimmed cell text for `field` in `row`, "" when unmapped.
    pub fn value<'a>(&self, sheet: &'a SheetGrid, row: usize, field: Field) -> &'a str {
        self.column(field).map(|c| sheet.cell(row, c)).unwrap_or("")
    }
}

/// A roster sheet's located header and column map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLayout {
    pub header_row: usize,
    pub columns: ColumnMap,
}

/// First row within the scan window that looks like a roster header.
pub fn find_roster_header(sheet: &SheetGrid, scan_rows: usize) -> Option<usize> {
    sheet
        .rows
        .iter()
        .take(scan_rows)
        .position(|row| row_has_marker(row, ROSTER_MARKERS))
}

/// Locate the header and map columns. `None` means "not a data sheet".
pub fn map_roster(sheet: &SheetGrid, scan_rows: usize) -> Option<RosterLayout> {
    let header_row = find_roster_header(sheet, scan_rows)?;
    let columns = ColumnMap::from_header(sheet.row(header_row).unwrap_or(&[]));
    Some(RosterLayout {
        header_row,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: Vec<Vec<&str>>) -> SheetGrid {
        SheetGrid::from_rows("S", rows)
    }

    #[test]
    fn parse_count_leading_integer() {
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count(" 12.9 "), Some(12));
        assert_eq!(parse_count("7 staff"), Some(7));
        assert_eq!(parse_count("-3"), Some(-3));
        assert_eq!(parse_count("n/a"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn control_table_reads_until_total() {
        let s = sheet(vec![
            vec!["Manning Summary"],
            vec!["S.No", "Job Title", "Actual on Site"],
            vec!["1", "Cleaner", "10"],
            vec!["2", "Driver", "5"],
            vec!["", "Total", "15"],
            vec!["3", "Ghost", "99"],
        ]);
        let table = parse_control_table(&s, 1);
        assert_eq!(
            table.expected,
            vec![
                ExpectedJob { job: "CLEANER".into(), expected: 10 },
                ExpectedJob { job: "DRIVER".into(), expected: 5 },
            ]
        );
        assert_eq!(table.total, Some(15));
        assert_eq!(table.expected_sum(), 15);
    }

    #[test]
    fn control_table_blank_job_stops_without_total() {
        let s = sheet(vec![
            vec!["Designation", "Number of Staff"],
            vec!["Supervisor", "2"],
            vec!["", ""],
            vec!["Cleaner", "40"],
        ]);
        let table = parse_control_table(&s, 0);
        assert_eq!(table.expected.len(), 1);
        assert_eq!(table.total, None);
    }

    #[test]
    fn control_table_total_non_numeric_leaves_total_unset() {
        let s = sheet(vec![
            vec!["Category", "Count"],
            vec!["Helper", "x"],
            vec!["GRAND TOTAL", "-"],
        ]);
        let table = parse_control_table(&s, 0);
        assert_eq!(table.expected, vec![ExpectedJob { job: "HELPER".into(), expected: 0 }]);
        assert_eq!(table.total, None);
    }

    #[test]
    fn control_table_without_count_column_has_no_expectations() {
        let s = sheet(vec![vec!["Job Title", "Remarks"], vec!["Cleaner", "ok"]]);
        let table = parse_control_table(&s, 0);
        assert!(table.expected.is_empty());
    }

    #[test]
    fn repeated_job_overwrites_in_place() {
        let s = sheet(vec![
            vec!["Job Title", "Count"],
            vec!["Cleaner", "3"],
            vec!["Driver", "1"],
            vec!["cleaner", "4"],
        ]);
        let table = parse_control_table(&s, 0);
        assert_eq!(table.expected[0], ExpectedJob { job: "CLEANER".into(), expected: 4 });
        assert_eq!(table.expected.len(), 2);
    }

    #[test]
    fn roster_header_and_columns() {
        let s = sheet(vec![
            vec!["Company XYZ monthly manning"],
            vec![],
            vec![
                "S.No", "Name (Eng)", "الاسم", "Nationality", "Iqama", "Emp#", "Gender",
                "Job Title", "Site", "MRN", "Sponsor",
            ],
            vec!["1", "ALI", "علي", "EGY", "2", "0042", "M", "DRIVER", "GATE 1", "", "ACME"],
        ]);
        let layout = map_roster(&s, 40).unwrap();
        assert_eq!(layout.header_row, 2);
        let c = &layout.columns;
        assert_eq!(c.column(Field::NameEng), Some(1));
        assert_eq!(c.column(Field::NameAr), Some(2));
        assert_eq!(c.column(Field::Nationality), Some(3));
        assert_eq!(c.column(Field::IdNumber), Some(4));
        // "S.NO" is a badge term, and it sits left of "EMP#".
        assert_eq!(c.column(Field::Badge), Some(0));
        assert_eq!(c.column(Field::Gender), Some(6));
        assert_eq!(c.column(Field::Job), Some(7));
        assert_eq!(c.column(Field::Location), Some(8));
        assert_eq!(c.column(Field::Mrn), Some(9));
        assert_eq!(c.column(Field::Company), Some(10));
        assert_eq!(c.name_header, "NAME (ENG)");
        assert_eq!(c.value(&s, 3, Field::Location), "GATE 1");
        assert_eq!(c.value(&s, 3, Field::Mrn), "");
    }

    #[test]
    fn sheet_without_header_is_skipped() {
        let s = sheet(vec![vec!["Notes"], vec!["nothing here"]]);
        assert!(map_roster(&s, 40).is_none());
    }
}
