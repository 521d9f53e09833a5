use serde::Serialize;
use tracing::debug;

use crate::config::AuditConfig;
use crate::grid::{row_has_marker, SheetGrid, Workbook};
use crate::rules::CONTROL_MARKERS;

/// Where the control table was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlLocation {
    pub sheet_index: usize,
    pub sheet_name: String,
    pub header_row: usize,
}

/// Role assignment for every sheet of a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetPlan {
    pub control: Option<ControlLocation>,
    /// Indices of roster candidates, in workbook order.
    pub roster_candidates: Vec<usize>,
}

/// First row within the scan window carrying a control marker.
pub fn find_control_header(sheet: &SheetGrid, scan_rows: usize) -> Option<usize> {
    sheet
        .rows
        .iter()
        .take(scan_rows)
        .position(|row| row_has_marker(row, CONTROL_MARKERS))
}

/// Pick the control sheet (first match in workbook order) and treat every
/// other sheet as a roster candidate.
///
/// A second sheet that would also qualify as control is silently treated as
/// a roster candidate; there is no ambiguity check.
pub fn classify_workbook(workbook: &Workbook, config: &AuditConfig) -> SheetPlan {
    let control = workbook
        .sheets
        .iter()
        .enumerate()
        .find_map(|(sheet_index, sheet)| {
            find_control_header(sheet, config.control_scan_rows).map(|header_row| {
                ControlLocation {
                    sheet_index,
                    sheet_name: sheet.name.clone(),
                    header_row,
                }
            })
        });

    match &control {
        Some(c) => debug!(
            file = %workbook.file_name,
            sheet = %c.sheet_name,
            header_row = c.header_row,
            "control sheet found"
        ),
        None => debug!(file = %workbook.file_name, "no control sheet"),
    }

    let control_index = control.as_ref().map(|c| c.sheet_index);
    let roster_candidates = (0..workbook.sheets.len())
        .filter(|i| Some(*i) != control_index)
        .collect();

    SheetPlan {
        control,
        roster_candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, rows: Vec<Vec<&str>>) -> SheetGrid {
        SheetGrid::from_rows(name, rows)
    }

    #[test]
    fn first_matching_sheet_is_control() {
        let wb = Workbook::new(
            "f.xlsx",
            vec![
                sheet("Site A", vec![vec!["S.NO", "NAME"], vec!["1", "ALI"]]),
                sheet("Summary", vec![vec!["Manning"], vec!["Job Title", "Actual on Site"]]),
                sheet("Summary 2", vec![vec!["Category", "Count"]]),
            ],
        );
        let plan = classify_workbook(&wb, &AuditConfig::default());
        let control = plan.control.unwrap();
        assert_eq!(control.sheet_name, "Summary");
        assert_eq!(control.header_row, 1);
        // The second qualifying sheet is not reported; it stays a roster candidate.
        assert_eq!(plan.roster_candidates, vec![0, 2]);
    }

    #[test]
    fn marker_beyond_scan_window_is_ignored() {
        let mut rows: Vec<Vec<&str>> = vec![vec![""]; 5];
        rows.push(vec!["DESIGNATION"]);
        let wb = Workbook::new("f.xlsx", vec![sheet("S", rows)]);

        let narrow = AuditConfig {
            control_scan_rows: 5,
            ..AuditConfig::default()
        };
        assert!(classify_workbook(&wb, &narrow).control.is_none());
        assert!(classify_workbook(&wb, &AuditConfig::default()).control.is_some());
    }

    #[test]
    fn no_control_means_all_rosters() {
        let wb = Workbook::new(
            "f.xlsx",
            vec![sheet("A", vec![vec!["NAME"]]), sheet("B", vec![vec!["BADGE"]])],
        );
        let plan = classify_workbook(&wb, &AuditConfig::default());
        assert!(plan.control.is_none());
        assert_eq!(plan.roster_candidates, vec![0, 1]);
    }
}
