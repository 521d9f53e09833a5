use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::{classify_workbook, ControlLocation};
use crate::config::AuditConfig;
use crate::control::reconcile;
use crate::grid::Workbook;
use crate::identity::{deduplicate, job_counts};
use crate::mapper::{map_roster, parse_control_table, ControlTable};
use crate::model::{AuditResult, Employee, Period};
use crate::normalize::{normalize_sheet, RowOrigin};
use crate::rules::FIELD_TERMS;

/// Reconcile one workbook into the audit result for `period`.
///
/// A workbook with no recognizable roster sheet is not an error: it yields
/// a result with zero employees.
pub fn audit_workbook(workbook: &Workbook, period: Period, config: &AuditConfig) -> AuditResult {
    let plan = classify_workbook(workbook, config);

    let control_table = plan
        .control
        .as_ref()
        .and_then(|c| {
            workbook
                .sheets
                .get(c.sheet_index)
                .map(|sheet| parse_control_table(sheet, c.header_row))
        })
        .unwrap_or_default();

    let origin = RowOrigin {
        file_name: &workbook.file_name,
        period,
    };

    let mut processed_sheets = Vec::new();
    let mut raw: Vec<Employee> = Vec::new();
    for &index in &plan.roster_candidates {
        let sheet = &workbook.sheets[index];
        let Some(layout) = map_roster(sheet, config.roster_scan_rows) else {
            debug!(file = %workbook.file_name, sheet = %sheet.name, "no roster header, skipping");
            continue;
        };
        processed_sheets.push(sheet.name.clone());
        let rows = normalize_sheet(sheet, &layout, origin, config);
        debug!(
            sheet = %sheet.name,
            header_row = layout.header_row,
            rows = rows.len(),
            "roster sheet normalized"
        );
        raw.extend(rows);
    }

    if processed_sheets.is_empty() {
        warn!(file = %workbook.file_name, "no roster sheet recognized");
    }

    let deduped = deduplicate(raw);
    let counts = job_counts(&deduped.employees);
    let verdict = reconcile(&control_table, deduped.employees.len(), &counts);

    info!(
        file = %workbook.file_name,
        period = %period,
        roster = deduped.employees.len(),
        expected = verdict.expected_count,
        duplicates = deduped.duplicates.len(),
        status = %verdict.status,
        "audit complete"
    );

    AuditResult {
        file_name: workbook.file_name.clone(),
        period,
        control_sheet: plan.control.map(|c| c.sheet_name),
        processed_sheets,
        control_total: control_table.total,
        expected_count: verdict.expected_count,
        calculated_count: deduped.employees.len(),
        difference: verdict.difference,
        status: verdict.status,
        job_counts: counts,
        job_variances: verdict.variances,
        duplicates: deduped.duplicates,
        employees: deduped.employees,
    }
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetRole {
    Control,
    Roster,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedColumn {
    pub field: &'static str,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetReport {
    pub name: String,
    pub role: SheetRole,
    pub header_row: Option<usize>,
    pub columns: Vec<MappedColumn>,
}

/// How the engine would read a workbook, without auditing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookReport {
    pub file_name: String,
    pub control: Option<ControlLocation>,
    pub control_table: ControlTable,
    pub sheets: Vec<SheetReport>,
}

pub fn inspect_workbook(workbook: &Workbook, config: &AuditConfig) -> WorkbookReport {
    let plan = classify_workbook(workbook, config);
    let control_index = plan.control.as_ref().map(|c| c.sheet_index);

    let sheets = workbook
        .sheets
        .iter()
        .enumerate()
        .map(|(i, sheet)| {
            if Some(i) == control_index {
                return SheetReport {
                    name: sheet.name.clone(),
                    role: SheetRole::Control,
                    header_row: plan.control.as_ref().map(|c| c.header_row),
                    columns: Vec::new(),
                };
            }
            match map_roster(sheet, config.roster_scan_rows) {
                Some(layout) => SheetReport {
                    name: sheet.name.clone(),
                    role: SheetRole::Roster,
                    header_row: Some(layout.header_row),
                    columns: FIELD_TERMS
                        .iter()
                        .filter_map(|(field, _)| {
                            layout.columns.column(*field).map(|column| MappedColumn {
                                field: field.label(),
                                column,
                            })
                        })
                        .collect(),
                },
                None => SheetReport {
                    name: sheet.name.clone(),
                    role: SheetRole::Skipped,
                    header_row: None,
                    columns: Vec::new(),
                },
            }
        })
        .collect();

    let control_table = plan
        .control
        .as_ref()
        .and_then(|c| {
            workbook
                .sheets
                .get(c.sheet_index)
                .map(|sheet| parse_control_table(sheet, c.header_row))
        })
        .unwrap_or_default();

    WorkbookReport {
        file_name: workbook.file_name.clone(),
        control: plan.control,
        control_table,
        sheets,
    }
}
