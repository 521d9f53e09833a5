use std::fmt;

use serde::Serialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Number of periods in the audit calendar (12 months + 1 carry-over month).
pub const PERIOD_COUNT: u8 = 13;

/// A period number in `1..=PERIOD_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Period(u8);

impl Period {
    pub fn new(number: u32) -> Result<Self, ReconError> {
        if (1..=PERIOD_COUNT as u32).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(ReconError::InvalidPeriod {
                value: number,
                max: PERIOD_COUNT,
            })
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based slot index.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All periods in calendar order.
    pub fn all() -> impl DoubleEndedIterator<Item = Period> {
        (1..=PERIOD_COUNT).map(Period)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "MALE"),
            Self::Female => write!(f, "FEMALE"),
        }
    }
}

/// One person as observed in one period, after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    /// `<file>-<sheet>-<row>`; stable for a given upload.
    pub id: String,
    pub name_eng: String,
    pub name_ar: String,
    pub nationality: String,
    pub gender: Gender,
    pub id_number: String,
    pub badge_no: String,
    pub emp_id: String,
    pub company: String,
    pub job_title: String,
    pub location: String,
    pub mrn: String,
    pub shift: String,
    pub period: Period,
    pub sheet_name: String,
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// Audit result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Pass,
    Fail,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Deduplicated roster count for one (uppercased) job title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCount {
    pub job: String,
    pub count: usize,
}

/// Control-sheet expectation versus roster reality for one job.
///
/// `location` carries the job key; the control sheet is organised by job,
/// and downstream reports label the column that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobVariance {
    pub location: String,
    pub expected: i64,
    pub found: i64,
    pub variance: i64,
}

/// An identity seen on more than one sheet of the same workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    pub identifier: String,
    pub name: String,
    /// Sorted, unique.
    pub sheets: Vec<String>,
    pub job_title: String,
    pub mrn: String,
    /// Raw rows that resolved to this identifier, including the retained one.
    pub occurrences: usize,
}

/// One workbook's reconciled output for one period. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditResult {
    pub file_name: String,
    pub period: Period,
    pub control_sheet: Option<String>,
    pub processed_sheets: Vec<String>,
    /// Figure read from the control sheet's TOTAL row, if any.
    pub control_total: Option<i64>,
    /// Control total when positive, else the sum of per-job expectations.
    pub expected_count: i64,
    pub calculated_count: usize,
    pub difference: i64,
    pub status: AuditStatus,
    pub job_counts: Vec<JobCount>,
    pub job_variances: Vec<JobVariance>,
    pub duplicates: Vec<DuplicateEntry>,
    pub employees: Vec<Employee>,
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaver {
    pub identifier: String,
    pub name_eng: String,
    pub badge_no: String,
    pub last_location: String,
    pub last_job: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub identifier: String,
    pub employee: Employee,
    pub old_location: String,
    pub new_location: String,
}

/// Joiners, leavers and site transfers between two populated periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementReport {
    pub previous_period: Period,
    pub current_period: Period,
    pub new_joiners: Vec<Employee>,
    pub leavers: Vec<Leaver>,
    pub transfers: Vec<Transfer>,
    /// Identities present in both periods at the same location.
    pub unchanged: usize,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LifecycleStatus {
    Stable,
    Returned,
    #[serde(rename = "Left-No-Return")]
    LeftNoReturn,
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => write!(f, "Stable"),
            Self::Returned => write!(f, "Returned"),
            Self::LeftNoReturn => write!(f, "Left-No-Return"),
        }
    }
}

impl std::str::FromStr for LifecycleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "stable" => Ok(Self::Stable),
            "returned" => Ok(Self::Returned),
            "left-no-return" | "left" => Ok(Self::LeftNoReturn),
            other => Err(format!(
                "unknown lifecycle status '{other}' (expected stable, returned or left-no-return)"
            )),
        }
    }
}

/// One identity's presence across every loaded period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleRecord {
    pub identifier: String,
    pub name: String,
    pub badge: String,
    /// One slot per period; `Some(location)` where the identity was present.
    pub presence: Vec<Option<String>>,
    pub first_seen: Period,
    pub last_seen: Period,
    pub gaps: usize,
    pub status: LifecycleStatus,
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Demographics {
    pub period: Period,
    pub headcount: usize,
    pub nationalities: Vec<Tally>,
    pub genders: Vec<Tally>,
    pub jobs: Vec<Tally>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyRow {
    pub period: Period,
    pub headcount: usize,
    /// Headcount change versus the previous populated period.
    pub variance: i64,
    pub joiners: usize,
    pub leavers: usize,
}
