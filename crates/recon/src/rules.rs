//! Fixed vocabularies and first-match-wins rule tables.
//!
//! Everything the classifier, mapper and normalizer match against lives
//! here so each table can be read and tested on its own.

use crate::model::Gender;

// ---------------------------------------------------------------------------
// Sheet markers
// ---------------------------------------------------------------------------

/// Any of these in a row marks it as the control table header.
pub const CONTROL_MARKERS: &[&str] = &[
    "ACTUAL ON SITE",
    "JOB TITLE",
    "DESIGNATION",
    "CATEGORY",
    "NUMBER OF STAFF",
];

pub const CONTROL_JOB_TERMS: &[&str] = &["JOB TITLE", "DESIGNATION", "CATEGORY"];
pub const CONTROL_COUNT_TERMS: &[&str] = &["ACTUAL ON SITE", "NUMBER OF STAFF", "COUNT"];

/// Any of these in a row marks it as a roster header.
pub const ROSTER_MARKERS: &[&str] = &["NAME", "EMP#", "BADGE", "الاسم"];

/// Row label that closes a table or marks a subtotal line.
pub const TOTAL_TOKEN: &str = "TOTAL";

// ---------------------------------------------------------------------------
// Roster column vocabulary
// ---------------------------------------------------------------------------

/// Canonical roster fields a column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    NameEng,
    NameAr,
    Job,
    Nationality,
    Gender,
    IdNumber,
    Badge,
    Mrn,
    Location,
    Company,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NameEng => "name_eng",
            Self::NameAr => "name_ar",
            Self::Job => "job_title",
            Self::Nationality => "nationality",
            Self::Gender => "gender",
            Self::IdNumber => "id_number",
            Self::Badge => "badge_no",
            Self::Mrn => "mrn",
            Self::Location => "location",
            Self::Company => "company",
        }
    }
}

/// Header terms per field. A field maps to the leftmost column whose header
/// contains any of its terms.
pub const FIELD_TERMS: &[(Field, &[&str])] = &[
    (Field::NameEng, &["NAME (ENG)", "EMPLOYEE NAME", "STAFF NAME", "NAME"]),
    (Field::NameAr, &["NAME (AR)", "الاسم", "الأسم"]),
    (Field::Job, &["JOB TITLE", "POSITION", "JOB", "ROLE", "DESIGNATION", "المسمى"]),
    (Field::Nationality, &["NATIONALITY", "الجنسية"]),
    (Field::Gender, &["GENDER", "SEX", "M/F", "النوع", "الجنس"]),
    (Field::IdNumber, &["ID#", "IQAMA", "PASSPORT", "هوية"]),
    (
        Field::Badge,
        &["EMP#", "BADGE", "STAFF NO", "FILE", "CODE", "رقم الموظف", "الرقم الوظيفي", "S.NO"],
    ),
    (Field::Mrn, &["MRN", "MEDICAL", "ملف طبي"]),
    (Field::Location, &["LOCATION", "ZONE", "AREA", "SITE", "الموقع"]),
    (Field::Company, &["COMPANY", "SPONSOR", "الشركة"]),
];

/// Header text that shows up again inside the data when tables are stacked.
pub const REPEATED_NAME_HEADER: &str = "NAME (ENG)";

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

pub const BADGE_PLACEHOLDER: &str = "N/A";
pub const UNKNOWN_JOB: &str = "UNKNOWN";
pub const UNKNOWN_NATIONALITY: &str = "Unknown";

/// Values that count as "no job title" before keyword extraction.
pub const EMPTY_JOB_VALUES: &[&str] = &["", UNKNOWN_JOB, BADGE_PLACEHOLDER];

// ---------------------------------------------------------------------------
// Job keywords
// ---------------------------------------------------------------------------

/// Ordered; the first keyword found in a merged name cell becomes the job.
pub const JOB_KEYWORDS: &[&str] = &[
    "CLEANER",
    "SUPERVISOR",
    "MANAGER",
    "DRIVER",
    "OPERATOR",
    "TECHNICIAN",
    "FOREMAN",
    "HOUSEKEEPER",
    "WORKER",
    "HELPER",
    "ATTENDANT",
    "LABOR",
    "COORDINATOR",
    "LEADMAN",
    "TEAM LEADER",
];

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Explicit gender tokens accepted from a cell (after trim + uppercase).
pub const GENDER_TOKENS: &[(&str, Gender)] = &[
    ("F", Gender::Female),
    ("FEMALE", Gender::Female),
    ("M", Gender::Male),
    ("MALE", Gender::Male),
];

pub fn gender_token(value: &str) -> Option<Gender> {
    let upper = value.trim().to_uppercase();
    GENDER_TOKENS
        .iter()
        .find(|(token, _)| *token == upper)
        .map(|(_, gender)| *gender)
}

/// A predicate over the uppercased first name token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    Prefix(&'static str),
    Suffix(&'static str),
}

impl NameRule {
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Self::Prefix(p) => token.starts_with(p),
            Self::Suffix(s) => token.ends_with(s),
        }
    }
}

/// Name-based gender inference. Hand-tuned for one workforce's naming
/// patterns and unreliable outside it; only consulted when the sheet carries
/// no explicit gender. Anything unmatched is MALE.
pub const GENDER_NAME_RULES: &[(NameRule, Gender)] = &[
    (NameRule::Prefix("MAISA"), Gender::Female),
    (NameRule::Prefix("NOURA"), Gender::Female),
    (NameRule::Prefix("SARA"), Gender::Female),
    (NameRule::Prefix("FATIMA"), Gender::Female),
    (NameRule::Prefix("MARIAM"), Gender::Female),
    (NameRule::Prefix("AISHIA"), Gender::Female),
    (NameRule::Prefix("LINDA"), Gender::Female),
    (NameRule::Prefix("JANE"), Gender::Female),
    (NameRule::Prefix("HESSA"), Gender::Female),
    (NameRule::Prefix("REEM"), Gender::Female),
    (NameRule::Prefix("AMAL"), Gender::Female),
    (NameRule::Prefix("MONA"), Gender::Female),
    (NameRule::Prefix("LATIFA"), Gender::Female),
    (NameRule::Prefix("JAWAHER"), Gender::Female),
    (NameRule::Prefix("NADA"), Gender::Female),
    (NameRule::Prefix("ARWA"), Gender::Female),
    (NameRule::Suffix("A"), Gender::Female),
    (NameRule::Suffix("AH"), Gender::Female),
    (NameRule::Suffix("IA"), Gender::Female),
];

pub const DEFAULT_GENDER: Gender = Gender::Male;

/// Best-effort gender guess from a raw name cell.
pub fn infer_gender(raw_name: &str) -> Gender {
    let upper = raw_name.trim().to_uppercase();
    let first = upper.split_whitespace().next().unwrap_or("");
    if first.is_empty() {
        return DEFAULT_GENDER;
    }
    GENDER_NAME_RULES
        .iter()
        .find(|(rule, _)| rule.matches(first))
        .map(|(_, gender)| *gender)
        .unwrap_or(DEFAULT_GENDER)
}
