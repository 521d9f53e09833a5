//! The 13-period audit calendar and period detection from file names.
//!
//! Periods 1-12 are January through December of the start year; period 13
//! is January of the following year, so a year-end roster can be compared
//! against the next January.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const PERIOD_COUNT: u8 = 13;

const MONTHS: [(&str, &str, &str); 12] = [
    ("January", "Jan", "يناير"),
    ("February", "Feb", "فبراير"),
    ("March", "Mar", "مارس"),
    ("April", "Apr", "أبريل"),
    ("May", "May", "مايو"),
    ("June", "Jun", "يونيو"),
    ("July", "Jul", "يوليو"),
    ("August", "Aug", "أغسطس"),
    ("September", "Sep", "سبتمبر"),
    ("October", "Oct", "أكتوبر"),
    ("November", "Nov", "نوفمبر"),
    ("December", "Dec", "ديسمبر"),
];

/// A standalone month number, delimited by start/end, space, dash or underscore.
static MONTH_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[\s\-_])(0[1-9]|1[0-2]|[1-9])(?:[\s\-_]|$)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarPeriod {
    pub number: u8,
    pub name: String,
    pub short_name: String,
    pub arabic_name: String,
    pub month: u32,
    pub year: i32,
}

impl CalendarPeriod {
    /// "March 2025"
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.year)
    }

    /// Lowercased month tokens a file name may carry.
    fn tokens(&self) -> [String; 3] {
        // "Jan '26" is matched as plain "jan"
        let short = self.short_name.split('\'').next().unwrap_or("").trim();
        [
            self.name.to_lowercase(),
            short.to_lowercase(),
            self.arabic_name.to_lowercase(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub start_year: i32,
    pub periods: Vec<CalendarPeriod>,
}

impl Calendar {
    pub fn new(start_year: i32) -> Self {
        let mut periods: Vec<CalendarPeriod> = MONTHS
            .iter()
            .enumerate()
            .map(|(i, (name, short, arabic))| CalendarPeriod {
                number: i as u8 + 1,
                name: name.to_string(),
                short_name: short.to_string(),
                arabic_name: arabic.to_string(),
                month: i as u32 + 1,
                year: start_year,
            })
            .collect();

        let next = start_year + 1;
        let (name, short, arabic) = MONTHS[0];
        periods.push(CalendarPeriod {
            number: PERIOD_COUNT,
            name: name.to_string(),
            short_name: format!("{short} '{:02}", next.rem_euclid(100)),
            arabic_name: format!("{arabic} {next}"),
            month: 1,
            year: next,
        });

        Self {
            start_year,
            periods,
        }
    }

    pub fn period(&self, number: u8) -> Option<&CalendarPeriod> {
        self.periods.iter().find(|p| p.number == number)
    }

    /// Assign a period to a file name, or `None` if it carries no usable
    /// month and year.
    ///
    /// A month name (English, short or Arabic) together with that period's
    /// year wins; when several periods match, the last one does. Otherwise a
    /// standalone month number plus a calendar year is used.
    pub fn detect_period(&self, file_name: &str) -> Option<u8> {
        let lower = file_name.to_lowercase();

        let by_name = self
            .periods
            .iter()
            .filter(|p| {
                lower.contains(&p.year.to_string())
                    && p.tokens().iter().any(|t| !t.is_empty() && lower.contains(t.as_str()))
            })
            .map(|p| p.number)
            .last();
        if by_name.is_some() {
            return by_name;
        }

        let month: u32 = MONTH_NUMBER.captures(&lower)?.get(1)?.as_str().parse().ok()?;
        let start = self.start_year.to_string();
        let next = (self.start_year + 1).to_string();
        // Earliest year mention decides
        let year = match (lower.find(&start), lower.find(&next)) {
            (Some(a), Some(b)) => {
                if a <= b {
                    self.start_year
                } else {
                    self.start_year + 1
                }
            }
            (Some(_), None) => self.start_year,
            (None, Some(_)) => self.start_year + 1,
            (None, None) => return None,
        };

        if year == self.start_year {
            Some(month as u8)
        } else if month == 1 {
            Some(PERIOD_COUNT)
        } else {
            None
        }
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(2025)
    }
}
