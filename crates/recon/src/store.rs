//! Period → audit result mapping.

use std::collections::BTreeMap;

use crate::model::{AuditResult, Period};

/// Every loaded period's audit result. Owned by the caller and rebuilt per
/// upload batch; the temporal views read it, they never mutate it.
#[derive(Debug, Clone, Default)]
pub struct AuditStore {
    periods: BTreeMap<Period, AuditResult>,
}

impl AuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` under its own period, returning whatever it replaced.
    pub fn replace(&mut self, result: AuditResult) -> Option<AuditResult> {
        self.periods.insert(result.period, result)
    }

    pub fn get(&self, period: Period) -> Option<&AuditResult> {
        self.periods.get(&period)
    }

    pub fn is_populated(&self, period: Period) -> bool {
        self.periods.contains_key(&period)
    }

    /// Nearest populated period strictly before `period`.
    pub fn previous_populated(&self, period: Period) -> Option<&AuditResult> {
        self.periods.range(..period).next_back().map(|(_, r)| r)
    }

    pub fn latest_populated(&self) -> Option<&AuditResult> {
        self.periods.values().next_back()
    }

    /// Populated periods in calendar order.
    pub fn populated(&self) -> impl Iterator<Item = &AuditResult> {
        self.periods.values()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
