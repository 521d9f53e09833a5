//! Cross-period identity tracking: movement between two periods and the
//! full-history lifecycle ledger.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::{
    Employee, Leaver, LifecycleRecord, LifecycleStatus, MovementReport, Period, Transfer,
    PERIOD_COUNT,
};
use crate::rules::BADGE_PLACEHOLDER;
use crate::store::AuditStore;

/// Location key for transfer detection: trimmed, inner whitespace collapsed,
/// case-folded.
pub fn location_key(location: &str) -> String {
    location
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Compare `period` against its nearest populated predecessor.
///
/// `None` when the period is not loaded or nothing loaded comes before it.
/// An empty roster is still a loaded period: everyone before it is a leaver.
pub fn movement(store: &AuditStore, period: Period) -> Option<MovementReport> {
    let current = store.get(period)?;
    let previous = store.previous_populated(period)?;

    let before: HashMap<String, &Employee> = previous
        .employees
        .iter()
        .map(|e| (e.identifier(), e))
        .collect();
    let now: HashSet<String> = current.employees.iter().map(Employee::identifier).collect();

    let mut new_joiners = Vec::new();
    let mut transfers = Vec::new();
    let mut unchanged = 0;

    for emp in &current.employees {
        let id = emp.identifier();
        match before.get(&id) {
            None => new_joiners.push(emp.clone()),
            Some(prev) if location_key(&prev.location) != location_key(&emp.location) => {
                transfers.push(Transfer {
                    identifier: id,
                    employee: emp.clone(),
                    old_location: prev.location.clone(),
                    new_location: emp.location.clone(),
                });
            }
            Some(_) => unchanged += 1,
        }
    }

    let leavers = previous
        .employees
        .iter()
        .filter_map(|e| {
            let id = e.identifier();
            (!now.contains(&id)).then(|| Leaver {
                identifier: id,
                name_eng: e.name_eng.clone(),
                badge_no: e.badge_no.clone(),
                last_location: e.location.clone(),
                last_job: e.job_title.clone(),
            })
        })
        .collect::<Vec<_>>();

    debug!(
        previous = %previous.period,
        current = %period,
        joiners = new_joiners.len(),
        leavers = leavers.len(),
        transfers = transfers.len(),
        unchanged,
        "movement computed"
    );

    Some(MovementReport {
        previous_period: previous.period,
        current_period: period,
        new_joiners,
        leavers,
        transfers,
        unchanged,
    })
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

fn display_badge(emp: &Employee) -> String {
    let badge = emp.badge_no.trim();
    if !badge.is_empty() && badge != BADGE_PLACEHOLDER {
        badge.to_string()
    } else if !emp.mrn.trim().is_empty() {
        emp.mrn.trim().to_string()
    } else {
        BADGE_PLACEHOLDER.to_string()
    }
}

/// One record per identity ever seen, in order of first sighting.
///
/// Gaps are counted per absent slot from first sighting up to the latest
/// loaded period. An unloaded month counts as an absence.
pub fn lifecycle(store: &AuditStore) -> Vec<LifecycleRecord> {
    let Some(latest) = store.latest_populated().map(|r| r.period) else {
        return Vec::new();
    };

    let mut records: Vec<LifecycleRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for result in store.populated() {
        let period = result.period;
        for emp in &result.employees {
            let id = emp.identifier();
            let slot = match index.get(&id) {
                Some(&i) => i,
                None => {
                    index.insert(id.clone(), records.len());
                    records.push(LifecycleRecord {
                        identifier: id,
                        name: emp.name_eng.clone(),
                        badge: display_badge(emp),
                        presence: vec![None; PERIOD_COUNT as usize],
                        first_seen: period,
                        last_seen: period,
                        gaps: 0,
                        status: LifecycleStatus::Stable,
                    });
                    records.len() - 1
                }
            };
            let record = &mut records[slot];
            record.presence[period.index()] = Some(emp.location.clone());
            record.last_seen = period;
        }
    }

    let end = latest.number() as usize;
    for record in &mut records {
        let mut returned = false;
        for slot in &record.presence[record.first_seen.index()..end] {
            if slot.is_none() {
                record.gaps += 1;
            } else if record.gaps > 0 {
                returned = true;
            }
        }
        record.status = if returned {
            LifecycleStatus::Returned
        } else if record.last_seen < latest {
            LifecycleStatus::LeftNoReturn
        } else {
            LifecycleStatus::Stable
        };
    }

    records
}
