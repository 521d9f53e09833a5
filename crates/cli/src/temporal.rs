//! `manning movement`, `manning lifecycle`, `manning yearly`

use std::path::PathBuf;

use manning_recon::model::YearlyRow;
use manning_recon::{
    lifecycle, movement, yearly_stats, LifecycleRecord, LifecycleStatus, MovementReport, Period,
};
use serde::Serialize;

use crate::exit_codes::{EXIT_NO_PREDECESSOR, EXIT_PERIOD_NOT_LOADED};
use crate::input::{self, Batch};
use crate::output;
use crate::util::{pad_left, pad_right, signed};
use crate::{CliError, Context};

fn load(ctx: &Context, files: &[PathBuf], config: Option<PathBuf>) -> Result<Batch, CliError> {
    let config = input::audit_config(config.as_deref())?;
    input::load_batch(ctx, files, None, &config)
}

// ============================================================================
// movement
// ============================================================================

#[derive(Serialize)]
struct MovementBody<'a> {
    label: String,
    previous_label: String,
    #[serde(flatten)]
    movement: &'a MovementReport,
}

fn print_movement(m: &MovementReport) {
    println!("NEW JOINERS ({})", m.new_joiners.len());
    for e in &m.new_joiners {
        println!(
            "  {}  {}  {}  {}",
            pad_right(&e.name_eng, 28),
            pad_right(&e.badge_no, 12),
            pad_right(&e.job_title, 20),
            e.location
        );
    }
    println!();
    println!("LEAVERS ({})", m.leavers.len());
    for l in &m.leavers {
        println!(
            "  {}  {}  {}  {}",
            pad_right(&l.name_eng, 28),
            pad_right(&l.badge_no, 12),
            pad_right(&l.last_job, 20),
            l.last_location
        );
    }
    println!();
    println!("TRANSFERS ({})", m.transfers.len());
    for t in &m.transfers {
        println!(
            "  {}  {}  {} -> {}",
            pad_right(&t.employee.name_eng, 28),
            pad_right(&t.employee.badge_no, 12),
            t.old_location,
            t.new_location
        );
    }
}

pub fn cmd_movement(
    ctx: &Context,
    files: Vec<PathBuf>,
    period: u32,
    config: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let period = input::parse_period(period)?;
    let batch = load(ctx, &files, config)?;
    let label = ctx.period_label(period);

    if batch.store.get(period).is_none() {
        return Err(CliError::new(
            EXIT_PERIOD_NOT_LOADED,
            format!("{label} is not among the loaded files"),
        )
        .with_hint("pass that month's workbook along with the earlier ones"));
    }
    let Some(report) = movement(&batch.store, period) else {
        return Err(CliError::new(
            EXIT_NO_PREDECESSOR,
            format!("no loaded period before {label} to compare against"),
        ));
    };

    let previous_label = ctx.period_label(report.previous_period);
    if json {
        output::print_json(
            ctx,
            &MovementBody {
                label: label.clone(),
                previous_label: previous_label.clone(),
                movement: &report,
            },
        )?;
    } else {
        print_movement(&report);
    }
    eprintln!(
        "{previous_label} -> {label}: {} joined, {} left, {} transferred, {} unchanged",
        report.new_joiners.len(),
        report.leavers.len(),
        report.transfers.len(),
        report.unchanged
    );
    Ok(())
}

// ============================================================================
// lifecycle
// ============================================================================

#[derive(Serialize)]
struct LifecycleBody<'a> {
    loaded_periods: Vec<Period>,
    records: Vec<&'a LifecycleRecord>,
}

fn print_lifecycle(ctx: &Context, body: &LifecycleBody<'_>) {
    let mut header = format!("{}  {}", pad_right("BADGE", 12), pad_right("NAME", 28));
    for p in &body.loaded_periods {
        header.push_str(&format!(" {}", pad_right(&ctx.short_label(*p), 7)));
    }
    println!("{header}  GAPS  STATUS");

    for r in &body.records {
        let mut line = format!("{}  {}", pad_right(&r.badge, 12), pad_right(&r.name, 28));
        for p in &body.loaded_periods {
            let mark = if r.presence.get(p.index()).is_some_and(Option::is_some) {
                "x"
            } else {
                "."
            };
            line.push_str(&format!(" {}", pad_right(mark, 7)));
        }
        println!("{line}  {}  {}", pad_left(&r.gaps.to_string(), 4), r.status);
    }
}

pub fn cmd_lifecycle(
    ctx: &Context,
    files: Vec<PathBuf>,
    status: Option<LifecycleStatus>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let batch = load(ctx, &files, config)?;
    let all = lifecycle(&batch.store);
    let body = LifecycleBody {
        loaded_periods: batch.store.populated().map(|r| r.period).collect(),
        records: all
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .collect(),
    };

    if json {
        output::print_json(ctx, &body)?;
    } else {
        print_lifecycle(ctx, &body);
    }

    let count = |s: LifecycleStatus| all.iter().filter(|r| r.status == s).count();
    eprintln!(
        "{} people: {} stable, {} returned, {} left",
        all.len(),
        count(LifecycleStatus::Stable),
        count(LifecycleStatus::Returned),
        count(LifecycleStatus::LeftNoReturn)
    );
    Ok(())
}

// ============================================================================
// yearly
// ============================================================================

#[derive(Serialize)]
struct LabelledRow {
    label: String,
    #[serde(flatten)]
    row: YearlyRow,
}

#[derive(Serialize)]
struct YearlyBody {
    rows: Vec<LabelledRow>,
}

pub fn cmd_yearly(
    ctx: &Context,
    files: Vec<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let batch = load(ctx, &files, config)?;
    let body = YearlyBody {
        rows: yearly_stats(&batch.store)
            .into_iter()
            .map(|row| LabelledRow {
                label: ctx.period_label(row.period),
                row,
            })
            .collect(),
    };

    if json {
        return output::print_json(ctx, &body);
    }

    println!(
        "{}  {}  {}  {}  {}",
        pad_right("PERIOD", 16),
        pad_left("HEADCOUNT", 9),
        pad_left("CHANGE", 6),
        pad_left("JOINED", 6),
        pad_left("LEFT", 6),
    );
    for r in &body.rows {
        println!(
            "{}  {}  {}  {}  {}",
            pad_right(&r.label, 16),
            pad_left(&r.row.headcount.to_string(), 9),
            pad_left(&signed(r.row.variance), 6),
            pad_left(&r.row.joiners.to_string(), 6),
            pad_left(&r.row.leavers.to_string(), 6),
        );
    }
    Ok(())
}
