//! `manning-recon`: workforce headcount reconciliation engine.
//!
//! Pure engine crate: receives workbooks already flattened to cell text,
//! returns audit results and cross-period views. No CLI or file IO.

pub mod batch;
pub mod classify;
pub mod config;
pub mod control;
pub mod derived;
pub mod engine;
pub mod error;
pub mod grid;
pub mod identity;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod rules;
pub mod store;
pub mod temporal;

pub use batch::{run_batch, BatchFailure, BatchJob, BatchReport, LoadedPeriod};
pub use config::AuditConfig;
pub use derived::{demographics, yearly_stats};
pub use engine::{audit_workbook, inspect_workbook, WorkbookReport};
pub use error::ReconError;
pub use grid::{SheetGrid, Workbook};
pub use identity::canonical_identifier;
pub use model::{
    AuditResult, AuditStatus, Employee, LifecycleRecord, LifecycleStatus, MovementReport, Period,
    PERIOD_COUNT,
};
pub use store::AuditStore;
pub use temporal::{lifecycle, movement};
