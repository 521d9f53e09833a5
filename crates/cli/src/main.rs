// manning - workforce headcount audits from the command line

mod audit;
mod exit_codes;
mod input;
mod inspect;
mod logging;
mod output;
mod temporal;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use manning_config::{Calendar, Settings};
use manning_recon::LifecycleStatus;
use tracing::warn;

use exit_codes::{EXIT_AUDIT_CONFIG, EXIT_AUDIT_LOAD, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use logging::Verbosity;

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  manning-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  manning-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

#[derive(Parser)]
#[command(name = "manning")]
#[command(about = "Reconcile monthly staff rosters against their control sheets")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file (default: <config dir>/manning/settings.json)
    #[arg(long, global = true, env = "MANNING_SETTINGS", value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit monthly workbooks against their control totals
    #[command(after_help = "\
Each file's period is detected from its name ('Manning March 2025.xlsx',
'staff_03-2025.xlsx'). Files without a recognisable month are skipped.

Examples:
  manning audit 'Manning March 2025.xlsx'
  manning audit reports/*.xlsx --json | jq '.periods[].status'
  manning audit site.xlsx --period 3 --config audit.toml
  manning audit reports/*.xlsx --strict -o audit.json")]
    Audit {
        /// Workbooks (xlsx, xls, xlsb, ods, csv, tsv)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Assign this period (1-13) instead of detecting it; single file only
        #[arg(long, value_name = "N")]
        period: Option<u32>,

        /// Engine tuning (TOML)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// JSON on stdout instead of a table
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Exit non-zero when a period fails reconciliation or a file fails to load
        #[arg(long)]
        strict: bool,
    },

    /// Joiners, leavers and transfers into a period
    #[command(after_help = "\
Compares the period with the nearest earlier loaded period.

Examples:
  manning movement reports/*.xlsx --period 4
  manning movement reports/*.xlsx --period 4 --json")]
    Movement {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Period to report on (1-13)
        #[arg(long, value_name = "N")]
        period: u32,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Per-person presence across every loaded period
    Lifecycle {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Only show one status (stable, returned, left-no-return)
        #[arg(long, value_name = "STATUS")]
        status: Option<LifecycleStatus>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Headcount, variance, joiners and leavers per period
    Yearly {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Show how a workbook's sheets would be read, without auditing
    Inspect {
        file: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

/// Settings and calendar shared by every command.
pub struct Context {
    pub settings: Settings,
    pub calendar: Calendar,
}

impl Context {
    /// "March 2025", or "period 7" if the calendar has no such slot.
    pub fn period_label(&self, period: manning_recon::Period) -> String {
        self.calendar
            .period(period.number())
            .map(|p| p.label())
            .unwrap_or_else(|| format!("period {period}"))
    }

    pub fn short_label(&self, period: manning_recon::Period) -> String {
        self.calendar
            .period(period.number())
            .map(|p| p.short_name.clone())
            .unwrap_or_else(|| period.to_string())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = if cli.verbose {
        Verbosity::Verbose
    } else if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };

    let loaded = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let (settings, settings_error) = match loaded {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    logging::init(verbosity, &settings.log_filter);
    if let Some(e) = settings_error {
        warn!("{e}; using default settings");
    }

    let ctx = Context {
        calendar: Calendar::new(settings.calendar_start_year),
        settings,
    };

    let result = match cli.command {
        Commands::Audit { files, period, config, json, output, strict } => {
            audit::cmd_audit(&ctx, files, period, config, json, output, strict)
        }
        Commands::Movement { files, period, config, json } => {
            temporal::cmd_movement(&ctx, files, period, config, json)
        }
        Commands::Lifecycle { files, status, config, json } => {
            temporal::cmd_lifecycle(&ctx, files, status, config, json)
        }
        Commands::Yearly { files, config, json } => temporal::cmd_yearly(&ctx, files, config, json),
        Commands::Inspect { file, config, json } => inspect::cmd_inspect(&ctx, file, config, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(EXIT_AUDIT_CONFIG, msg)
    }

    pub fn load(err: manning_io::LoadError) -> Self {
        let hint = match &err {
            manning_io::LoadError::Open(_) | manning_io::LoadError::NoSheets => {
                Some("re-save the workbook from Excel or LibreOffice and retry".to_string())
            }
            _ => None,
        };
        Self { code: EXIT_AUDIT_LOAD, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
