use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::{CliError, Context};

/// Envelope shared by every `--json` report.
#[derive(Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub generated_at: String,
    pub calendar_start_year: i32,
    #[serde(flatten)]
    pub body: &'a T,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    pub fn new(ctx: &Context, body: &'a T) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            calendar_start_year: ctx.calendar.start_year,
            body,
        }
    }
}

pub fn to_json<T: Serialize>(ctx: &Context, value: &T) -> Result<String, CliError> {
    let result = if ctx.settings.pretty_json {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.map_err(|e| CliError::io(format!("cannot serialize report: {e}")))
}

/// Print the enveloped report to stdout.
pub fn print_json<T: Serialize>(ctx: &Context, body: &T) -> Result<(), CliError> {
    println!("{}", to_json(ctx, &Envelope::new(ctx, body))?);
    Ok(())
}

/// Write the enveloped report to `path`.
pub fn write_json<T: Serialize>(ctx: &Context, body: &T, path: &Path) -> Result<(), CliError> {
    let text = to_json(ctx, &Envelope::new(ctx, body))?;
    fs::write(path, text + "\n")
        .map_err(|e| CliError::io(format!("cannot write {}: {}", path.display(), e)))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
