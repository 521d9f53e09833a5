//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts gate on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args, bad period)   |
//! | 3-9     | audit     | Batch audit outcomes                     |
//! | 10-19   | temporal  | Movement / lifecycle views               |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (output file not writable, etc.).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, period out of range, conflicting flags.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Audit (3-9)
// =============================================================================

/// `--strict`: at least one period's roster does not match its control total.
pub const EXIT_AUDIT_FAIL: u8 = 3;

/// No input file could be assigned a period and loaded.
pub const EXIT_AUDIT_NO_INPUT: u8 = 4;

/// `--strict`: at least one file failed to load.
pub const EXIT_AUDIT_LOAD: u8 = 5;

/// Audit config (`--config`) is unreadable or invalid.
pub const EXIT_AUDIT_CONFIG: u8 = 6;

// =============================================================================
// Temporal (10-19)
// =============================================================================

/// The requested period is not among the loaded files.
pub const EXIT_PERIOD_NOT_LOADED: u8 = 10;

/// No loaded period precedes the requested one, so there is nothing to compare.
pub const EXIT_NO_PREDECESSOR: u8 = 11;
